use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::models::assignments::responses::AssignmentResponse;
use crate::models::auth::entities::Principal;
use crate::models::{ApiResponse, ErrorCode};
use crate::registrar::{self, RegistrarEvent};
use crate::services::access::{
    MissingSection, bad_request, forbidden, internal_error, load_owned_section,
};
use crate::utils::validate::{validate_assignment_title, validate_due_date};

fn assignment_not_found(assignment_id: i64) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::AssignmentNotFound,
        format!("作业 {assignment_id} 不存在"),
    ))
}

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    principal: &Principal,
    req: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let context =
        match load_owned_section(&storage, req.sec_no, principal, MissingSection::BadRequest)
            .await
        {
            Ok(context) => context,
            Err(response) => return Ok(response),
        };

    let existing = match storage.get_assignment_by_id(req.id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => return Ok(assignment_not_found(req.id)),
        Err(e) => return Ok(internal_error("查询作业失败", e)),
    };

    // 作业必须属于请求中声明的教学班
    if existing.section_no != req.sec_no {
        return Ok(forbidden(format!(
            "作业 {} 不属于教学班 {}",
            req.id, req.sec_no
        )));
    }

    if let Err(msg) = validate_assignment_title(&req.title) {
        return Ok(bad_request(ErrorCode::AssignmentTitleInvalid, msg));
    }
    if let Some(due_date) = req.due_date {
        if let Err(msg) = validate_due_date(due_date, &context.term) {
            return Ok(bad_request(ErrorCode::AssignmentDueDateInvalid, msg));
        }
    }

    let updated = match storage
        .update_assignment(req.id, req.title.trim().to_string(), req.due_date)
        .await
    {
        Ok(Some(assignment)) => assignment,
        Ok(None) => return Ok(assignment_not_found(req.id)),
        Err(e) => return Ok(internal_error("更新作业失败", e)),
    };

    info!("Assignment {} updated by {}", updated.id, principal.email);

    let response = AssignmentResponse::from_parts(updated, &context);
    let registrar = service.get_registrar(request);
    registrar::notify(registrar.as_ref(), RegistrarEvent::UpdateAssignment, &response);

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "作业更新成功")))
}

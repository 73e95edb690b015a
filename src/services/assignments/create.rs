use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::assignments::responses::AssignmentResponse;
use crate::models::auth::entities::Principal;
use crate::models::{ApiResponse, ErrorCode};
use crate::registrar::{self, RegistrarEvent};
use crate::services::access::{MissingSection, bad_request, internal_error, load_owned_section};
use crate::utils::validate::{validate_assignment_title, validate_due_date};

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    principal: &Principal,
    req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let context =
        match load_owned_section(&storage, req.sec_no, principal, MissingSection::BadRequest)
            .await
        {
            Ok(context) => context,
            Err(response) => return Ok(response),
        };

    if let Err(msg) = validate_assignment_title(&req.title) {
        return Ok(bad_request(ErrorCode::AssignmentTitleInvalid, msg));
    }

    let due_date = match req.due_date {
        Some(due_date) => due_date,
        None => {
            return Ok(bad_request(
                ErrorCode::AssignmentDueDateInvalid,
                "Due date is required",
            ));
        }
    };
    if let Err(msg) = validate_due_date(due_date, &context.term) {
        return Ok(bad_request(ErrorCode::AssignmentDueDateInvalid, msg));
    }

    let assignment = match storage
        .create_assignment(req.sec_no, req.title.trim().to_string(), due_date)
        .await
    {
        Ok(assignment) => assignment,
        Err(e) => return Ok(internal_error("创建作业失败", e)),
    };

    info!(
        "Assignment {} created in section {} by {}",
        assignment.id, assignment.section_no, principal.email
    );

    let response = AssignmentResponse::from_parts(assignment, &context);
    let registrar = service.get_registrar(request);
    registrar::notify(registrar.as_ref(), RegistrarEvent::AddAssignment, &response);

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "作业创建成功")))
}

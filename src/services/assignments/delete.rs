use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::models::auth::entities::Principal;
use crate::models::{ApiResponse, ErrorCode};
use crate::registrar::{self, RegistrarEvent};
use crate::services::access::{forbidden, internal_error};

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    principal: &Principal,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                format!("作业 {assignment_id} 不存在"),
            )));
        }
        Err(e) => return Ok(internal_error("查询作业失败", e)),
    };

    // 权限检查：只有任课教师才能删除
    let owned = match storage.get_section_context(assignment.section_no).await {
        Ok(Some(context)) => context.section.is_taught_by(&principal.email),
        Ok(None) => false,
        Err(e) => return Ok(internal_error("查询教学班失败", e)),
    };
    if !owned {
        return Ok(forbidden("只能删除自己教学班的作业"));
    }

    match storage.delete_assignment(assignment_id).await {
        Ok(true) => {
            info!("Assignment {} deleted by {}", assignment_id, principal.email);
            let registrar = service.get_registrar(request);
            registrar::notify(
                registrar.as_ref(),
                RegistrarEvent::DeleteAssignment,
                &assignment_id,
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("作业已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            format!("作业 {assignment_id} 不存在"),
        ))),
        Err(e) => Ok(internal_error("删除作业失败", e)),
    }
}

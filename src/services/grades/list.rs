use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::auth::entities::Principal;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{forbidden, internal_error};

pub async fn list_assignment_grades(
    service: &GradeService,
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

    let owned = match storage.get_section_context(assignment.section_no).await {
        Ok(Some(context)) => context.section.is_taught_by(&principal.email),
        Ok(None) => false,
        Err(e) => return Ok(internal_error("查询教学班失败", e)),
    };
    if !owned {
        return Ok(forbidden("只能查看自己教学班的成绩"));
    }

    match storage.list_assignment_grades(assignment_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items, "获取成绩列表成功"))),
        Err(e) => Ok(internal_error("查询成绩列表失败", e)),
    }
}

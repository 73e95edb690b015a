use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::ApiResponse;
use crate::models::auth::entities::Principal;
use crate::models::sections::requests::TermQuery;
use crate::services::access::internal_error;

pub async fn list_student_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    principal: &Principal,
    query: TermQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_student_assignments(principal.user_id, query.year, &query.semester)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items, "获取作业列表成功"))),
        Err(e) => Ok(internal_error("查询学生作业失败", e)),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::ApiResponse;
use crate::models::auth::entities::Principal;
use crate::models::sections::requests::TermQuery;
use crate::services::access::internal_error;

pub async fn list_instructor_sections(
    service: &AssignmentService,
    request: &HttpRequest,
    principal: &Principal,
    query: TermQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_instructor_sections(&principal.email, query.year, &query.semester)
        .await
    {
        Ok(sections) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            sections,
            "获取教学班列表成功",
        ))),
        Err(e) => Ok(internal_error("查询教学班列表失败", e)),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::ApiResponse;
use crate::models::auth::entities::Principal;
use crate::services::access::{MissingSection, internal_error, load_owned_section};

pub async fn list_section_enrollments(
    service: &EnrollmentService,
    request: &HttpRequest,
    principal: &Principal,
    section_no: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) =
        load_owned_section(&storage, section_no, principal, MissingSection::NotFound).await
    {
        return Ok(response);
    }

    match storage.list_section_enrollments(section_no).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items, "获取选课名单成功"))),
        Err(e) => Ok(internal_error("查询选课名单失败", e)),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::ApiResponse;
use crate::models::assignments::responses::AssignmentResponse;
use crate::models::auth::entities::Principal;
use crate::services::access::{MissingSection, internal_error, load_owned_section};

pub async fn list_section_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    principal: &Principal,
    section_no: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let context =
        match load_owned_section(&storage, section_no, principal, MissingSection::NotFound).await {
            Ok(context) => context,
            Err(response) => return Ok(response),
        };

    match storage.list_assignments_by_section(section_no).await {
        Ok(assignments) => {
            let items: Vec<AssignmentResponse> = assignments
                .into_iter()
                .map(|assignment| AssignmentResponse::from_parts(assignment, &context))
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(items, "获取作业列表成功")))
        }
        Err(e) => Ok(internal_error("查询作业列表失败", e)),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{HashMap, HashSet};
use tracing::info;

use super::EnrollmentService;
use crate::models::auth::entities::Principal;
use crate::models::enrollments::requests::UpdateEnrollmentGrade;
use crate::models::{ApiResponse, ErrorCode};
use crate::registrar::{self, RegistrarEvent};
use crate::services::access::{bad_request, internal_error};

pub async fn update_enrollment_grades(
    service: &EnrollmentService,
    request: &HttpRequest,
    principal: &Principal,
    updates: Vec<UpdateEnrollmentGrade>,
) -> ActixResult<HttpResponse> {
    if updates.is_empty() {
        return Ok(HttpResponse::Ok().json(ApiResponse::success_empty("没有需要更新的成绩")));
    }

    let storage = service.get_storage(request);

    let ids: Vec<i64> = updates.iter().map(|u| u.enrollment_id).collect();
    let enrollments = match storage.get_enrollments_by_ids(&ids).await {
        Ok(list) => list
            .into_iter()
            .map(|e| (e.enrollment_id, e))
            .collect::<HashMap<_, _>>(),
        Err(e) => return Ok(internal_error("查询选课记录失败", e)),
    };

    let section_nos: Vec<i64> = enrollments
        .values()
        .map(|e| e.section_no)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let owned_sections: HashSet<i64> = match storage.get_sections_by_nos(&section_nos).await {
        Ok(sections) => sections
            .into_iter()
            .filter(|s| s.is_taught_by(&principal.email))
            .map(|s| s.section_no)
            .collect(),
        Err(e) => return Ok(internal_error("查询教学班失败", e)),
    };

    // 先校验全部条目，任一失败则不写入
    for update in &updates {
        let Some(enrollment) = enrollments.get(&update.enrollment_id) else {
            return Ok(bad_request(
                ErrorCode::EnrollmentNotFound,
                format!("选课记录 {} 不存在", update.enrollment_id),
            ));
        };
        if !owned_sections.contains(&enrollment.section_no) {
            return Ok(bad_request(
                ErrorCode::SectionPermissionDenied,
                format!("不是选课记录 {} 所在教学班的任课教师", update.enrollment_id),
            ));
        }
    }

    if let Err(e) = storage.update_enrollment_grades(&updates).await {
        return Ok(internal_error("更新最终成绩失败", e));
    }

    info!(
        "{} enrollment grade(s) updated by {}",
        updates.len(),
        principal.email
    );

    let registrar = service.get_registrar(request);
    for update in &updates {
        registrar::notify(registrar.as_ref(), RegistrarEvent::UpdateEnrollment, update);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("最终成绩已更新")))
}

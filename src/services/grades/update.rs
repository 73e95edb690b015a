use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{HashMap, HashSet};
use tracing::info;

use super::GradeService;
use crate::models::auth::entities::Principal;
use crate::models::grades::requests::UpdateGradeScore;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{bad_request, forbidden, internal_error};
use crate::utils::validate::validate_score;

pub async fn update_grades(
    service: &GradeService,
    request: &HttpRequest,
    principal: &Principal,
    updates: Vec<UpdateGradeScore>,
) -> ActixResult<HttpResponse> {
    if updates.is_empty() {
        return Ok(HttpResponse::Ok().json(ApiResponse::success_empty("没有需要更新的分数")));
    }

    let storage = service.get_storage(request);

    let grade_ids: Vec<i64> = updates.iter().map(|u| u.grade_id).collect();
    let grades = match storage.get_grades_by_ids(&grade_ids).await {
        Ok(list) => list
            .into_iter()
            .map(|g| (g.grade_id, g))
            .collect::<HashMap<_, _>>(),
        Err(e) => return Ok(internal_error("查询成绩失败", e)),
    };

    let assignment_ids: Vec<i64> = grades
        .values()
        .map(|g| g.assignment_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let assignment_sections = match storage.get_assignments_by_ids(&assignment_ids).await {
        Ok(list) => list
            .into_iter()
            .map(|a| (a.id, a.section_no))
            .collect::<HashMap<_, _>>(),
        Err(e) => return Ok(internal_error("查询作业失败", e)),
    };

    let section_nos: Vec<i64> = assignment_sections
        .values()
        .copied()
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
        let Some(grade) = grades.get(&update.grade_id) else {
            return Ok(bad_request(
                ErrorCode::GradeNotFound,
                format!("成绩 {} 不存在", update.grade_id),
            ));
        };
        let owned = assignment_sections
            .get(&grade.assignment_id)
            .is_some_and(|section_no| owned_sections.contains(section_no));
        if !owned {
            return Ok(forbidden(format!(
                "不是成绩 {} 所在教学班的任课教师",
                update.grade_id
            )));
        }
        if let Err(msg) = validate_score(update.score) {
            return Ok(bad_request(ErrorCode::GradeScoreInvalid, msg));
        }
    }

    if let Err(e) = storage.update_grade_scores(&updates).await {
        return Ok(internal_error("更新分数失败", e));
    }

    info!("{} grade(s) updated by {}", updates.len(), principal.email);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("分数已更新")))
}

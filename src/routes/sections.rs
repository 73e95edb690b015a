use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::auth::entities::Principal;
use crate::models::sections::requests::TermQuery;
use crate::models::users::entities::UserRole;
use crate::services::{AssignmentService, EnrollmentService};

// 懒加载的全局服务实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

// 教师在指定学期任教的教学班
pub async fn list_sections(
    req: HttpRequest,
    principal: Principal,
    query: web::Query<TermQuery>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_instructor_sections(&req, &principal, query.into_inner())
        .await
}

// 教学班的作业
pub async fn list_section_assignments(
    req: HttpRequest,
    principal: Principal,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_section_assignments(&req, &principal, path.into_inner())
        .await
}

// 教学班选课名单
pub async fn list_section_enrollments(
    req: HttpRequest,
    principal: Principal,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_section_enrollments(&req, &principal, path.into_inner())
        .await
}

// 配置路由，全部仅限教师
pub fn configure_sections_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sections")
            .wrap(middlewares::RequireRole::new(&UserRole::Instructor))
            .wrap(RequireJWT)
            .route("", web::get().to(list_sections))
            .route("/{sec_no}/assignments", web::get().to(list_section_assignments))
            .route("/{sec_no}/enrollments", web::get().to(list_section_enrollments)),
    );
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::auth::entities::Principal;
use crate::models::enrollments::requests::UpdateEnrollmentGrade;
use crate::models::users::entities::UserRole;
use crate::services::EnrollmentService;

// 懒加载的全局 EnrollmentService 实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

// 批量登记最终成绩
pub async fn update_enrollment_grades(
    req: HttpRequest,
    principal: Principal,
    body: web::Json<Vec<UpdateEnrollmentGrade>>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .update_enrollment_grades(&req, &principal, body.into_inner())
        .await
}

// 配置路由
pub fn configure_enrollments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/enrollments")
            .wrap(middlewares::RequireRole::new(&UserRole::Instructor))
            .wrap(RequireJWT)
            .route("", web::put().to(update_enrollment_grades)),
    );
}

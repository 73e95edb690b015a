use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::auth::entities::Principal;
use crate::models::grades::requests::UpdateGradeScore;
use crate::models::users::entities::UserRole;
use crate::services::GradeService;

// 懒加载的全局 GradeService 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// 批量登记分数
pub async fn update_grades(
    req: HttpRequest,
    principal: Principal,
    body: web::Json<Vec<UpdateGradeScore>>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .update_grades(&req, &principal, body.into_inner())
        .await
}

// 配置路由
pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/grades")
            .wrap(middlewares::RequireRole::new(&UserRole::Instructor))
            .wrap(RequireJWT)
            .route("", web::put().to(update_grades)),
    );
}

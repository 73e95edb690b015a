use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::assignments::requests::{CreateAssignmentRequest, UpdateAssignmentRequest};
use crate::models::auth::entities::Principal;
use crate::models::sections::requests::TermQuery;
use crate::models::users::entities::UserRole;
use crate::services::{AssignmentService, GradeService};

// 懒加载的全局服务实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// 学生在指定学期的作业与得分
pub async fn list_student_assignments(
    req: HttpRequest,
    principal: Principal,
    query: web::Query<TermQuery>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_student_assignments(&req, &principal, query.into_inner())
        .await
}

// 创建作业
pub async fn create_assignment(
    req: HttpRequest,
    principal: Principal,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, &principal, body.into_inner())
        .await
}

// 更新作业
pub async fn update_assignment(
    req: HttpRequest,
    principal: Principal,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, &principal, body.into_inner())
        .await
}

// 删除作业
pub async fn delete_assignment(
    req: HttpRequest,
    principal: Principal,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .delete_assignment(&req, &principal, path.into_inner())
        .await
}

// 作业成绩列表
pub async fn list_assignment_grades(
    req: HttpRequest,
    principal: Principal,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .list_assignment_grades(&req, &principal, path.into_inner())
        .await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/assignments")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    // 学生查看自己的作业
                    .route(
                        web::get()
                            .to(list_student_assignments)
                            .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                    )
                    // 创建作业 - 仅教师
                    .route(
                        web::post()
                            .to(create_assignment)
                            .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
                    )
                    // 更新作业 - 仅教师
                    .route(
                        web::put()
                            .to(update_assignment)
                            .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::delete().to(delete_assignment))
                    .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
            )
            .service(
                web::resource("/{id}/grades")
                    .route(web::get().to(list_assignment_grades))
                    .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
            ),
    );
}

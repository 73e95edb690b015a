#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use serde_json::Value;

use rust_gradebook::models::users::entities::UserRole;
use rust_gradebook::registrar::RegistrarNotifier;
use rust_gradebook::registrar::notifier::MemoryRegistrar;
use rust_gradebook::routes;
use rust_gradebook::runtime::lifetime::seed::seed_demo_data;
use rust_gradebook::storage::Storage;
use rust_gradebook::storage::sea_orm_storage::SeaOrmStorage;
use rust_gradebook::utils::jwt::JwtUtils;
use rust_gradebook::utils::{json_error_handler, path_error_handler, query_error_handler};

pub const PASSWORD: &str = "ted2025";
pub const TED: &str = "ted@csumb.edu";
pub const DAVE: &str = "dave@csumb.edu";
pub const SAM: &str = "sam@csumb.edu";
pub const SAMA: &str = "sama@csumb.edu";
pub const JOE: &str = "joe@csumb.edu";

/// 内存数据库 + 演示数据 + 内存 registrar
pub struct Fixture {
    pub storage: Arc<dyn Storage>,
    pub registrar: Arc<MemoryRegistrar>,
    /// ted 任教的 cst489 教学班
    pub ted_section: i64,
    /// dave 任教的 cst363 教学班
    pub dave_section: i64,
}

impl Fixture {
    pub async fn new() -> Self {
        let storage: Arc<dyn Storage> = Arc::new(
            SeaOrmStorage::connect("sqlite::memory:")
                .await
                .expect("in-memory storage"),
        );
        seed_demo_data(&storage, PASSWORD)
            .await
            .expect("seed demo data");

        let ted_section = Self::section_of(&storage, TED).await;
        let dave_section = Self::section_of(&storage, DAVE).await;

        Self {
            storage,
            registrar: Arc::new(MemoryRegistrar::with_capacity(64)),
            ted_section,
            dave_section,
        }
    }

    async fn section_of(storage: &Arc<dyn Storage>, email: &str) -> i64 {
        let sections = storage
            .list_instructor_sections(email, 2025, "Fall")
            .await
            .expect("list sections");
        sections.first().expect("seeded section").sec_no
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let registrar: Arc<dyn RegistrarNotifier> = self.registrar.clone();
        App::new()
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(registrar))
            .configure(routes::configure_auth_routes)
            .configure(routes::configure_sections_routes)
            .configure(routes::configure_assignments_routes)
            .configure(routes::configure_enrollments_routes)
            .configure(routes::configure_grades_routes)
    }

    pub async fn user_id(&self, email: &str) -> i64 {
        self.storage
            .get_user_by_email(email)
            .await
            .expect("lookup user")
            .expect("seeded user")
            .id
    }

    pub async fn enrollment_ids(&self, section_no: i64) -> Vec<i64> {
        self.storage
            .list_section_enrollments(section_no)
            .await
            .expect("list enrollments")
            .into_iter()
            .map(|e| e.enrollment_id)
            .collect()
    }
}

pub fn token(email: &str, role: UserRole) -> String {
    JwtUtils::generate_access_token(email, role.claim()).expect("token")
}

pub fn bearer(email: &str, role: UserRole) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token(email, role)))
}

pub fn instructor(email: &str) -> (&'static str, String) {
    bearer(email, UserRole::Instructor)
}

pub fn student(email: &str) -> (&'static str, String) {
    bearer(email, UserRole::Student)
}

/// 读取响应体的 JSON 信封
pub async fn envelope<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let bytes = actix_web::test::read_body(resp).await;
    serde_json::from_slice(&bytes).expect("json envelope")
}

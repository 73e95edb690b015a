pub mod assignments;
pub mod auth;
pub mod common;
pub mod enrollments;
pub mod grades;
pub mod sections;
pub mod users;

pub use common::{ApiResponse, ErrorCode};

// 程序启动时间，供运行时信息展示
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod catalog;
mod enrollments;
mod grades;
mod sections;
mod users;

use crate::config::AppConfig;
use crate::errors::{GradebookError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 根据全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database.url).await
    }

    /// 连接指定数据库并运行迁移
    pub async fn connect(url: &str) -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| GradebookError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| GradebookError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存数据库只存在于单个连接中，不能启用 WAL，也不能让连接被回收
        let (opt, pool) = if in_memory {
            (
                opt.journal_mode(SqliteJournalMode::Memory),
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None::<Duration>)
                    .max_lifetime(None::<Duration>),
            )
        } else {
            (
                opt.journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal)
                    .pragma("mmap_size", "536870912")
                    .pragma("wal_autocheckpoint", "1000"),
                SqlitePoolOptions::new()
                    .max_connections(config.database.pool_size)
                    .min_connections(1)
                    .idle_timeout(Duration::from_secs(300)),
            )
        };

        let pool = pool
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| GradebookError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| GradebookError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(GradebookError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{entities::Assignment, responses::StudentAssignmentResponse},
    enrollments::{
        entities::Enrollment, requests::UpdateEnrollmentGrade, responses::EnrollmentResponse,
    },
    grades::{entities::Grade, requests::UpdateGradeScore, responses::GradeResponse},
    sections::{
        entities::{Course, Section, SectionContext, Term},
        requests::{CreateCourseRequest, CreateSectionRequest, CreateTermRequest},
        responses::SectionResponse,
    },
    users::{entities::User, requests::CreateUserRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 学期与课程模块
    async fn create_term(&self, term: CreateTermRequest) -> Result<Term> {
        self.create_term_impl(term).await
    }

    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    // 教学班模块
    async fn create_section(&self, section: CreateSectionRequest) -> Result<Section> {
        self.create_section_impl(section).await
    }

    async fn get_section_context(&self, section_no: i64) -> Result<Option<SectionContext>> {
        self.get_section_context_impl(section_no).await
    }

    async fn get_sections_by_nos(&self, section_nos: &[i64]) -> Result<Vec<Section>> {
        self.get_sections_by_nos_impl(section_nos).await
    }

    async fn list_instructor_sections(
        &self,
        instructor_email: &str,
        year: i32,
        semester: &str,
    ) -> Result<Vec<SectionResponse>> {
        self.list_instructor_sections_impl(instructor_email, year, semester)
            .await
    }

    // 作业模块
    async fn list_assignments_by_section(&self, section_no: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_section_impl(section_no).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn get_assignments_by_ids(&self, ids: &[i64]) -> Result<Vec<Assignment>> {
        self.get_assignments_by_ids_impl(ids).await
    }

    async fn create_assignment(
        &self,
        section_no: i64,
        title: String,
        due_date: NaiveDate,
    ) -> Result<Assignment> {
        self.create_assignment_impl(section_no, title, due_date)
            .await
    }

    async fn update_assignment(
        &self,
        id: i64,
        title: String,
        due_date: Option<NaiveDate>,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, title, due_date).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    async fn list_student_assignments(
        &self,
        student_id: i64,
        year: i32,
        semester: &str,
    ) -> Result<Vec<StudentAssignmentResponse>> {
        self.list_student_assignments_impl(student_id, year, semester)
            .await
    }

    // 选课模块
    async fn create_enrollment(&self, student_id: i64, section_no: i64) -> Result<Enrollment> {
        self.create_enrollment_impl(student_id, section_no).await
    }

    async fn get_enrollments_by_ids(&self, ids: &[i64]) -> Result<Vec<Enrollment>> {
        self.get_enrollments_by_ids_impl(ids).await
    }

    async fn list_section_enrollments(&self, section_no: i64) -> Result<Vec<EnrollmentResponse>> {
        self.list_section_enrollments_impl(section_no).await
    }

    async fn update_enrollment_grades(&self, updates: &[UpdateEnrollmentGrade]) -> Result<()> {
        self.update_enrollment_grades_impl(updates).await
    }

    // 成绩模块
    async fn list_assignment_grades(&self, assignment_id: i64) -> Result<Vec<GradeResponse>> {
        self.list_assignment_grades_impl(assignment_id).await
    }

    async fn get_grades_by_ids(&self, ids: &[i64]) -> Result<Vec<Grade>> {
        self.get_grades_by_ids_impl(ids).await
    }

    async fn update_grade_scores(&self, updates: &[UpdateGradeScore]) -> Result<()> {
        self.update_grade_scores_impl(updates).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_url_is_inferred_from_path() {
        assert_eq!(
            SeaOrmStorage::build_database_url("gradebook.db").unwrap(),
            "sqlite://gradebook.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/gradebook").unwrap(),
            "postgres://u:p@localhost/gradebook"
        );
        assert!(SeaOrmStorage::build_database_url("gradebook").is_err());
    }
}

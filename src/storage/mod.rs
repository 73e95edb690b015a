use std::sync::Arc;

use chrono::NaiveDate;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 学期与课程方法
    // 创建学期（开始日期不得晚于结束日期）
    async fn create_term(&self, term: CreateTermRequest) -> Result<Term>;
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;

    /// 教学班方法
    // 创建教学班
    async fn create_section(&self, section: CreateSectionRequest) -> Result<Section>;
    // 获取教学班及其学期、课程
    async fn get_section_context(&self, section_no: i64) -> Result<Option<SectionContext>>;
    // 批量获取教学班
    async fn get_sections_by_nos(&self, section_nos: &[i64]) -> Result<Vec<Section>>;
    // 列出教师在指定学期任教的教学班
    async fn list_instructor_sections(
        &self,
        instructor_email: &str,
        year: i32,
        semester: &str,
    ) -> Result<Vec<SectionResponse>>;

    /// 作业方法
    // 列出教学班的作业（按截止日期升序）
    async fn list_assignments_by_section(&self, section_no: i64) -> Result<Vec<Assignment>>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 批量获取作业
    async fn get_assignments_by_ids(&self, ids: &[i64]) -> Result<Vec<Assignment>>;
    // 创建作业
    async fn create_assignment(
        &self,
        section_no: i64,
        title: String,
        due_date: NaiveDate,
    ) -> Result<Assignment>;
    // 更新作业标题与截止日期
    async fn update_assignment(
        &self,
        id: i64,
        title: String,
        due_date: Option<NaiveDate>,
    ) -> Result<Option<Assignment>>;
    // 删除作业及其成绩
    async fn delete_assignment(&self, id: i64) -> Result<bool>;
    // 列出学生在指定学期的作业与得分
    async fn list_student_assignments(
        &self,
        student_id: i64,
        year: i32,
        semester: &str,
    ) -> Result<Vec<StudentAssignmentResponse>>;

    /// 选课方法
    // 创建选课记录
    async fn create_enrollment(&self, student_id: i64, section_no: i64) -> Result<Enrollment>;
    // 批量获取选课记录
    async fn get_enrollments_by_ids(&self, ids: &[i64]) -> Result<Vec<Enrollment>>;
    // 列出教学班选课名单（按学生姓名排序）
    async fn list_section_enrollments(&self, section_no: i64) -> Result<Vec<EnrollmentResponse>>;
    // 在同一事务中更新最终成绩
    async fn update_enrollment_grades(&self, updates: &[UpdateEnrollmentGrade]) -> Result<()>;

    /// 成绩方法
    // 列出作业成绩，缺失的成绩行在此时创建
    async fn list_assignment_grades(&self, assignment_id: i64) -> Result<Vec<GradeResponse>>;
    // 批量获取成绩
    async fn get_grades_by_ids(&self, ids: &[i64]) -> Result<Vec<Grade>>;
    // 在同一事务中更新分数
    async fn update_grade_scores(&self, updates: &[UpdateGradeScore]) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

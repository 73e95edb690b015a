//! 学期与课程存储操作

use super::SeaOrmStorage;
use crate::entity::courses::ActiveModel as CourseActiveModel;
use crate::entity::terms::ActiveModel as TermActiveModel;
use crate::errors::{GradebookError, Result};
use crate::models::sections::{
    entities::{Course, Term},
    requests::{CreateCourseRequest, CreateTermRequest},
};
use sea_orm::{ActiveModelTrait, Set};

impl SeaOrmStorage {
    /// 创建学期
    pub async fn create_term_impl(&self, req: CreateTermRequest) -> Result<Term> {
        if req.start_date > req.end_date {
            return Err(GradebookError::validation(format!(
                "学期开始日期 {} 晚于结束日期 {}",
                req.start_date, req.end_date
            )));
        }

        let model = TermActiveModel {
            year: Set(req.year),
            semester: Set(req.semester),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("创建学期失败: {e}")))?;

        Ok(result.into_term())
    }

    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let model = CourseActiveModel {
            course_id: Set(req.course_id),
            title: Set(req.title),
            credits: Set(req.credits),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }
}

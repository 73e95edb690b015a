//! 选课存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{GradebookError, Result};
use crate::models::enrollments::{
    entities::Enrollment, requests::UpdateEnrollmentGrade, responses::EnrollmentResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建选课记录
    pub async fn create_enrollment_impl(
        &self,
        student_id: i64,
        section_no: i64,
    ) -> Result<Enrollment> {
        let model = ActiveModel {
            grade: Set(None),
            student_id: Set(student_id),
            section_no: Set(section_no),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("创建选课记录失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    /// 批量获取选课记录
    pub async fn get_enrollments_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Enrollment>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let enrollments = Enrollments::find()
            .filter(Column::EnrollmentId.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(enrollments
            .into_iter()
            .map(|m| m.into_enrollment())
            .collect())
    }

    /// 列出教学班选课名单，按学生姓名排序
    pub async fn list_section_enrollments_impl(
        &self,
        section_no: i64,
    ) -> Result<Vec<EnrollmentResponse>> {
        let Some(context) = self.get_section_context_impl(section_no).await? else {
            return Ok(Vec::new());
        };

        let enrollments = Enrollments::find()
            .filter(Column::SectionNo.eq(section_no))
            .order_by_asc(Column::EnrollmentId)
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询选课记录失败: {e}")))?;

        if enrollments.is_empty() {
            return Ok(Vec::new());
        }

        let students: HashMap<i64, _> = Users::find()
            .filter(UserColumn::Id.is_in(enrollments.iter().map(|e| e.student_id)))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let mut items: Vec<EnrollmentResponse> = enrollments
            .into_iter()
            .filter_map(|enrollment| {
                let student = students.get(&enrollment.student_id)?;
                Some(EnrollmentResponse {
                    enrollment_id: enrollment.enrollment_id,
                    grade: enrollment.grade,
                    student_id: student.id,
                    name: student.name.clone(),
                    email: student.email.clone(),
                    course_id: context.course.course_id.clone(),
                    title: context.course.title.clone(),
                    section_id: context.section.section_id,
                    section_no: context.section.section_no,
                    building: context.section.building.clone(),
                    room: context.section.room.clone(),
                    times: context.section.times.clone(),
                    credits: context.course.credits,
                    year: context.term.year,
                    semester: context.term.semester.clone(),
                })
            })
            .collect();

        // 稳定排序，同名学生保持选课顺序
        items.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(items)
    }

    /// 在同一事务中更新最终成绩
    pub async fn update_enrollment_grades_impl(
        &self,
        updates: &[UpdateEnrollmentGrade],
    ) -> Result<()> {
        if updates.is_empty() {
            return Ok(());
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::database_operation(format!("开启事务失败: {e}")))?;

        for update in updates {
            Enrollments::update_many()
                .col_expr(Column::Grade, Expr::value(update.grade.clone()))
                .filter(Column::EnrollmentId.eq(update.enrollment_id))
                .exec(&txn)
                .await
                .map_err(|e| GradebookError::database_operation(format!("更新最终成绩失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| GradebookError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(())
    }
}

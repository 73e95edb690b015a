//! 作业存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::sections::{Column as SectionColumn, Entity as Sections};
use crate::entity::terms::{Column as TermColumn, Entity as Terms};
use crate::errors::{GradebookError, Result};
use crate::models::assignments::{
    entities::Assignment, responses::StudentAssignmentResponse,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 列出教学班的作业
    pub async fn list_assignments_by_section_impl(
        &self,
        section_no: i64,
    ) -> Result<Vec<Assignment>> {
        let assignments = Assignments::find()
            .filter(Column::SectionNo.eq(section_no))
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::AssignmentId)
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(assignments
            .into_iter()
            .map(|m| m.into_assignment())
            .collect())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 批量获取作业
    pub async fn get_assignments_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Assignment>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let assignments = Assignments::find()
            .filter(Column::AssignmentId.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(assignments
            .into_iter()
            .map(|m| m.into_assignment())
            .collect())
    }

    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        section_no: i64,
        title: String,
        due_date: NaiveDate,
    ) -> Result<Assignment> {
        let model = ActiveModel {
            title: Set(title),
            due_date: Set(due_date),
            section_no: Set(section_no),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 更新作业，due_date 为空时保留原值
    pub async fn update_assignment_impl(
        &self,
        id: i64,
        title: String,
        due_date: Option<NaiveDate>,
    ) -> Result<Option<Assignment>> {
        // 先检查作业是否存在
        let existing = self.get_assignment_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            assignment_id: Set(id),
            title: Set(title),
            ..Default::default()
        };

        if let Some(due_date) = due_date {
            model.due_date = Set(due_date);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("更新作业失败: {e}")))?;

        Ok(Some(updated.into_assignment()))
    }

    /// 删除作业，成绩在同一事务中删除
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::database_operation(format!("开启事务失败: {e}")))?;

        Grades::delete_many()
            .filter(GradeColumn::AssignmentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| GradebookError::database_operation(format!("删除作业成绩失败: {e}")))?;

        let result = Assignments::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| GradebookError::database_operation(format!("删除作业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| GradebookError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出学生在指定学期所选教学班的作业及得分
    pub async fn list_student_assignments_impl(
        &self,
        student_id: i64,
        year: i32,
        semester: &str,
    ) -> Result<Vec<StudentAssignmentResponse>> {
        let enrollments = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询选课记录失败: {e}")))?;

        if enrollments.is_empty() {
            return Ok(Vec::new());
        }

        let term_ids: Vec<i64> = Terms::find()
            .filter(TermColumn::Year.eq(year))
            .filter(TermColumn::Semester.eq(semester))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询学期失败: {e}")))?
            .into_iter()
            .map(|t| t.id)
            .collect();

        if term_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sections: HashMap<i64, _> = Sections::find()
            .filter(SectionColumn::SectionNo.is_in(enrollments.iter().map(|e| e.section_no)))
            .filter(SectionColumn::TermId.is_in(term_ids))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询教学班失败: {e}")))?
            .into_iter()
            .map(|s| (s.section_no, s))
            .collect();

        if sections.is_empty() {
            return Ok(Vec::new());
        }

        let assignments = Assignments::find()
            .filter(Column::SectionNo.is_in(sections.keys().copied()))
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::AssignmentId)
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询作业列表失败: {e}")))?;

        if assignments.is_empty() {
            return Ok(Vec::new());
        }

        // 只取该学生自己的成绩
        let enrollment_ids: Vec<i64> = enrollments
            .iter()
            .filter(|e| sections.contains_key(&e.section_no))
            .map(|e| e.enrollment_id)
            .collect();

        let scores: HashMap<i64, Option<i32>> = Grades::find()
            .filter(GradeColumn::AssignmentId.is_in(assignments.iter().map(|a| a.assignment_id)))
            .filter(GradeColumn::EnrollmentId.is_in(enrollment_ids))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询成绩失败: {e}")))?
            .into_iter()
            .map(|g| (g.assignment_id, g.score))
            .collect();

        let items = assignments
            .into_iter()
            .filter_map(|assignment| {
                let section = sections.get(&assignment.section_no)?;
                Some(StudentAssignmentResponse {
                    score: scores.get(&assignment.assignment_id).copied().flatten(),
                    assignment_id: assignment.assignment_id,
                    title: assignment.title,
                    due_date: assignment.due_date,
                    course_id: section.course_id.clone(),
                    section_id: section.section_id,
                })
            })
            .collect();

        Ok(items)
    }
}

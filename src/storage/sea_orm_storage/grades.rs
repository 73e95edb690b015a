//! 成绩存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::assignments::Entity as Assignments;
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{GradebookError, Result};
use crate::models::grades::{
    entities::Grade, requests::UpdateGradeScore, responses::GradeResponse,
};
use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
    sea_query::{Expr, OnConflict},
};

impl SeaOrmStorage {
    /// 列出作业成绩，缺失的成绩行以空分数创建
    pub async fn list_assignment_grades_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<GradeResponse>> {
        let Some(assignment) = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询作业失败: {e}")))?
        else {
            return Ok(Vec::new());
        };

        let Some(context) = self.get_section_context_impl(assignment.section_no).await? else {
            return Ok(Vec::new());
        };

        let enrollments = Enrollments::find()
            .filter(EnrollmentColumn::SectionNo.eq(assignment.section_no))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询选课记录失败: {e}")))?;

        if enrollments.is_empty() {
            return Ok(Vec::new());
        }

        self.ensure_grade_rows(
            assignment_id,
            enrollments.iter().map(|e| e.enrollment_id).collect(),
        )
        .await?;

        let grades: HashMap<i64, _> = Grades::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询成绩失败: {e}")))?
            .into_iter()
            .map(|g| (g.enrollment_id, g))
            .collect();

        let students: HashMap<i64, _> = Users::find()
            .filter(UserColumn::Id.is_in(enrollments.iter().map(|e| e.student_id)))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let mut items: Vec<GradeResponse> = enrollments
            .iter()
            .filter_map(|enrollment| {
                let grade = grades.get(&enrollment.enrollment_id)?;
                let student = students.get(&enrollment.student_id)?;
                Some(GradeResponse {
                    grade_id: grade.grade_id,
                    student_name: student.name.clone(),
                    student_email: student.email.clone(),
                    assignment_title: assignment.title.clone(),
                    course_id: context.course.course_id.clone(),
                    section_id: context.section.section_id,
                    score: grade.score,
                })
            })
            .collect();

        items.sort_by(|a, b| {
            a.student_name
                .cmp(&b.student_name)
                .then(a.grade_id.cmp(&b.grade_id))
        });

        Ok(items)
    }

    /// 为缺少成绩行的选课记录补建成绩行
    ///
    /// 依赖 (assignment_id, enrollment_id) 唯一索引，并发请求不会产生重复行。
    async fn ensure_grade_rows(
        &self,
        assignment_id: i64,
        enrollment_ids: Vec<i64>,
    ) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::database_operation(format!("开启事务失败: {e}")))?;

        let existing: HashSet<i64> = Grades::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::EnrollmentId.is_in(enrollment_ids.iter().copied()))
            .all(&txn)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询成绩失败: {e}")))?
            .into_iter()
            .map(|g| g.enrollment_id)
            .collect();

        for enrollment_id in enrollment_ids.into_iter().filter(|id| !existing.contains(id)) {
            let model = ActiveModel {
                score: Set(None),
                assignment_id: Set(assignment_id),
                enrollment_id: Set(enrollment_id),
                ..Default::default()
            };

            Grades::insert(model)
                .on_conflict(
                    OnConflict::columns([Column::AssignmentId, Column::EnrollmentId])
                        .do_nothing()
                        .to_owned(),
                )
                .do_nothing()
                .exec(&txn)
                .await
                .map_err(|e| GradebookError::database_operation(format!("创建成绩失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| GradebookError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(())
    }

    /// 批量获取成绩
    pub async fn get_grades_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Grade>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let grades = Grades::find()
            .filter(Column::GradeId.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }

    /// 在同一事务中更新分数
    pub async fn update_grade_scores_impl(&self, updates: &[UpdateGradeScore]) -> Result<()> {
        if updates.is_empty() {
            return Ok(());
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::database_operation(format!("开启事务失败: {e}")))?;

        for update in updates {
            Grades::update_many()
                .col_expr(Column::Score, Expr::value(update.score))
                .filter(Column::GradeId.eq(update.grade_id))
                .exec(&txn)
                .await
                .map_err(|e| GradebookError::database_operation(format!("更新分数失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| GradebookError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(())
    }
}

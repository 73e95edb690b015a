//! 教学班存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::sections::{ActiveModel, Column, Entity as Sections};
use crate::entity::terms::{Column as TermColumn, Entity as Terms};
use crate::errors::{GradebookError, Result};
use crate::models::sections::{
    entities::{Section, SectionContext},
    requests::CreateSectionRequest,
    responses::SectionResponse,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建教学班
    pub async fn create_section_impl(&self, req: CreateSectionRequest) -> Result<Section> {
        let model = ActiveModel {
            course_id: Set(req.course_id),
            term_id: Set(req.term_id),
            section_id: Set(req.section_id),
            building: Set(req.building),
            room: Set(req.room),
            times: Set(req.times),
            instructor_email: Set(req.instructor_email),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("创建教学班失败: {e}")))?;

        Ok(result.into_section())
    }

    /// 获取教学班及其学期、课程
    pub async fn get_section_context_impl(
        &self,
        section_no: i64,
    ) -> Result<Option<SectionContext>> {
        let Some(section) = Sections::find_by_id(section_no)
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询教学班失败: {e}")))?
        else {
            return Ok(None);
        };

        let term = Terms::find_by_id(section.term_id)
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询学期失败: {e}")))?
            .ok_or_else(|| {
                GradebookError::not_found(format!("教学班 {section_no} 的学期不存在"))
            })?;

        let course = Courses::find_by_id(section.course_id.clone())
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询课程失败: {e}")))?
            .ok_or_else(|| {
                GradebookError::not_found(format!("教学班 {section_no} 的课程不存在"))
            })?;

        Ok(Some(SectionContext {
            section: section.into_section(),
            term: term.into_term(),
            course: course.into_course(),
        }))
    }

    /// 批量获取教学班
    pub async fn get_sections_by_nos_impl(&self, section_nos: &[i64]) -> Result<Vec<Section>> {
        if section_nos.is_empty() {
            return Ok(Vec::new());
        }

        let sections = Sections::find()
            .filter(Column::SectionNo.is_in(section_nos.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询教学班失败: {e}")))?;

        Ok(sections.into_iter().map(|m| m.into_section()).collect())
    }

    /// 列出教师在指定学期任教的教学班
    pub async fn list_instructor_sections_impl(
        &self,
        instructor_email: &str,
        year: i32,
        semester: &str,
    ) -> Result<Vec<SectionResponse>> {
        let terms: HashMap<i64, _> = Terms::find()
            .filter(TermColumn::Year.eq(year))
            .filter(TermColumn::Semester.eq(semester))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询学期失败: {e}")))?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let sections = Sections::find()
            .filter(Column::InstructorEmail.eq(instructor_email))
            .filter(Column::TermId.is_in(terms.keys().copied()))
            .order_by_asc(Column::SectionNo)
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询教学班失败: {e}")))?;

        if sections.is_empty() {
            return Ok(Vec::new());
        }

        let courses: HashMap<String, _> = Courses::find()
            .filter(CourseColumn::CourseId.is_in(sections.iter().map(|s| s.course_id.clone())))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询课程失败: {e}")))?
            .into_iter()
            .map(|c| (c.course_id.clone(), c))
            .collect();

        let instructor_name = self
            .get_user_by_email_impl(instructor_email)
            .await?
            .map(|u| u.name)
            .unwrap_or_default();

        let items = sections
            .into_iter()
            .filter_map(|section| {
                let term = terms.get(&section.term_id)?;
                let course = courses.get(&section.course_id)?;
                Some(SectionResponse {
                    sec_no: section.section_no,
                    year: term.year,
                    semester: term.semester.clone(),
                    course_id: section.course_id,
                    title: course.title.clone(),
                    sec_id: section.section_id,
                    building: section.building,
                    room: section.room,
                    times: section.times,
                    instructor_name: instructor_name.clone(),
                    instructor_email: section.instructor_email,
                })
            })
            .collect();

        Ok(items)
    }
}

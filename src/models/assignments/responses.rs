use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Assignment;
use crate::models::sections::entities::SectionContext;

// 教师视角的作业信息，同时作为 registrar 消息的负载
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentResponse {
    pub id: i64,
    pub title: String,
    pub due_date: NaiveDate,
    pub course_id: String,
    pub sec_id: i32,
    pub sec_no: i64,
}

impl AssignmentResponse {
    pub fn from_parts(assignment: Assignment, context: &SectionContext) -> Self {
        Self {
            id: assignment.id,
            title: assignment.title,
            due_date: assignment.due_date,
            course_id: context.course.course_id.clone(),
            sec_id: context.section.section_id,
            sec_no: assignment.section_no,
        }
    }
}

// 学生视角的作业及得分
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "assignment.ts")]
pub struct StudentAssignmentResponse {
    pub assignment_id: i64,
    pub title: String,
    pub due_date: NaiveDate,
    pub course_id: String,
    pub section_id: i32,
    pub score: Option<i32>,
}

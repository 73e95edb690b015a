use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业成绩列表中的一项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "grade.ts")]
pub struct GradeResponse {
    pub grade_id: i64,
    pub student_name: String,
    pub student_email: String,
    pub assignment_title: String,
    pub course_id: String,
    pub section_id: i32,
    pub score: Option<i32>,
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教学班选课名单中的一项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "enrollment.ts")]
pub struct EnrollmentResponse {
    pub enrollment_id: i64,
    pub grade: Option<String>,
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub course_id: String,
    pub title: String,
    pub section_id: i32,
    pub section_no: i64,
    pub building: String,
    pub room: String,
    pub times: String,
    pub credits: i32,
    pub year: i32,
    pub semester: String,
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师视角的教学班信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "section.ts")]
pub struct SectionResponse {
    pub sec_no: i64,
    pub year: i32,
    pub semester: String,
    pub course_id: String,
    pub title: String,
    pub sec_id: i32,
    pub building: String,
    pub room: String,
    pub times: String,
    pub instructor_name: String,
    pub instructor_email: String,
}

use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

// 按学年与学期查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "section.ts")]
pub struct TermQuery {
    pub year: i32,
    pub semester: String,
}

#[derive(Debug, Clone)]
pub struct CreateTermRequest {
    pub year: i32,
    pub semester: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct CreateCourseRequest {
    pub course_id: String,
    pub title: String,
    pub credits: i32,
}

#[derive(Debug, Clone)]
pub struct CreateSectionRequest {
    pub course_id: String,
    pub term_id: i64,
    pub section_id: i32,
    pub building: String,
    pub room: String,
    pub times: String,
    pub instructor_email: String,
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// 学期
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: i64,
    pub year: i32,
    pub semester: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Term {
    /// 日期是否落在学期的起止日期之间（含两端）
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

// 课程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_id: String,
    pub title: String,
    pub credits: i32,
}

// 教学班
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub section_no: i64,
    pub course_id: String,
    pub term_id: i64,
    pub section_id: i32,
    pub building: String,
    pub room: String,
    pub times: String,
    pub instructor_email: String,
}

impl Section {
    pub fn is_taught_by(&self, email: &str) -> bool {
        self.instructor_email == email
    }
}

/// 教学班及其所属学期、课程
#[derive(Debug, Clone)]
pub struct SectionContext {
    pub section: Section,
    pub term: Term,
    pub course: Course,
}

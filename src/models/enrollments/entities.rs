use serde::{Deserialize, Serialize};

// 选课记录，grade 为课程最终成绩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub enrollment_id: i64,
    pub grade: Option<String>,
    pub student_id: i64,
    pub section_no: i64,
}

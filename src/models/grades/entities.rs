use serde::{Deserialize, Serialize};

// 单次作业成绩，score 为空表示尚未评分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub grade_id: i64,
    pub score: Option<i32>,
    pub assignment_id: i64,
    pub enrollment_id: i64,
}

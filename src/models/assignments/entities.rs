use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// 作业实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub due_date: NaiveDate,
    pub section_no: i64,
}

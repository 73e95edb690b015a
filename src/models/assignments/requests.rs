use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

// 创建作业请求
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "assignment.ts")]
pub struct CreateAssignmentRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub sec_no: i64,
}

// 更新作业请求，due_date 为空时保留原截止日期
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub sec_no: i64,
}

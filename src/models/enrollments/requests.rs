use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 批量更新最终成绩的单项，同时作为 updateEnrollment 消息的负载
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "enrollment.ts")]
pub struct UpdateEnrollmentGrade {
    pub enrollment_id: i64,
    #[serde(default)]
    pub grade: Option<String>,
}

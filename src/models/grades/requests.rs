use serde::Deserialize;
use ts_rs::TS;

// 批量更新作业分数的单项
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "grade.ts")]
pub struct UpdateGradeScore {
    pub grade_id: i64,
    #[serde(default)]
    pub score: Option<i32>,
}

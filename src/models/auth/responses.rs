use serde::Serialize;
use ts_rs::TS;

use crate::models::users::entities::UserRole;

// 登录响应
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "auth.ts")]
pub struct LoginResponse {
    pub jwt: String,
    pub role: UserRole,
    pub name: String,
    pub email: String,
    /// 有效期（秒）
    pub expires_in: i64,
}

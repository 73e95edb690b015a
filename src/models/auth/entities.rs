use serde::{Deserialize, Serialize};

use crate::models::users::entities::{User, UserRole};

/// 已认证的调用者，由 RequireJWT 写入请求扩展
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

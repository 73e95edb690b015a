use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "user.ts")]
pub enum UserRole {
    Instructor, // 教师
    Student,    // 学生
}

impl UserRole {
    pub const INSTRUCTOR: &'static str = "INSTRUCTOR";
    pub const STUDENT: &'static str = "STUDENT";

    /// 令牌中携带的角色声明
    pub fn claim(&self) -> &'static str {
        match self {
            UserRole::Instructor => "ROLE_INSTRUCTOR",
            UserRole::Student => "ROLE_STUDENT",
        }
    }

    pub fn from_claim(claim: &str) -> Option<Self> {
        claim
            .strip_prefix("ROLE_")
            .and_then(|role| role.parse::<UserRole>().ok())
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: INSTRUCTOR, STUDENT"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Instructor => write!(f, "{}", UserRole::INSTRUCTOR),
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            UserRole::INSTRUCTOR => Ok(UserRole::Instructor),
            UserRole::STUDENT => Ok(UserRole::Student),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_claim() {
        assert_eq!(UserRole::Instructor.claim(), "ROLE_INSTRUCTOR");
        assert_eq!(
            UserRole::from_claim("ROLE_STUDENT"),
            Some(UserRole::Student)
        );
        assert_eq!(UserRole::from_claim("STUDENT"), None);
        assert_eq!(UserRole::from_claim("ROLE_ADMIN"), None);
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("instructor".parse::<UserRole>(), Ok(UserRole::Instructor));
        assert_eq!(UserRole::Student.to_string(), "STUDENT");
        assert!("teacher".parse::<UserRole>().is_err());
    }
}

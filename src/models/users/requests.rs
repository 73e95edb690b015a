use super::entities::UserRole;

// 创建用户（种子数据与测试夹具使用），password 为已哈希的值
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

use serde::Serialize;

/// 业务错误码，随响应体中的 `code` 字段返回
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,

    // 认证
    AuthFailed = 2000,
    UserEmailInvalid = 2001,

    // 教学班
    SectionNotFound = 3000,
    SectionPermissionDenied = 3001,

    // 作业
    AssignmentNotFound = 4000,
    AssignmentTitleInvalid = 4001,
    AssignmentDueDateInvalid = 4002,

    // 选课
    EnrollmentNotFound = 5000,

    // 成绩
    GradeNotFound = 6000,
    GradeScoreInvalid = 6001,
}

pub mod access;
pub mod assignments;
pub mod auth;
pub mod enrollments;
pub mod grades;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use enrollments::EnrollmentService;
pub use grades::GradeService;

pub mod auth;

pub mod sections;

pub mod assignments;

pub mod enrollments;

pub mod grades;

pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use enrollments::configure_enrollments_routes;
pub use grades::configure_grades_routes;
pub use sections::configure_sections_routes;

//! Service layer for business logic.
//!
//! Services own the rules: existence and uniqueness checks, the enrollment and grade engines,
//! cascade deletes and bulk imports. They run check-then-act sequences inside a database
//! transaction and emit notifications only after commit.

pub mod assignment;
pub mod course;
pub mod enrollment;
pub mod grade;
pub mod import;
pub mod material;
pub mod notification;
pub mod student;
pub mod system;
pub mod teacher;
pub mod user;

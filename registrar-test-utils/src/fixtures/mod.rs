//! Fixture helpers attached to [`TestContext`](crate::TestContext).
//!
//! - `people` - users plus their student or teacher profiles
//! - `academic` - courses, enrollments, grades, assignments, submissions, notifications

pub mod academic;
pub mod people;

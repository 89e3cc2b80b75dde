//! Test harness shared by the registrar unit and integration tests.
//!
//! Tests are set up in two phases: a [`TestBuilder`] declares which tables exist, then the
//! returned [`TestContext`] exposes fixture helpers (`people()`, `academic()`) for inserting
//! rows while the test runs.

pub mod builder;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{TestBuilder, TestContext, TestError};
}

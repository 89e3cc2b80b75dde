//! Tests for the business engines.
//!
//! Each engine is driven directly against an in-memory database built with the academic
//! schema, checking the rules, error precedence and side effects (notifications, cascades)
//! that the HTTP layer relies on.

mod assignment;
mod cascade;
mod enrollment;
mod grade;
mod import;
mod notification;
mod system;
mod user;

use registrar_test_utils::prelude::*;

use crate::util::domain_error;

//! Helpers shared by the services.
//!
//! - `schedule` - weekday extraction and naive schedule conflict detection
//! - `grading` - letter grades and course statistics
//! - `password` - argon2 hashing and verification
//! - `storage` - the upload directory and best-effort file removal

pub mod grading;
pub mod password;
pub mod schedule;
pub mod storage;

//! Server-side state shared by handlers.

pub mod app;
pub mod principal;

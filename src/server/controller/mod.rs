//! HTTP controller endpoints for the registrar API.
//!
//! Handlers resolve the caller through the [`Principal`](crate::server::model::principal::Principal)
//! extractor, check the role tier the route needs, call a service and render its result as
//! JSON. Every handler carries a utoipa annotation collected by the router.

pub mod admin;
pub mod assignment;
pub mod auth;
pub mod course;
pub mod enrollment;
pub mod grade;
pub mod material;
pub mod notification;
pub mod student;
pub mod teacher;
pub mod user;
pub mod util;

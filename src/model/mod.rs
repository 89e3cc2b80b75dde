//! Request and response bodies of the REST API.

pub mod api;
pub mod assignment;
pub mod auth;
pub mod course;
pub mod enrollment;
pub mod grade;
pub mod material;
pub mod notification;
pub mod student;
pub mod system;
pub mod teacher;
pub mod user;

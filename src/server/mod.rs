//! Server application core modules.
//!
//! Everything behind the REST API lives here: configuration and startup, the error taxonomy,
//! repositories over the sea-orm entities, the enrollment and grade engines along with the
//! thinner CRUD services, axum controllers and the route table.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;

//! Request helpers shared by controllers.

pub mod form;
pub mod principal;

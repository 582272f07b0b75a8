//! Configuration, errors and project loading

pub mod config;
pub mod error;
pub mod project;

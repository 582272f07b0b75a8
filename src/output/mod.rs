//! Output writers for the generated index

pub mod json;
pub mod markdown;

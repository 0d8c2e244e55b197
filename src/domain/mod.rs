//! Domain values shared by the admission pipeline.

pub mod course;
pub mod field;
pub mod profile;
pub mod settings;
pub mod submission;
pub mod types;

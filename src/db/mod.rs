//! Flat-file persistence for product catalogs
pub mod json_file;

pub use json_file::{load_file, write_export};

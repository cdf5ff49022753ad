pub mod catalog;
pub mod export;
pub mod ingest;
pub mod providers;
pub mod recommendations;
pub mod report;
pub mod scoring;

pub use catalog::ProductCatalog;
pub use recommendations::recommend;

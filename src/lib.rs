// Core modules
pub mod config;
pub mod error;
pub mod indicators;
pub mod ingest;
pub mod models;
pub mod report;
pub mod signals;
pub mod synthetic;
pub mod validation;

// Re-export commonly used types
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use ingest::{AnalysisDocument, StockDataFile};
pub use models::*;
pub use report::{analyze, AnalysisReport};

// Error handling
pub type Result<T> = std::result::Result<T, AnalysisError>;

pub mod analysis;
pub mod benchmark;
pub mod config;
pub mod diagnosis;
pub mod error;
pub mod financials;
pub mod health_score;
pub mod insights;
pub mod kpi;
pub mod report;
pub mod types;

pub use analysis::{analyze, analyze_default, AnalysisInput, AnalysisReport};
pub use config::AnalysisConfig;
pub use error::AutoDdError;
pub use types::*;

/// Standard result type for all autodd operations
pub type AutoDdResult<T> = Result<T, AutoDdError>;

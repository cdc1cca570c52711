//! Geointel - geospatial intelligence briefings
//!
//! Holds a table of intelligence points and movement routes, filters them by
//! layer and search term, and asks a generative model for a strategic
//! synthesis, mission projections and SDRGA withdrawal alerts. Every model
//! call has a fixed fallback, so a failed call never surfaces as an error.

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod intel;
pub mod llm;
pub mod logging;
pub mod model;
pub mod output;

// Re-export main types
pub use config::Config;
pub use dashboard::Dashboard;
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use intel::Analyst;
pub use llm::{GeminiClient, Generator, OfflineGenerator};
pub use model::{IntelligenceLayer, IntelligencePoint, MovementRoute, PredictionPoint, SdrgaAlert};

//! kokoro - Mood analysis backend
//!
//! A mental-wellness analysis service: journal text goes in, a mood score
//! on a 0-10 scale, a crisis risk assessment and longitudinal insights
//! come out.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Core data structures and types
//! - [`scoring`] - Mood score computation from sentiment and emotions
//! - [`crisis`] - Crisis keyword detection and support resources
//! - [`analytics`] - Pattern summaries and mood forecasting
//! - [`inference`] - HTTP client for the sentiment/emotion backend
//! - [`llm`] - Optional LLM annotations (attach-only)
//! - [`recommend`] - Rule-based recommendations
//! - [`storage`] - Mood entry persistence (SQLite, in-memory)
//! - [`engine`] - Orchestration of a full analysis
//! - [`server`] - Axum HTTP API
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use kokoro::config::Config;
//! use kokoro::engine::MoodAnalyzer;
//! use kokoro::inference::HttpInferenceClient;
//! use kokoro::storage::SqliteMoodRepository;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let inference = Arc::new(HttpInferenceClient::new(config.inference.clone())?);
//!     let repository = Arc::new(SqliteMoodRepository::new(&config.database.sqlite_path)?);
//!     let analyzer = MoodAnalyzer::new(
//!         inference.clone(),
//!         inference,
//!         repository,
//!         None,
//!         config.analysis.clone(),
//!     );
//!     // analyzer.analyze(...).await?;
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod config;
pub mod crisis;
pub mod engine;
pub mod error;
pub mod inference;
pub mod llm;
pub mod metrics;
pub mod models;
pub mod recommend;
pub mod scoring;
pub mod server;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::engine::{AnalysisOutcome, AnalyzeRequest, MoodAnalyzer};
    pub use crate::error::{Error, ErrorCategory, KokoroErrorTrait, Result};
    pub use crate::models::{
        CrisisAssessment, MoodEntry, MoodForecast, PatternSummary, RiskLevel, Trend,
    };
    pub use crate::storage::{MoodRepository, SqliteMoodRepository};
}

// Direct re-exports for convenience
pub use models::{CrisisAssessment, MoodEntry, PatternSummary, RiskLevel, Trend};

//! History aggregation: pattern summaries and forecasting
//!
//! Everything here is pure over a slice of entries; loading the window
//! is the caller's job.

pub mod forecast;
pub mod patterns;

pub use forecast::{forecast, FORECAST_DAYS, FORECAST_MIN_ENTRIES};
pub use patterns::{summarize, trend_of, TOP_EMOTION_LIMIT, TREND_THRESHOLD};

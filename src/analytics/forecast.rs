//! Mood trend forecasting by least-squares slope

use chrono::{DateTime, Duration, Utc};
use statrs::statistics::Statistics;

use crate::models::{ForecastPoint, MoodEntry, MoodForecast, Trend};
use crate::scoring::clamp_score;

/// Entries required before a forecast is attempted
pub const FORECAST_MIN_ENTRIES: usize = 7;

/// Scores considered for the regression, most recent N
pub const FORECAST_WINDOW: usize = 7;

/// Days projected forward
pub const FORECAST_DAYS: u8 = 7;

/// Slope magnitude below which the forecast reads as stable
const SLOPE_FLAT: f64 = 0.1;

/// Forecast the next week of mood from recent entries.
///
/// Entries must be in ascending `recorded_at` order. Fewer than
/// [`FORECAST_MIN_ENTRIES`] entries yields [`MoodForecast::insufficient`].
pub fn forecast(entries: &[MoodEntry], now: DateTime<Utc>) -> MoodForecast {
    if entries.len() < FORECAST_MIN_ENTRIES {
        return MoodForecast::insufficient();
    }

    let start = entries.len().saturating_sub(FORECAST_WINDOW);
    let scores: Vec<f64> = entries[start..].iter().map(|e| e.mood_score).collect();

    let slope = least_squares_slope(&scores);
    let last = scores.last().copied().unwrap_or(0.0);

    let prediction = if slope > SLOPE_FLAT {
        Trend::Improving
    } else if slope < -SLOPE_FLAT {
        Trend::Declining
    } else {
        Trend::Stable
    };

    let daily = (1..=FORECAST_DAYS)
        .map(|day| ForecastPoint {
            day,
            predicted_mood: clamp_score(last + slope * day as f64),
            date: now + Duration::days(day as i64),
        })
        .collect();

    MoodForecast {
        prediction,
        confidence: (slope.abs() * 10.0).min(0.8),
        daily,
        slope,
    }
}

/// Slope of the least-squares line through (index, score) points
fn least_squares_slope(scores: &[f64]) -> f64 {
    let n = scores.len();
    if n < 2 {
        return 0.0;
    }

    let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let x_mean = xs.iter().copied().mean();
    let y_mean = scores.iter().copied().mean();

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (x, y) in xs.iter().zip(scores) {
        numerator += (x - x_mean) * (y - y_mean);
        denominator += (x - x_mean) * (x - x_mean);
    }

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

//! Common test utilities

use std::collections::HashMap;

use chrono::{Duration, Utc};
use kokoro::models::{MoodEntry, Sentiment, SentimentLabel};

/// Create a neutral test entry for a user
pub fn create_test_entry(user_id: &str, score: f64) -> MoodEntry {
    MoodEntry::new(
        user_id,
        score,
        Sentiment::neutral(),
        HashMap::new(),
        "a quiet day, nothing much happened",
    )
}

/// Create an entry recorded a given number of days in the past
#[allow(dead_code)]
pub fn create_entry_days_ago(user_id: &str, score: f64, days_ago: i64) -> MoodEntry {
    let mut entry = create_test_entry(user_id, score);
    entry.recorded_at = Utc::now() - Duration::days(days_ago);
    entry
}

/// Create an entry with a sentiment label and emotion intensities
#[allow(dead_code)]
pub fn create_entry_with_emotions(
    user_id: &str,
    score: f64,
    label: SentimentLabel,
    emotions: &[(&str, f64)],
) -> MoodEntry {
    MoodEntry::new(
        user_id,
        score,
        Sentiment {
            label,
            confidence: 0.9,
        },
        emotions
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect(),
        "test entry",
    )
}

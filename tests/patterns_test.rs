//! Pattern summary and forecast behavior over realistic histories

mod common;

use chrono::Utc;

use common::{create_entry_days_ago, create_entry_with_emotions};
use kokoro::analytics::{forecast, summarize, FORECAST_DAYS, TOP_EMOTION_LIMIT};
use kokoro::models::{MoodEntry, SentimentLabel, Trend};

fn week_of_scores(scores: &[f64]) -> Vec<MoodEntry> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| {
            create_entry_days_ago("user-1", score, (scores.len() - 1 - i) as i64)
        })
        .collect()
}

#[test]
fn empty_history_yields_sentinel_summary() {
    let summary = summarize(&[]);
    assert!(summary.is_empty());
    assert_eq!(summary.average_mood, None);
    assert_eq!(summary.trend, Trend::InsufficientData);
    assert!(summary.mood_range.is_none());
}

#[test]
fn recovery_week_reads_as_improving() {
    let entries = week_of_scores(&[3.0, 3.5, 4.0, 5.5, 6.0, 6.5, 7.0]);
    let summary = summarize(&entries);

    assert_eq!(summary.trend, Trend::Improving);
    assert_eq!(summary.entry_count, 7);
    let range = summary.mood_range.unwrap();
    assert_eq!(range.min, 3.0);
    assert_eq!(range.max, 7.0);
}

#[test]
fn rough_week_reads_as_declining() {
    let entries = week_of_scores(&[8.0, 7.0, 6.5, 5.0, 4.0, 3.5, 3.0]);
    assert_eq!(summarize(&entries).trend, Trend::Declining);
}

#[test]
fn flat_week_reads_as_stable() {
    let entries = week_of_scores(&[5.0, 5.2, 5.1, 5.0, 4.9, 5.1, 5.0]);
    assert_eq!(summarize(&entries).trend, Trend::Stable);
}

#[test]
fn emotion_ranking_is_capped_and_intensity_first() {
    let mut entries = Vec::new();
    for _ in 0..3 {
        entries.push(create_entry_with_emotions(
            "user-1",
            6.0,
            SentimentLabel::Positive,
            &[("joy", 0.7), ("calm", 0.5)],
        ));
    }
    entries.push(create_entry_with_emotions(
        "user-1",
        4.0,
        SentimentLabel::Negative,
        &[
            ("sadness", 0.6),
            ("fear", 0.3),
            ("anger", 0.2),
            ("disgust", 0.1),
            ("boredom", 0.4),
        ],
    ));

    let summary = summarize(&entries);
    assert!(summary.top_emotions.len() <= TOP_EMOTION_LIMIT);
    assert_eq!(summary.top_emotions[0].name, "joy");
}

#[test]
fn forecast_needs_a_week_of_data() {
    let entries = week_of_scores(&[5.0, 6.0]);
    let result = forecast(&entries, Utc::now());
    assert_eq!(result.prediction, Trend::InsufficientData);
    assert!(result.daily.is_empty());
}

#[test]
fn forecast_projects_a_full_week_on_scale() {
    let entries = week_of_scores(&[4.0, 4.5, 5.0, 5.5, 6.0, 6.5, 7.0]);
    let result = forecast(&entries, Utc::now());

    assert_eq!(result.prediction, Trend::Improving);
    assert_eq!(result.daily.len(), FORECAST_DAYS as usize);
    for point in &result.daily {
        assert!((0.0..=10.0).contains(&point.predicted_mood));
    }
    assert!(result.confidence > 0.0);
    assert!(result.confidence <= 0.8);
}

#[test]
fn steady_history_forecasts_stable() {
    let entries = week_of_scores(&[6.0, 6.0, 6.1, 5.9, 6.0, 6.0, 6.0]);
    let result = forecast(&entries, Utc::now());
    assert_eq!(result.prediction, Trend::Stable);
}

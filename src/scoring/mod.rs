//! Mood scoring from sentiment and emotion readings
//!
//! The scorer is a pure function: start from the neutral baseline, add
//! weighted positive-emotion contributions, subtract weighted negative
//! ones, shift by sentiment polarity, clamp to the mood scale. An
//! external expression reading (e.g. a face scan), when supplied,
//! overrides the text-derived score outright instead of blending.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Sentiment, SentimentLabel, MOOD_BASELINE, MOOD_MAX, MOOD_MIN};

/// Weight applied to the sentiment confidence
pub const SENTIMENT_WEIGHT: f64 = 3.0;

/// Weight applied to each emotion intensity
pub const EMOTION_WEIGHT: f64 = 3.0;

/// Emotion names that pull the score up
pub const POSITIVE_EMOTIONS: &[&str] = &[
    "joy",
    "happy",
    "happiness",
    "love",
    "optimism",
    "pride",
    "amusement",
    "gratitude",
];

/// Emotion names that pull the score down
pub const NEGATIVE_EMOTIONS: &[&str] = &[
    "sadness",
    "sad",
    "anger",
    "angry",
    "fear",
    "anxiety",
    "disgust",
    "disappointment",
    "grief",
];

/// Which input the final score came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    Text,
    Expression,
}

/// Compute a mood score in [0, 10] from a sentiment reading and an
/// emotion intensity mapping.
///
/// A missing sentiment contributes nothing (neutral baseline). Unknown
/// emotion names contribute nothing. Non-finite intensities are ignored
/// and finite ones are clamped into [0, 1] before weighting, so a
/// malformed mapping degrades to an empty one.
pub fn mood_score(sentiment: Option<&Sentiment>, emotions: &HashMap<String, f64>) -> f64 {
    let mut score = MOOD_BASELINE;

    if let Some(sentiment) = sentiment {
        let confidence = if sentiment.confidence.is_finite() {
            sentiment.confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        match sentiment.label {
            SentimentLabel::Positive => score += confidence * SENTIMENT_WEIGHT,
            SentimentLabel::Negative => score -= confidence * SENTIMENT_WEIGHT,
            SentimentLabel::Neutral => {}
        }
    }

    for (name, intensity) in emotions {
        if !intensity.is_finite() {
            continue;
        }
        let intensity = intensity.clamp(0.0, 1.0);
        let name = name.to_lowercase();
        if POSITIVE_EMOTIONS.contains(&name.as_str()) {
            score += intensity * EMOTION_WEIGHT;
        } else if NEGATIVE_EMOTIONS.contains(&name.as_str()) {
            score -= intensity * EMOTION_WEIGHT;
        }
    }

    clamp_score(score)
}

/// Clamp a score to the mood scale; non-finite values become the baseline
pub fn clamp_score(score: f64) -> f64 {
    if !score.is_finite() {
        return MOOD_BASELINE;
    }
    score.clamp(MOOD_MIN, MOOD_MAX)
}

/// Resolve the final score given an optional external expression reading.
///
/// The external reading overrides the text-derived score outright; this
/// mirrors how a live face scan takes precedence over typed text.
pub fn resolve_score(text_score: f64, expression_score: Option<f64>) -> (f64, ScoreSource) {
    match expression_score {
        Some(external) => (clamp_score(external), ScoreSource::Expression),
        None => (clamp_score(text_score), ScoreSource::Text),
    }
}

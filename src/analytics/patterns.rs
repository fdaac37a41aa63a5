//! Pattern summarization over a window of mood entries

use std::collections::HashMap;

use chrono::Timelike;
use statrs::statistics::Statistics;

use crate::models::{
    EmotionAverage, MoodEntry, MoodRange, PatternSummary, TimeOfDayPattern, Trend,
};

/// Minimum entries before a trend direction is reported
pub const TREND_MIN_ENTRIES: usize = 2;

/// Mean difference between window halves needed to call a direction
pub const TREND_THRESHOLD: f64 = 0.5;

/// Emotions reported in the summary
pub const TOP_EMOTION_LIMIT: usize = 5;

/// Summarize a window of entries into averages, trend and patterns.
///
/// An empty window yields [`PatternSummary::empty`]. Entries are
/// expected in ascending `recorded_at` order.
pub fn summarize(entries: &[MoodEntry]) -> PatternSummary {
    if entries.is_empty() {
        return PatternSummary::empty();
    }

    let scores: Vec<f64> = entries.iter().map(|e| e.mood_score).collect();
    let average = scores.iter().copied().mean();

    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    PatternSummary {
        average_mood: Some(average),
        trend: trend_of(&scores),
        top_emotions: top_emotions(entries),
        entry_count: entries.len(),
        mood_range: Some(MoodRange { min, max }),
        time_of_day: Some(time_of_day(entries)),
    }
}

/// Trend direction from the first half of the window versus the second.
///
/// With an odd count the extra entry goes to the later half, weighting
/// the comparison toward recent state.
pub fn trend_of(scores: &[f64]) -> Trend {
    if scores.len() < TREND_MIN_ENTRIES {
        return Trend::InsufficientData;
    }
    let mid = scores.len() / 2;
    let earlier = scores[..mid].iter().copied().mean();
    let later = scores[mid..].iter().copied().mean();

    let delta = later - earlier;
    if delta > TREND_THRESHOLD {
        Trend::Improving
    } else if delta < -TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// Dominant emotions across the window, ranked by summed intensity and
/// reported as a per-entry average (sum over the whole window divided
/// by the entry count).
fn top_emotions(entries: &[MoodEntry]) -> Vec<EmotionAverage> {
    let mut sums: HashMap<&str, f64> = HashMap::new();
    for entry in entries {
        for (name, intensity) in &entry.emotions {
            *sums.entry(name.as_str()).or_insert(0.0) += intensity;
        }
    }

    let entry_count = entries.len() as f64;
    let mut ranked: Vec<(f64, EmotionAverage)> = sums
        .into_iter()
        .map(|(name, total)| {
            (
                total,
                EmotionAverage {
                    name: name.to_string(),
                    average: total / entry_count,
                },
            )
        })
        .collect();

    // Summed intensity first, name as a deterministic tie-break
    ranked.sort_by(|(ta, a), (tb, b)| tb.total_cmp(ta).then(a.name.cmp(&b.name)));
    ranked
        .into_iter()
        .take(TOP_EMOTION_LIMIT)
        .map(|(_, avg)| avg)
        .collect()
}

/// Average mood by rough time of day: morning [6, 12), afternoon
/// [12, 18), evening otherwise. A bucket with no entries reads 0.0.
fn time_of_day(entries: &[MoodEntry]) -> TimeOfDayPattern {
    let mut buckets: [(f64, usize); 3] = [(0.0, 0); 3];
    for entry in entries {
        let hour = entry.recorded_at.hour();
        let idx = if (6..12).contains(&hour) {
            0
        } else if (12..18).contains(&hour) {
            1
        } else {
            2
        };
        buckets[idx].0 += entry.mood_score;
        buckets[idx].1 += 1;
    }

    let avg = |(total, count): (f64, usize)| {
        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    };

    TimeOfDayPattern {
        morning: avg(buckets[0]),
        afternoon: avg(buckets[1]),
        evening: avg(buckets[2]),
    }
}

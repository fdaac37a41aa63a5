//! Rule-based recommendation engine
//!
//! Maps a pattern summary and the most recent risk level to a ranked
//! list of suggestions. A crisis recommendation suppresses the wellness
//! tier so urgent guidance is never buried under routine tips.

use crate::models::{
    PatternSummary, Recommendation, RecommendationKind, RecommendationPriority, RiskLevel,
    Trend,
};

/// Average mood below which professional support is suggested
const LOW_AVERAGE_THRESHOLD: f64 = 4.0;

/// Average mood at or above which the maintenance tier applies
const HIGH_AVERAGE_THRESHOLD: f64 = 7.0;

/// Suggestions returned at most
const RECOMMENDATION_LIMIT: usize = 5;

fn rule(
    kind: RecommendationKind,
    title: &str,
    description: &str,
    priority: RecommendationPriority,
) -> Recommendation {
    Recommendation {
        kind,
        title: title.to_string(),
        description: description.to_string(),
        priority,
        source: "rules".to_string(),
    }
}

/// Build recommendations from a summary and the latest risk level.
///
/// `risk` comes from the most recent crisis assessment when one exists.
pub fn recommendations(
    summary: &PatternSummary,
    risk: Option<RiskLevel>,
) -> Vec<Recommendation> {
    let mut out = Vec::new();
    let crisis = risk == Some(RiskLevel::High);

    if crisis {
        out.push(Recommendation {
            kind: RecommendationKind::Crisis,
            title: "Reach out for support right now".to_string(),
            description: "Signals in your recent entries suggest you may be in \
                          crisis. Please contact a crisis line or emergency \
                          services; you do not have to handle this alone."
                .to_string(),
            priority: RecommendationPriority::Critical,
            source: "crisis_detection".to_string(),
        });
        out.push(rule(
            RecommendationKind::Professional,
            "Talk to a mental health professional",
            "A counsellor or therapist can help you work through what you're \
             experiencing. Many offer same-week appointments.",
            RecommendationPriority::High,
        ));
    }

    if let Some(average) = summary.average_mood {
        if average < LOW_AVERAGE_THRESHOLD && !crisis {
            out.push(rule(
                RecommendationKind::Urgent,
                "Consider professional support",
                "Your average mood has been low lately. Speaking with a \
                 professional can make a real difference.",
                RecommendationPriority::High,
            ));
        }

        if summary.trend == Trend::Declining && !crisis {
            out.push(rule(
                RecommendationKind::Wellness,
                "Your mood has been trending down",
                "Small routines help reverse a slide: a short daily walk, \
                 regular sleep, or a few minutes of journaling.",
                RecommendationPriority::Medium,
            ));
        }

        if average >= HIGH_AVERAGE_THRESHOLD {
            out.push(rule(
                RecommendationKind::Maintenance,
                "Keep doing what works",
                "Your mood has been consistently good. Note the habits behind \
                 it so you can lean on them in harder weeks.",
                RecommendationPriority::Low,
            ));
        }
    }

    if !crisis {
        match summary.top_emotions.first().map(|e| e.name.as_str()) {
            Some("sadness" | "sad" | "grief") => out.push(rule(
                RecommendationKind::Social,
                "Connect with someone you trust",
                "Sadness shows up often in your entries. Time with a friend or \
                 family member, even briefly, tends to help.",
                RecommendationPriority::Medium,
            )),
            Some("anxiety" | "fear" | "worry") => out.push(rule(
                RecommendationKind::Wellness,
                "Try a short breathing exercise",
                "Anxiety is the emotion your entries mention most. A few \
                 minutes of slow breathing, in for four counts and out for \
                 six, calms the body's stress response.",
                RecommendationPriority::Medium,
            )),
            _ => {}
        }
    }

    if out.is_empty() {
        out.push(rule(
            RecommendationKind::Wellness,
            "Keep checking in",
            "Regular mood entries build the picture that makes insights and \
             forecasts useful. A line or two a day is enough.",
            RecommendationPriority::Low,
        ));
    }

    out.sort_by_key(|r| r.priority);
    out.truncate(RECOMMENDATION_LIMIT);
    out
}

/// Append an LLM-sourced suggestion, keeping the list ordered and capped
pub fn with_llm_suggestion(
    mut recommendations: Vec<Recommendation>,
    suggestion: Option<String>,
) -> Vec<Recommendation> {
    if let Some(text) = suggestion {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Wellness,
            title: "A suggestion for you".to_string(),
            description: text,
            priority: RecommendationPriority::Low,
            source: "llm".to_string(),
        });
        recommendations.sort_by_key(|r| r.priority);
        recommendations.truncate(RECOMMENDATION_LIMIT);
    }
    recommendations
}

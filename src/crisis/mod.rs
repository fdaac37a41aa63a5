//! Crisis detection
//!
//! Keyword scan over the journal text plus escalation from the computed
//! mood score and emotion intensities. Pure and synchronous; LLM
//! reasoning is attached later by the caller and never changes the
//! risk classification made here.

pub mod indicators;
pub mod resources;

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::models::{CrisisAssessment, EmotionFocus, RiskLevel};

pub use indicators::{IndicatorCategory, Severity};
pub use resources::{catalog, DISPLAY_LIMIT};

/// Mood score at or below which risk escalates to at least medium
pub const LOW_MOOD_THRESHOLD: f64 = 2.0;

/// Emotion intensity thresholds for escalation
const SADNESS_THRESHOLD: f64 = 0.8;
const ANGER_THRESHOLD: f64 = 0.8;
const ANXIETY_THRESHOLD: f64 = 0.7;

/// Assess crisis risk for a piece of text.
///
/// `mood_score` is the already-computed score for the same text, when
/// available; `emotions` are detected intensities in [0, 1]. Both only
/// ever escalate risk, never lower it.
pub fn assess(
    text: &str,
    mood_score: Option<f64>,
    emotions: &HashMap<String, f64>,
) -> CrisisAssessment {
    let text_lower = text.to_lowercase();

    let mut risk = RiskLevel::Low;
    let mut indicator_texts = Vec::new();
    let mut focus: Option<EmotionFocus> = None;

    if let Some(hit) = indicators::scan_for_severity(&text_lower, Severity::High)
        .or_else(|| indicators::scan_for_severity(&text_lower, Severity::Moderate))
    {
        risk = hit.category.severity().risk_level();
        indicator_texts.push(hit.describe());
    }

    if let Some(score) = mood_score {
        if score <= LOW_MOOD_THRESHOLD {
            risk = risk.escalate(RiskLevel::Medium);
            indicator_texts.push(format!("Very low mood score ({score:.1})"));
        }
    }

    for (name, intensity) in emotions {
        if !intensity.is_finite() {
            continue;
        }
        let intensity = *intensity;
        match name.to_lowercase().as_str() {
            "sadness" | "sad" | "grief" if intensity > SADNESS_THRESHOLD => {
                risk = risk.escalate(RiskLevel::Medium);
                focus = focus.or(Some(EmotionFocus::Depression));
                indicator_texts.push(format!("High sadness intensity ({intensity:.2})"));
            }
            "anger" | "angry" if intensity > ANGER_THRESHOLD => {
                risk = risk.escalate(RiskLevel::Medium);
                indicator_texts.push(format!("High anger intensity ({intensity:.2})"));
            }
            "fear" | "anxiety" if intensity > ANXIETY_THRESHOLD => {
                risk = risk.escalate(RiskLevel::Medium);
                focus = focus.or(Some(EmotionFocus::Anxiety));
                indicator_texts.push(format!("High anxiety intensity ({intensity:.2})"));
            }
            _ => {}
        }
    }

    let assessment = CrisisAssessment {
        risk_level: risk,
        requires_immediate_attention: risk == RiskLevel::High,
        resources: resources::for_assessment(risk, focus),
        emotion_focus: focus,
        indicators: indicator_texts,
        reasoning: None,
    };

    if assessment.risk_level == RiskLevel::High {
        warn!(
            indicators = assessment.indicators.len(),
            "high crisis risk detected"
        );
    } else {
        debug!(risk = ?assessment.risk_level, "crisis assessment complete");
    }

    assessment
}

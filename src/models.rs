// Core data structures for the kokoro mood backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Lower bound of the mood scale
pub const MOOD_MIN: f64 = 0.0;

/// Upper bound of the mood scale
pub const MOOD_MAX: f64 = 10.0;

/// Neutral midpoint of the mood scale
pub const MOOD_BASELINE: f64 = 5.0;

/// Sentiment polarity as reported by the inference backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl SentimentLabel {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }

    /// Normalize a raw model label (e.g. "POS", "LABEL_2", "positive")
    ///
    /// Unknown labels map to `Neutral`.
    pub fn from_model_label(raw: &str) -> Self {
        let upper = raw.to_uppercase();
        if upper.contains("POS") {
            Self::Positive
        } else if upper.contains("NEG") {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Parse from canonical string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "POSITIVE" => Some(Self::Positive),
            "NEGATIVE" => Some(Self::Negative),
            "NEUTRAL" => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sentiment reading: label plus model confidence in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub confidence: f64,
}

impl Sentiment {
    /// Neutral sentiment used when no reading is available
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            confidence: 0.5,
        }
    }

    /// Clamp confidence into [0, 1]; non-finite values become 0
    pub fn normalize(&mut self) {
        if !self.confidence.is_finite() {
            self.confidence = 0.0;
        }
        self.confidence = self.confidence.clamp(0.0, 1.0);
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Self::neutral()
    }
}

/// A recorded mood observation, immutable once appended to history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: String,
    pub recorded_at: DateTime<Utc>,

    /// Mood score on the [0, 10] scale
    pub mood_score: f64,

    pub sentiment: Sentiment,

    /// Emotion name to intensity in [0, 1]
    pub emotions: HashMap<String, f64>,

    /// The text the analysis was derived from
    pub source_text: String,
}

impl MoodEntry {
    /// Create a normalized entry timestamped now
    pub fn new(
        user_id: impl Into<String>,
        mood_score: f64,
        sentiment: Sentiment,
        emotions: HashMap<String, f64>,
        source_text: impl Into<String>,
    ) -> Self {
        let mut entry = Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            recorded_at: Utc::now(),
            mood_score,
            sentiment,
            emotions,
            source_text: source_text.into(),
        };
        entry.normalize();
        entry
    }

    /// Enforce the score and intensity invariants.
    ///
    /// Clamps mood_score to [0, 10] and intensities to [0, 1]; emotions with
    /// non-finite intensities are dropped, so a malformed mapping degrades to
    /// an empty one rather than an error.
    pub fn normalize(&mut self) {
        if !self.mood_score.is_finite() {
            self.mood_score = MOOD_BASELINE;
        }
        self.mood_score = self.mood_score.clamp(MOOD_MIN, MOOD_MAX);
        self.sentiment.normalize();
        self.emotions.retain(|_, v| v.is_finite());
        for intensity in self.emotions.values_mut() {
            *intensity = intensity.clamp(0.0, 1.0);
        }
    }
}

/// Crisis risk classification, ordered by severity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Escalate to the higher of two levels; risk never goes back down
    #[must_use]
    pub fn escalate(self, other: Self) -> Self {
        self.max(other)
    }

    pub fn is_high(&self) -> bool {
        matches!(self, Self::High)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse direction of mood over a history window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

impl Trend {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "IMPROVING",
            Self::Declining => "DECLINING",
            Self::Stable => "STABLE",
            Self::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display priority for a crisis resource; `Immediate` sorts first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourcePriority {
    Immediate,
    High,
    Normal,
}

impl ResourcePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Immediate => "IMMEDIATE",
            Self::High => "HIGH",
            Self::Normal => "NORMAL",
        }
    }
}

/// A support resource offered alongside a crisis assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisResource {
    pub name: String,
    pub phone: String,

    /// SMS shortcode, if the service accepts texts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    pub availability: String,
    pub description: String,
    pub priority: ResourcePriority,
}

/// Dominant negative emotion type detected during a crisis scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionFocus {
    Anxiety,
    Depression,
}

impl EmotionFocus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anxiety => "anxiety",
            Self::Depression => "depression",
        }
    }
}

/// Result of the crisis rule scan.
///
/// Derived from a single input; never stored independently of the
/// triggering entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisisAssessment {
    pub risk_level: RiskLevel,

    /// Human-readable descriptions of matched indicators
    pub indicators: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion_focus: Option<EmotionFocus>,

    /// Always equal to `risk_level == High`
    pub requires_immediate_attention: bool,

    pub resources: Vec<CrisisResource>,

    /// Optional LLM annotation; attach-only, never alters the rule-scan
    /// risk level or indicators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl CrisisAssessment {
    /// Attach a reasoning annotation without touching risk or indicators
    #[must_use]
    pub fn with_reasoning(mut self, reasoning: Option<String>) -> Self {
        self.reasoning = reasoning;
        self
    }
}

/// Per-entry average intensity of one emotion across a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionAverage {
    pub name: String,
    pub average: f64,
}

/// Observed min/max mood score within a window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodRange {
    pub min: f64,
    pub max: f64,
}

/// Mean mood by rough time of day (UTC hours 6-12 / 12-18 / 18-24)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeOfDayPattern {
    pub morning: f64,
    pub afternoon: f64,
    pub evening: f64,
}

/// Aggregated view of a history window, derived on demand.
///
/// An empty window yields the sentinel form: `average_mood` is `None` and
/// the trend is `InsufficientData`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_mood: Option<f64>,

    pub trend: Trend,

    /// Ranked descending, at most five entries
    pub top_emotions: Vec<EmotionAverage>,

    pub entry_count: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_range: Option<MoodRange>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDayPattern>,
}

impl PatternSummary {
    /// Sentinel summary for a window with no data
    pub fn empty() -> Self {
        Self {
            average_mood: None,
            trend: Trend::InsufficientData,
            top_emotions: Vec::new(),
            entry_count: 0,
            mood_range: None,
            time_of_day: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }
}

/// Recommendation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationKind {
    Crisis,
    Professional,
    Urgent,
    Wellness,
    Social,
    Maintenance,
}

/// Recommendation urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationPriority {
    Critical,
    High,
    Medium,
    Low,
}

/// A suggestion surfaced to the caller alongside an analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub priority: RecommendationPriority,

    /// Where the suggestion came from ("crisis_detection", "rules", "llm")
    pub source: String,
}

/// One extrapolated point of a mood forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Days ahead of the forecast origin (1-based)
    pub day: u8,
    pub predicted_mood: f64,
    pub date: DateTime<Utc>,
}

/// Short-term mood projection from recent history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodForecast {
    pub prediction: Trend,
    pub confidence: f64,
    pub daily: Vec<ForecastPoint>,
    pub slope: f64,
}

impl MoodForecast {
    /// Sentinel forecast when fewer entries exist than the model needs
    pub fn insufficient() -> Self {
        Self {
            prediction: Trend::InsufficientData,
            confidence: 0.0,
            daily: Vec::new(),
            slope: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_normalization() {
        assert_eq!(
            SentimentLabel::from_model_label("POSITIVE"),
            SentimentLabel::Positive
        );
        assert_eq!(
            SentimentLabel::from_model_label("neg"),
            SentimentLabel::Negative
        );
        assert_eq!(
            SentimentLabel::from_model_label("LABEL_1"),
            SentimentLabel::Neutral
        );
    }

    #[test]
    fn test_label_parse() {
        assert_eq!(
            SentimentLabel::parse("neutral"),
            Some(SentimentLabel::Neutral)
        );
        assert_eq!(SentimentLabel::parse("bogus"), None);
    }

    #[test]
    fn test_entry_normalize_clamps() {
        let mut emotions = HashMap::new();
        emotions.insert("joy".to_string(), 1.7);
        emotions.insert("sadness".to_string(), -0.2);
        emotions.insert("broken".to_string(), f64::NAN);

        let entry = MoodEntry::new("u1", 14.0, Sentiment::neutral(), emotions, "fine");

        assert_eq!(entry.mood_score, MOOD_MAX);
        assert_eq!(entry.emotions.get("joy"), Some(&1.0));
        assert_eq!(entry.emotions.get("sadness"), Some(&0.0));
        assert!(!entry.emotions.contains_key("broken"));
    }

    #[test]
    fn test_non_finite_score_falls_back_to_baseline() {
        let entry = MoodEntry::new("u1", f64::NAN, Sentiment::neutral(), HashMap::new(), "");
        assert_eq!(entry.mood_score, MOOD_BASELINE);
    }

    #[test]
    fn test_risk_escalation_is_monotonic() {
        assert_eq!(RiskLevel::Low.escalate(RiskLevel::Medium), RiskLevel::Medium);
        assert_eq!(RiskLevel::High.escalate(RiskLevel::Low), RiskLevel::High);
        assert_eq!(RiskLevel::High.escalate(RiskLevel::Medium), RiskLevel::High);
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn test_resource_priority_ordering() {
        assert!(ResourcePriority::Immediate < ResourcePriority::High);
        assert!(ResourcePriority::High < ResourcePriority::Normal);
    }

    #[test]
    fn test_entry_serde_round_trip() {
        let mut emotions = HashMap::new();
        emotions.insert("joy".to_string(), 0.8);
        let entry = MoodEntry::new(
            "u1",
            7.1,
            Sentiment {
                label: SentimentLabel::Positive,
                confidence: 0.92,
            },
            emotions,
            "great day",
        );

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"POSITIVE\""));

        let restored: MoodEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, entry.id);
        assert_eq!(restored.mood_score, 7.1);
        assert_eq!(restored.emotions.get("joy"), Some(&0.8));
    }

    #[test]
    fn test_reasoning_attach_does_not_touch_risk() {
        let assessment = CrisisAssessment {
            risk_level: RiskLevel::Medium,
            indicators: vec!["distress indicator".to_string()],
            emotion_focus: None,
            requires_immediate_attention: false,
            resources: Vec::new(),
            reasoning: None,
        };

        let annotated = assessment.with_reasoning(Some("elevated stress language".to_string()));
        assert_eq!(annotated.risk_level, RiskLevel::Medium);
        assert_eq!(annotated.indicators.len(), 1);
        assert!(annotated.reasoning.is_some());
    }

    #[test]
    fn test_empty_summary_is_sentinel() {
        let summary = PatternSummary::empty();
        assert!(summary.average_mood.is_none());
        assert_eq!(summary.trend, Trend::InsufficientData);
        assert!(summary.is_empty());
    }
}

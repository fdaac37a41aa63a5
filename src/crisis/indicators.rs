//! Crisis indicator categories and the keyword scan
//!
//! Categories are fixed at compile time. The scan is case-insensitive
//! substring membership, longest phrases first so a long phrase wins over
//! any shorter phrase it contains.

use serde::{Deserialize, Serialize};

use crate::models::RiskLevel;

/// Severity of an indicator category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Moderate,
    High,
}

impl Severity {
    /// Risk level implied by a match of this severity
    pub fn risk_level(&self) -> RiskLevel {
        match self {
            Self::Moderate => RiskLevel::Medium,
            Self::High => RiskLevel::High,
        }
    }
}

/// Fixed indicator categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    SelfHarmIdeation,
    Hopelessness,
    AcuteDistress,
}

impl IndicatorCategory {
    /// All categories, high severity first
    pub fn all() -> &'static [IndicatorCategory] {
        &[
            Self::SelfHarmIdeation,
            Self::Hopelessness,
            Self::AcuteDistress,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SelfHarmIdeation => "self_harm_ideation",
            Self::Hopelessness => "hopelessness",
            Self::AcuteDistress => "acute_distress",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::SelfHarmIdeation | Self::Hopelessness => Severity::High,
            Self::AcuteDistress => Severity::Moderate,
        }
    }

    /// Phrases that signal this category
    pub fn phrases(&self) -> &'static [&'static str] {
        match self {
            Self::SelfHarmIdeation => &[
                "suicide",
                "kill myself",
                "end it all",
                "ending it all",
                "not worth living",
                "want to die",
                "hurt myself",
                "self harm",
                "self-harm",
                "end my life",
                "take my life",
                "thinking about ending",
                "thinking of ending",
                "planning to end",
            ],
            Self::Hopelessness => &[
                "hopeless",
                "no way out",
                "no reason to live",
                "no point in going on",
                "nothing will ever get better",
            ],
            Self::AcuteDistress => &[
                "give up",
                "nothing matters",
                "can't go on",
                "can't take it",
                "overwhelmed",
                "desperate",
                "falling apart",
                "at my limit",
            ],
        }
    }
}

impl std::fmt::Display for IndicatorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single phrase match found by the scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorMatch {
    pub category: IndicatorCategory,
    pub phrase: &'static str,
}

impl IndicatorMatch {
    /// Human-readable description used in `CrisisAssessment::indicators`
    pub fn describe(&self) -> String {
        match self.category.severity() {
            Severity::High => format!(
                "CRITICAL: high-risk phrase \"{}\" ({})",
                self.phrase,
                self.category.name()
            ),
            Severity::Moderate => format!(
                "Distress indicator \"{}\" ({})",
                self.phrase,
                self.category.name()
            ),
        }
    }
}

/// Scan text for the first matching indicator of the given severity.
///
/// Phrases are checked longest first across all categories of that
/// severity; one match is enough to classify, matching is stopped there.
pub fn scan_for_severity(text_lower: &str, severity: Severity) -> Option<IndicatorMatch> {
    let mut candidates: Vec<IndicatorMatch> = IndicatorCategory::all()
        .iter()
        .filter(|c| c.severity() == severity)
        .flat_map(|c| {
            c.phrases().iter().map(|phrase| IndicatorMatch {
                category: *c,
                phrase,
            })
        })
        .collect();

    candidates.sort_by_key(|m| std::cmp::Reverse(m.phrase.len()));

    candidates
        .into_iter()
        .find(|m| text_lower.contains(m.phrase))
}

//! Analysis orchestration
//!
//! `MoodAnalyzer` wires inference, scoring, crisis detection, persistence
//! and the optional LLM annotator into the operations the API exposes.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analytics;
use crate::config::AnalysisConfig;
use crate::crisis;
use crate::error::Result;
use crate::inference::{EmotionDetector, SentimentAnalyzer};
use crate::llm::ReasoningClient;
use crate::metrics;
use crate::models::{
    CrisisAssessment, MoodEntry, MoodForecast, PatternSummary, Recommendation, RiskLevel,
};
use crate::recommend;
use crate::scoring::{self, ScoreSource};
use crate::storage::MoodRepository;
use crate::utils::error::InputError;
use crate::utils::truncate_for_log;

/// Input for a full mood analysis
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub user_id: String,
    pub text: String,

    /// Score from a facial-expression capture; overrides the text score
    #[serde(default)]
    pub expression_score: Option<f64>,
}

/// Result of a full mood analysis
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub entry: MoodEntry,
    pub score_source: ScoreSource,
    pub crisis: CrisisAssessment,
    pub recommendations: Vec<Recommendation>,
}

/// Counters for the stats endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStats {
    pub total_entries: usize,
    pub total_users: usize,
}

/// Central orchestrator over inference, rules and storage
pub struct MoodAnalyzer {
    sentiment: Arc<dyn SentimentAnalyzer>,
    emotions: Arc<dyn EmotionDetector>,
    repository: Arc<dyn MoodRepository>,
    reasoning: Option<Arc<ReasoningClient>>,
    config: AnalysisConfig,
}

impl MoodAnalyzer {
    pub fn new(
        sentiment: Arc<dyn SentimentAnalyzer>,
        emotions: Arc<dyn EmotionDetector>,
        repository: Arc<dyn MoodRepository>,
        reasoning: Option<Arc<ReasoningClient>>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            sentiment,
            emotions,
            repository,
            reasoning,
            config,
        }
    }

    fn validate_text(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(InputError::EmptyText.into());
        }
        let len = text.chars().count();
        if len > self.config.max_text_len {
            return Err(InputError::TextTooLong {
                len,
                max: self.config.max_text_len,
            }
            .into());
        }
        Ok(())
    }

    fn validate_days(&self, days: u32) -> Result<u32> {
        if days == 0 || days > self.config.max_window_days {
            return Err(InputError::InvalidDays(days).into());
        }
        Ok(days)
    }

    /// Analyze text, persist the resulting entry and assess crisis risk
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisOutcome> {
        self.validate_text(&request.text)?;

        let (sentiment, emotions) = tokio::try_join!(
            self.sentiment.analyze_sentiment(&request.text),
            self.emotions.detect_emotions(&request.text),
        )
        .inspect_err(|e| {
            metrics::record_inference_failure(if e.is_recoverable() {
                "transient"
            } else {
                "permanent"
            });
        })?;

        let text_score = scoring::mood_score(Some(&sentiment), &emotions);
        let (score, score_source) = scoring::resolve_score(text_score, request.expression_score);

        let entry = MoodEntry::new(
            request.user_id.clone(),
            score,
            sentiment,
            emotions,
            request.text.clone(),
        );
        self.repository.append(&entry)?;

        let crisis = crisis::assess(&request.text, Some(entry.mood_score), &entry.emotions);
        let crisis = self.annotate_crisis(&request.text, crisis).await;

        let window = self
            .repository
            .history(&entry.user_id, self.config.default_window_days)?;
        let recommendations =
            recommend::recommendations(&analytics::summarize(&window), Some(crisis.risk_level));

        metrics::record_analysis(entry.sentiment.label.as_str());
        metrics::record_crisis_detection(crisis.risk_level.as_str());
        info!(
            user_id = %entry.user_id,
            score = entry.mood_score,
            source = ?score_source,
            risk = %crisis.risk_level,
            text = %truncate_for_log(&request.text, 40),
            "analysis complete"
        );

        Ok(AnalysisOutcome {
            entry,
            score_source,
            crisis,
            recommendations,
        })
    }

    /// Assess crisis risk without persisting anything.
    ///
    /// Emotion inference is attempted but a failing backend degrades to a
    /// keyword-only scan rather than an error.
    pub async fn check(&self, text: &str) -> Result<CrisisAssessment> {
        self.validate_text(text)?;

        let emotions = match self.emotions.detect_emotions(text).await {
            Ok(emotions) => emotions,
            Err(e) => {
                warn!("crisis check falling back to keyword scan: {e}");
                metrics::record_inference_failure("crisis_check");
                HashMap::new()
            }
        };

        let assessment = crisis::assess(text, None, &emotions);
        let assessment = self.annotate_crisis(text, assessment).await;
        metrics::record_crisis_detection(assessment.risk_level.as_str());
        Ok(assessment)
    }

    async fn annotate_crisis(&self, text: &str, assessment: CrisisAssessment) -> CrisisAssessment {
        match &self.reasoning {
            Some(client) => {
                let note = client.crisis_reasoning(text, &assessment).await;
                assessment.with_reasoning(note)
            }
            None => assessment,
        }
    }

    /// History window for a user, ascending by time
    pub fn history(&self, user_id: &str, days: u32) -> Result<Vec<MoodEntry>> {
        let days = self.validate_days(days)?;
        Ok(self.repository.history(user_id, days)?)
    }

    /// Pattern summary over a user's recent entries
    pub fn patterns(&self, user_id: &str, days: u32) -> Result<PatternSummary> {
        let days = self.validate_days(days)?;
        let entries = self.repository.history(user_id, days)?;
        Ok(analytics::summarize(&entries))
    }

    /// Forecast over the default window
    pub fn forecast(&self, user_id: &str) -> Result<MoodForecast> {
        let entries = self
            .repository
            .history(user_id, self.config.default_window_days)?;
        Ok(analytics::forecast(&entries, Utc::now()))
    }

    /// Recommendations from the pattern summary plus the latest risk state
    pub async fn recommendations(&self, user_id: &str) -> Result<Vec<Recommendation>> {
        let entries = self
            .repository
            .history(user_id, self.config.default_window_days)?;
        let summary = analytics::summarize(&entries);

        let latest_risk: Option<RiskLevel> = entries.last().map(|entry| {
            crisis::assess(&entry.source_text, Some(entry.mood_score), &entry.emotions)
                .risk_level
        });

        let recs = recommend::recommendations(&summary, latest_risk);

        let suggestion = match (&self.reasoning, summary.is_empty()) {
            (Some(client), false) => client.personalized_suggestion(&summary).await,
            _ => None,
        };
        Ok(recommend::with_llm_suggestion(recs, suggestion))
    }

    /// Pattern insight annotation for the insights endpoint
    pub async fn pattern_insight(&self, summary: &PatternSummary) -> Option<String> {
        match &self.reasoning {
            Some(client) if !summary.is_empty() => client.pattern_insight(summary).await,
            _ => None,
        }
    }

    /// Service-wide counters
    pub fn stats(&self) -> Result<ServiceStats> {
        Ok(ServiceStats {
            total_entries: self.repository.count()?,
            total_users: self.repository.user_count()?,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}

//! HTTP client for the sentiment and emotion inference backend
//!
//! The backend is any service exposing `POST /v1/sentiment`,
//! `POST /v1/emotions` and `GET /health`. Transient failures are retried
//! with exponential backoff; non-recoverable ones surface immediately.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Sentiment, SentimentLabel};
use crate::utils::error::InferenceError;
use crate::utils::retry::{with_retry_if, RetryConfig};

/// Configuration for the inference backend client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the inference service
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Retry attempts for recoverable failures
    pub max_retries: u32,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8500".to_string(),
            timeout_secs: 10,
            max_retries: 2,
        }
    }
}

/// Sentiment classification over text
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    async fn analyze_sentiment(&self, text: &str) -> Result<Sentiment, InferenceError>;
}

/// Emotion intensity detection over text
#[async_trait]
pub trait EmotionDetector: Send + Sync {
    async fn detect_emotions(&self, text: &str)
        -> Result<HashMap<String, f64>, InferenceError>;
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    label: String,
    #[serde(default = "default_confidence")]
    confidence: f64,
}

fn default_confidence() -> f64 {
    0.5
}

#[derive(Debug, Deserialize)]
struct EmotionsResponse {
    #[serde(default)]
    emotions: HashMap<String, f64>,
}

/// Client for an HTTP inference backend
pub struct HttpInferenceClient {
    client: Client,
    config: InferenceConfig,
    retry: RetryConfig,
}

impl HttpInferenceClient {
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InferenceError::Unavailable(e.to_string()))?;

        let retry = RetryConfig::new(config.max_retries);
        Ok(Self {
            client,
            config,
            retry,
        })
    }

    /// Check whether the backend answers its health probe
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/health", self.config.endpoint);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn post_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        text: &str,
    ) -> Result<T, InferenceError> {
        let url = format!("{}{}", self.config.endpoint, path);

        let result = with_retry_if(
            &self.retry,
            || async {
                let response = self
                    .client
                    .post(&url)
                    .json(&InferenceRequest { text })
                    .send()
                    .await
                    .map_err(InferenceError::from)?;

                let status = response.status();
                if !status.is_success() {
                    return Err(InferenceError::BadStatus(status.as_u16()).into());
                }

                let parsed: T = response
                    .json()
                    .await
                    .map_err(|e| InferenceError::Decode(e.to_string()))?;
                Ok(parsed)
            },
            |err| {
                err.downcast_ref::<InferenceError>()
                    .map(InferenceError::is_recoverable)
                    .unwrap_or(false)
            },
        )
        .await;

        result.map_err(|err| match err.downcast::<InferenceError>() {
            Ok(inference) => inference,
            Err(other) => InferenceError::Unavailable(other.to_string()),
        })
    }
}

#[async_trait]
impl SentimentAnalyzer for HttpInferenceClient {
    async fn analyze_sentiment(&self, text: &str) -> Result<Sentiment, InferenceError> {
        let response: SentimentResponse = self.post_json("/v1/sentiment", text).await?;
        debug!(label = %response.label, "sentiment received");

        Ok(Sentiment {
            label: SentimentLabel::from_model_label(&response.label),
            confidence: response.confidence.clamp(0.0, 1.0),
        })
    }
}

#[async_trait]
impl EmotionDetector for HttpInferenceClient {
    async fn detect_emotions(
        &self,
        text: &str,
    ) -> Result<HashMap<String, f64>, InferenceError> {
        let response: EmotionsResponse = self.post_json("/v1/emotions", text).await?;
        debug!(count = response.emotions.len(), "emotions received");

        let emotions = response
            .emotions
            .into_iter()
            .filter(|(_, v)| v.is_finite())
            .map(|(k, v)| (k, v.clamp(0.0, 1.0)))
            .collect();
        Ok(emotions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpInferenceClient {
        HttpInferenceClient::new(InferenceConfig {
            endpoint: server.uri(),
            timeout_secs: 5,
            max_retries: 1,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_sentiment_parsed_and_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/sentiment"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "label": "positive",
                "confidence": 0.92
            })))
            .mount(&server)
            .await;

        let sentiment = client_for(&server)
            .analyze_sentiment("great day")
            .await
            .unwrap();
        assert_eq!(sentiment.label, SentimentLabel::Positive);
        assert!((sentiment.confidence - 0.92).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unknown_label_maps_to_neutral() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/sentiment"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "label": "mixed"
            })))
            .mount(&server)
            .await;

        let sentiment = client_for(&server).analyze_sentiment("eh").await.unwrap();
        assert_eq!(sentiment.label, SentimentLabel::Neutral);
        assert_eq!(sentiment.confidence, 0.5);
    }

    #[tokio::test]
    async fn test_emotions_clamped_to_unit_range() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/emotions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "emotions": {"joy": 1.4, "sadness": -0.2}
            })))
            .mount(&server)
            .await;

        let emotions = client_for(&server).detect_emotions("text").await.unwrap();
        assert_eq!(emotions.get("joy"), Some(&1.0));
        assert_eq!(emotions.get("sadness"), Some(&0.0));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/sentiment"))
            .respond_with(ResponseTemplate::new(422))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .analyze_sentiment("text")
            .await
            .unwrap_err();
        assert!(matches!(err, InferenceError::BadStatus(422)));
    }

    #[tokio::test]
    async fn test_server_error_retried_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/emotions"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/emotions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "emotions": {"calm": 0.6}
            })))
            .mount(&server)
            .await;

        let emotions = client_for(&server).detect_emotions("text").await.unwrap();
        assert_eq!(emotions.get("calm"), Some(&0.6));
    }

    #[tokio::test]
    async fn test_health_probe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert!(client_for(&server).is_available().await);
    }
}

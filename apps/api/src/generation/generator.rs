//! Report generation — turns a topic into a validated six-section report.
//!
//! Flow: GenerationRequest (3–100 chars) → ReportBackend (one call) → schema validation.
//! The result is a complete `Report` or a `GenerationFailed`; never anything in between.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::generation::prompts::{REPORT_PROMPT_TEMPLATE, REPORT_SYSTEM_TEMPLATE};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::report::{validate, Report, SchemaError, SectionKind};

pub const MIN_TOPIC_CHARS: usize = 3;
pub const MAX_TOPIC_CHARS: usize = 100;

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Why a generation produced no report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    #[error("Failed to generate report. The AI returned no data.")]
    NoData,

    #[error("An error occurred while generating the report: {0}")]
    Schema(SchemaError),

    #[error("An error occurred while generating the report: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Topic must be between 3 and 100 characters long (got {length})")]
    InvalidTopic { length: usize },

    #[error("{0}")]
    GenerationFailed(FailureReason),
}

/// Failure raised by a backend's transport or runtime.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct BackendError(pub String);

// ────────────────────────────────────────────────────────────────────────────
// Request
// ────────────────────────────────────────────────────────────────────────────

/// A topic accepted for generation. Doubles as the history key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    topic: String,
}

impl GenerationRequest {
    /// Accepts topics of 3–100 characters. Trimming is the caller's job.
    pub fn new(topic: impl Into<String>) -> Result<Self, GenerationError> {
        let topic = topic.into();
        let length = topic.chars().count();
        if !(MIN_TOPIC_CHARS..=MAX_TOPIC_CHARS).contains(&length) {
            return Err(GenerationError::InvalidTopic { length });
        }
        Ok(Self { topic })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backend seam
// ────────────────────────────────────────────────────────────────────────────

/// The external generation capability.
///
/// `Ok(None)` means the backend answered but produced nothing usable.
#[async_trait]
pub trait ReportBackend: Send + Sync {
    async fn generate_sections(
        &self,
        topic: &str,
    ) -> Result<Option<Map<String, Value>>, BackendError>;
}

/// Generation capability backed by the Anthropic Messages API.
pub struct LlmReportBackend {
    llm: LlmClient,
}

impl LlmReportBackend {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ReportBackend for LlmReportBackend {
    async fn generate_sections(
        &self,
        topic: &str,
    ) -> Result<Option<Map<String, Value>>, BackendError> {
        let system = REPORT_SYSTEM_TEMPLATE.replace("{json_only}", JSON_ONLY_SYSTEM);
        let prompt = REPORT_PROMPT_TEMPLATE.replace("{topic}", topic);

        let answer = self
            .llm
            .call_json(&prompt, &system)
            .await
            .map_err(|e| BackendError(e.to_string()))?;

        Ok(answer.and_then(unwrap_sections))
    }
}

/// Accepts `{"report": {...}}` or a bare section object. A bare object with no section keys
/// at all is not an answer.
fn unwrap_sections(answer: Value) -> Option<Map<String, Value>> {
    let Value::Object(mut map) = answer else {
        return None;
    };
    if map.contains_key("report") {
        return match map.remove("report") {
            Some(Value::Object(sections)) => Some(sections),
            _ => None,
        };
    }
    if map.keys().any(|k| SectionKind::from_key(k).is_some()) {
        Some(map)
    } else {
        None
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// Calls the backend exactly once and validates its output.
pub async fn generate_report(
    backend: &dyn ReportBackend,
    request: &GenerationRequest,
) -> Result<Report, GenerationError> {
    info!("Generating report for topic {:?}", request.topic());

    let sections = match backend.generate_sections(request.topic()).await {
        Ok(Some(sections)) => sections,
        Ok(None) => {
            warn!("Backend returned no data for {:?}", request.topic());
            return Err(GenerationError::GenerationFailed(FailureReason::NoData));
        }
        Err(e) => {
            warn!("Backend failed for {:?}: {}", request.topic(), e);
            return Err(GenerationError::GenerationFailed(FailureReason::Backend(
                e.0,
            )));
        }
    };

    let report = validate(&sections).map_err(|e| {
        warn!("Backend output rejected for {:?}: {}", request.topic(), e);
        GenerationError::GenerationFailed(FailureReason::Schema(e))
    })?;

    info!(
        "Generated report for {:?}: {} words",
        request.topic(),
        report.word_count()
    );
    Ok(report)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::report::schema::tests::candidate;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned backend that counts its calls.
    pub(crate) struct FakeBackend {
        response: Result<Option<Map<String, Value>>, String>,
        pub calls: AtomicUsize,
    }

    impl FakeBackend {
        pub(crate) fn returning(sections: Map<String, Value>) -> Self {
            Self {
                response: Ok(Some(sections)),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn valid() -> Self {
            Self::returning(candidate("Generated text for"))
        }

        pub(crate) fn empty() -> Self {
            Self {
                response: Ok(None),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ReportBackend for FakeBackend {
        async fn generate_sections(
            &self,
            _topic: &str,
        ) -> Result<Option<Map<String, Value>>, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone().map_err(BackendError)
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("Quantum Computing").unwrap()
    }

    #[test]
    fn test_topic_length_bounds() {
        assert!(GenerationRequest::new("abc").is_ok());
        assert!(GenerationRequest::new("a".repeat(100)).is_ok());
        assert_eq!(
            GenerationRequest::new("ab"),
            Err(GenerationError::InvalidTopic { length: 2 })
        );
        assert_eq!(
            GenerationRequest::new("a".repeat(101)),
            Err(GenerationError::InvalidTopic { length: 101 })
        );
    }

    #[test]
    fn test_topic_length_counts_characters_not_bytes() {
        // 3 characters, 9 bytes
        assert!(GenerationRequest::new("量子力").is_ok());
    }

    #[tokio::test]
    async fn test_valid_output_becomes_report() {
        let backend = FakeBackend::valid();
        let report = generate_report(&backend, &request()).await.unwrap();
        assert_eq!(
            report.section(SectionKind::Introduction),
            "Generated text for introduction"
        );
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_data_fails_with_generic_marker() {
        let backend = FakeBackend::empty();
        let err = generate_report(&backend, &request()).await.unwrap_err();
        assert_eq!(err, GenerationError::GenerationFailed(FailureReason::NoData));
        assert!(err.to_string().contains("returned no data"));
    }

    #[tokio::test]
    async fn test_schema_violation_fails_generation() {
        let mut sections = candidate("x");
        sections.remove("futureScope");
        let backend = FakeBackend::returning(sections);
        let err = generate_report(&backend, &request()).await.unwrap_err();
        assert_eq!(
            err,
            GenerationError::GenerationFailed(FailureReason::Schema(
                SchemaError::MissingSection("futureScope".to_string())
            ))
        );
    }

    #[tokio::test]
    async fn test_backend_failure_keeps_message_and_is_not_retried() {
        let backend = FakeBackend::failing("connection reset");
        let err = generate_report(&backend, &request()).await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unwrap_sections_accepts_wrapped_and_bare() {
        let wrapped = json!({"report": {"introduction": "x"}});
        assert!(unwrap_sections(wrapped).unwrap().contains_key("introduction"));

        let bare = json!({"introduction": "x"});
        assert!(unwrap_sections(bare).unwrap().contains_key("introduction"));
    }

    #[test]
    fn test_unwrap_sections_rejects_non_objects() {
        assert!(unwrap_sections(json!({"report": null})).is_none());
        assert!(unwrap_sections(json!({"report": "text"})).is_none());
        assert!(unwrap_sections(json!({})).is_none());
        assert!(unwrap_sections(json!(["introduction"])).is_none());
    }

    #[test]
    fn test_bare_object_without_section_keys_is_no_data() {
        assert!(unwrap_sections(json!({"title": "Quantum Computing"})).is_none());

        // One recognised key is enough to hand it to validation.
        let partial = unwrap_sections(json!({"introduction": "x", "title": "y"})).unwrap();
        assert_eq!(
            validate(&partial),
            Err(SchemaError::MissingSection("history".to_string()))
        );
    }

    #[tokio::test]
    async fn test_unrelated_object_from_backend_reports_no_data() {
        struct Unrelated;

        #[async_trait]
        impl ReportBackend for Unrelated {
            async fn generate_sections(
                &self,
                _topic: &str,
            ) -> Result<Option<Map<String, Value>>, BackendError> {
                Ok(unwrap_sections(json!({"summary": "not a report"})))
            }
        }

        let err = generate_report(&Unrelated, &request()).await.unwrap_err();
        assert_eq!(err, GenerationError::GenerationFailed(FailureReason::NoData));
    }

    #[test]
    fn test_prompt_template_names_every_section() {
        for kind in SectionKind::ALL {
            assert!(
                REPORT_PROMPT_TEMPLATE.contains(&format!("\"{}\"", kind.key())),
                "prompt is missing {}",
                kind.key()
            );
        }
        assert!(REPORT_PROMPT_TEMPLATE.contains("{topic}"));
    }
}

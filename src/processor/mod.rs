//! Task processing - the request/response cycle against the language model.
//!
//! A batch of raw tasks is turned into one composite prompt, sent in a
//! single chat completion, and the JSON array that comes back is mapped
//! onto the inputs by positional index. The batch either fully succeeds
//! or fully fails; nothing is retried and no partial results escape.

mod prompt;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::llm::{ChatMessage, ChatOptions, LlmClient, LlmError};

/// Maximum number of tasks accepted in a single batch.
pub const MAX_BATCH_SIZE: usize = 20;

/// Summary used when the model omitted one for a task.
const FALLBACK_SUMMARY: &str = "Failed to generate summary";

/// Priority used when the model returned something non-numeric.
const DEFAULT_PRIORITY: u8 = 3;

/// Fixed sampling parameters for the completion call.
const TEMPERATURE: f64 = 0.3;
const MAX_TOKENS: u64 = 2000;

/// A user-entered, unprocessed task description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTask {
    pub id: String,
    pub description: String,
}

/// A raw task enriched with an AI-derived summary, tags, and priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedTask {
    pub id: String,
    pub original_description: String,
    pub summary: String,
    pub tags: Vec<String>,
    /// Always in [1, 5].
    pub priority: u8,
    pub processed_at: DateTime<Utc>,
}

/// Errors from the task processing pipeline.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("OpenAI API key not configured. Please add OPENAI_API_KEY to your environment variables.")]
    MissingApiKey,
    #[error("No tasks provided. Please add at least one task to process.")]
    EmptyBatch,
    #[error("Too many tasks. Please process up to {} tasks at a time.", MAX_BATCH_SIZE)]
    BatchTooLarge(usize),
    #[error("No response from the language model")]
    EmptyResponse,
    #[error("Invalid JSON response from the language model")]
    InvalidJson,
    #[error("Language model response is not an array")]
    NotAnArray,
    #[error("Language model returned {actual} results for {expected} tasks")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("{0}")]
    Upstream(#[from] LlmError),
}

impl ProcessError {
    /// Whether the failure is the caller's fault (bad batch) rather
    /// than a configuration or upstream problem.
    pub fn is_validation(&self) -> bool {
        matches!(self, ProcessError::EmptyBatch | ProcessError::BatchTooLarge(_))
    }
}

/// Processes batches of raw tasks through the language model.
pub struct TaskProcessor {
    llm: Arc<dyn LlmClient>,
    model: String,
}

impl TaskProcessor {
    /// Create a processor using the given client and model.
    pub fn new(llm: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    /// Process one batch of at most [`MAX_BATCH_SIZE`] tasks.
    ///
    /// On success the output has exactly one [`ProcessedTask`] per
    /// input, in input order, with `id` and `original_description`
    /// taken from the input at the same position.
    pub async fn process_batch(
        &self,
        tasks: &[RawTask],
    ) -> Result<Vec<ProcessedTask>, ProcessError> {
        if tasks.is_empty() {
            return Err(ProcessError::EmptyBatch);
        }
        if tasks.len() > MAX_BATCH_SIZE {
            return Err(ProcessError::BatchTooLarge(tasks.len()));
        }

        let messages = [
            ChatMessage::system(prompt::SYSTEM_PROMPT),
            ChatMessage::user(prompt::build_prompt(tasks)),
        ];
        let options = ChatOptions {
            temperature: Some(TEMPERATURE),
            max_tokens: Some(MAX_TOKENS),
            ..ChatOptions::default()
        };

        tracing::info!(
            batch_size = tasks.len(),
            model = %self.model,
            "Processing task batch"
        );

        let response = self
            .llm
            .chat_completion(&self.model, &messages, options)
            .await?;

        let content = response.content.as_deref().map(str::trim).unwrap_or_default();
        if content.is_empty() {
            return Err(ProcessError::EmptyResponse);
        }

        let processed = map_results(tasks, content)?;

        tracing::info!(count = processed.len(), "Task batch processed");
        Ok(processed)
    }
}

/// Parse the model output and map each element onto its input by
/// positional index. Any id the model returned is ignored.
fn map_results(tasks: &[RawTask], content: &str) -> Result<Vec<ProcessedTask>, ProcessError> {
    let parsed: Value = serde_json::from_str(content).map_err(|e| {
        tracing::error!("Failed to parse model response as JSON: {}", e);
        ProcessError::InvalidJson
    })?;

    let results = parsed.as_array().ok_or(ProcessError::NotAnArray)?;

    // The mapping is positional, so a length mismatch would silently
    // misattribute results. Fail the whole batch instead.
    if results.len() != tasks.len() {
        return Err(ProcessError::LengthMismatch {
            expected: tasks.len(),
            actual: results.len(),
        });
    }

    let now = Utc::now();
    let processed = tasks
        .iter()
        .zip(results)
        .map(|(task, result)| ProcessedTask {
            id: task.id.clone(),
            original_description: task.description.clone(),
            summary: result
                .get("summary")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| FALLBACK_SUMMARY.to_string()),
            tags: result
                .get("tags")
                .and_then(Value::as_array)
                .map(|tags| {
                    tags.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            priority: clamp_priority(result.get("priority")),
            processed_at: now,
        })
        .collect();

    Ok(processed)
}

/// Clamp a priority value into [1, 5], rounding to the nearest integer.
/// Non-numeric values fall back to the default of 3.
fn clamp_priority(value: Option<&Value>) -> u8 {
    match value.and_then(Value::as_f64) {
        Some(p) => p.clamp(1.0, 5.0).round() as u8,
        None => DEFAULT_PRIORITY,
    }
}

/// Human-readable label for a priority score.
pub fn priority_label(priority: u8) -> &'static str {
    match priority {
        1 => "Very Low",
        2 => "Low",
        3 => "Medium",
        4 => "High",
        5 => "Critical",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::MockLlm;
    use crate::llm::LlmError;

    fn tasks(count: usize) -> Vec<RawTask> {
        (1..=count)
            .map(|i| RawTask {
                id: format!("task-{}", i),
                description: format!("do thing number {}", i),
            })
            .collect()
    }

    fn processor_with(llm: Arc<MockLlm>) -> TaskProcessor {
        TaskProcessor::new(llm, "gpt-4o-mini")
    }

    #[tokio::test]
    async fn test_successful_batch_maps_positionally() {
        let llm = Arc::new(MockLlm::with_content(
            r##"[
                {"id": "wrong-id", "summary": "Fix thing one", "tags": ["#bug-fix"], "priority": 4},
                {"id": "also-wrong", "summary": "Do thing two", "tags": ["#feature", "#backend"], "priority": 2}
            ]"##,
        ));
        let processor = processor_with(Arc::clone(&llm));
        let input = tasks(2);

        let processed = processor.process_batch(&input).await.unwrap();

        assert_eq!(processed.len(), 2);
        // Ids come from the input, never from the model.
        assert_eq!(processed[0].id, "task-1");
        assert_eq!(processed[1].id, "task-2");
        assert_eq!(processed[0].original_description, "do thing number 1");
        assert_eq!(processed[1].original_description, "do thing number 2");
        assert_eq!(processed[0].summary, "Fix thing one");
        assert_eq!(processed[0].tags, vec!["#bug-fix"]);
        assert_eq!(processed[0].priority, 4);
        assert_eq!(processed[1].tags, vec!["#feature", "#backend"]);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_priority_clamped_and_defaulted() {
        let llm = Arc::new(MockLlm::with_content(
            r#"[
                {"summary": "a", "tags": [], "priority": 7},
                {"summary": "b", "tags": [], "priority": 0},
                {"summary": "c", "tags": [], "priority": "high"},
                {"summary": "d", "tags": []},
                {"summary": "e", "tags": [], "priority": 4.6}
            ]"#,
        ));
        let processor = processor_with(llm);

        let processed = processor.process_batch(&tasks(5)).await.unwrap();

        assert_eq!(processed[0].priority, 5);
        assert_eq!(processed[1].priority, 1);
        assert_eq!(processed[2].priority, 3);
        assert_eq!(processed[3].priority, 3);
        assert_eq!(processed[4].priority, 5);
        assert!(processed.iter().all(|t| (1..=5).contains(&t.priority)));
    }

    #[tokio::test]
    async fn test_missing_summary_and_bad_tags_defaulted() {
        let llm = Arc::new(MockLlm::with_content(
            r#"[{"tags": "not-an-array", "priority": 2}]"#,
        ));
        let processor = processor_with(llm);

        let processed = processor.process_batch(&tasks(1)).await.unwrap();

        assert_eq!(processed[0].summary, "Failed to generate summary");
        assert!(processed[0].tags.is_empty());
        assert_eq!(processed[0].priority, 2);
    }

    #[tokio::test]
    async fn test_non_string_tags_are_dropped() {
        let llm = Arc::new(MockLlm::with_content(
            r##"[{"summary": "a", "tags": ["#urgent", 42, null, "#client"], "priority": 3}]"##,
        ));
        let processor = processor_with(llm);

        let processed = processor.process_batch(&tasks(1)).await.unwrap();

        assert_eq!(processed[0].tags, vec!["#urgent", "#client"]);
    }

    #[tokio::test]
    async fn test_empty_batch_rejected_without_call() {
        let llm = Arc::new(MockLlm::with_content("[]"));
        let processor = processor_with(Arc::clone(&llm));

        let err = processor.process_batch(&[]).await.unwrap_err();

        assert!(matches!(err, ProcessError::EmptyBatch));
        assert!(err.is_validation());
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_oversized_batch_rejected_without_call() {
        let llm = Arc::new(MockLlm::with_content("[]"));
        let processor = processor_with(Arc::clone(&llm));

        let err = processor.process_batch(&tasks(21)).await.unwrap_err();

        assert!(matches!(err, ProcessError::BatchTooLarge(21)));
        assert!(err.is_validation());
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unparsable_output_fails_whole_batch() {
        let llm = Arc::new(MockLlm::with_content("Sure! Here are your tasks:"));
        let processor = processor_with(llm);

        let err = processor.process_batch(&tasks(3)).await.unwrap_err();

        assert!(matches!(err, ProcessError::InvalidJson));
    }

    #[tokio::test]
    async fn test_non_array_output_fails_whole_batch() {
        let llm = Arc::new(MockLlm::with_content(r#"{"summary": "one object"}"#));
        let processor = processor_with(llm);

        let err = processor.process_batch(&tasks(1)).await.unwrap_err();

        assert!(matches!(err, ProcessError::NotAnArray));
    }

    #[tokio::test]
    async fn test_empty_output_fails_whole_batch() {
        let llm = Arc::new(MockLlm::with_content("   "));
        let processor = processor_with(llm);

        let err = processor.process_batch(&tasks(1)).await.unwrap_err();

        assert!(matches!(err, ProcessError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_length_mismatch_fails_whole_batch() {
        let llm = Arc::new(MockLlm::with_content(
            r#"[{"summary": "only one", "tags": [], "priority": 3}]"#,
        ));
        let processor = processor_with(llm);

        let err = processor.process_batch(&tasks(3)).await.unwrap_err();

        match err {
            ProcessError::LengthMismatch { expected, actual } => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 1);
            }
            other => panic!("expected LengthMismatch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upstream_error_propagates() {
        let llm = Arc::new(MockLlm::with_error(LlmError::server_error(
            503,
            "upstream unavailable",
        )));
        let processor = processor_with(llm);

        let err = processor.process_batch(&tasks(1)).await.unwrap_err();

        assert!(matches!(err, ProcessError::Upstream(_)));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_priority_labels() {
        assert_eq!(priority_label(1), "Very Low");
        assert_eq!(priority_label(2), "Low");
        assert_eq!(priority_label(3), "Medium");
        assert_eq!(priority_label(4), "High");
        assert_eq!(priority_label(5), "Critical");
        assert_eq!(priority_label(9), "Unknown");
    }
}

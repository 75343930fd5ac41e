//! Canned LLM client for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChatMessage, ChatOptions, ChatResponse, LlmClient, LlmError};

/// Test client that returns a fixed response (or error) and records
/// every request it receives.
pub struct MockLlm {
    response: Result<String, LlmError>,
    pub requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockLlm {
    /// A mock that answers every call with the given content.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            response: Ok(content.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A mock that fails every call with the given error.
    pub fn with_error(error: LlmError) -> Self {
        Self {
            response: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of calls made against this mock.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        _options: ChatOptions,
    ) -> Result<ChatResponse, LlmError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        match &self.response {
            Ok(content) => Ok(ChatResponse {
                content: Some(content.clone()),
                finish_reason: Some("stop".to_string()),
                usage: None,
                model: Some(model.to_string()),
            }),
            Err(e) => Err(e.clone()),
        }
    }
}

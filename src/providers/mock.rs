//! Offline, deterministic generation service.
//!
//! Failure injection for exercising the run chain:
//! - `JANUS_MOCK_FAIL_AT`: 1-based call number that fails
//! - `JANUS_MOCK_FAILURE`: `credential`, `blocked` or `transient` (default)

use async_trait::async_trait;
use log::debug;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{GenerationRequest, GenerationService};
use crate::core::error::GenerationError;

pub const FAIL_AT_ENV: &str = "JANUS_MOCK_FAIL_AT";
pub const FAILURE_KIND_ENV: &str = "JANUS_MOCK_FAILURE";

/// Generation service that echoes a summary of each prompt
#[derive(Debug)]
pub struct MockService {
    model: String,
    calls: AtomicUsize,
    fail_at: Option<usize>,
    failure: GenerationError,
}

impl MockService {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            calls: AtomicUsize::new(0),
            fail_at: None,
            failure: GenerationError::transient("mock failure"),
        }
    }

    /// Fail the given 1-based call with `failure`
    pub fn failing_at(mut self, call: usize, failure: GenerationError) -> Self {
        self.fail_at = Some(call);
        self.failure = failure;
        self
    }

    /// Build from the failure-injection environment variables
    pub fn from_env(model: &str) -> Self {
        let service = Self::new(model);
        let fail_at = std::env::var(FAIL_AT_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok());
        match fail_at {
            Some(call) => {
                let kind = std::env::var(FAILURE_KIND_ENV).unwrap_or_default();
                service.failing_at(call, failure_for(&kind))
            }
            None => service,
        }
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn failure_for(kind: &str) -> GenerationError {
    match kind.trim().to_ascii_lowercase().as_str() {
        "credential" => GenerationError::credential("API key not valid"),
        "blocked" => GenerationError::Blocked {
            message: "response was blocked".to_string(),
            feedback: Some("block_reason: SAFETY".to_string()),
        },
        _ => GenerationError::transient("mock service unavailable"),
    }
}

#[async_trait]
impl GenerationService for MockService {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Mock generation call {} ({} chars)", call, request.prompt.len());

        if self.fail_at == Some(call) {
            return Err(self.failure.clone());
        }
        if request.credential.trim().is_empty() {
            return Err(GenerationError::credential("no API key supplied"));
        }

        let opening = request
            .prompt
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap_or_default();
        let mut text = format!(
            "## Mock response {} ({})\n\nPrompt opened with: {}\nPrompt length: {} chars",
            call,
            self.model,
            opening,
            request.prompt.len()
        );
        if let Some(attachment) = &request.attachment {
            text.push_str(&format!(
                "\nAttachment: {} ({} bytes)",
                attachment.mime_type,
                attachment.data.len()
            ));
        }
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_echoes_prompt_opening() {
        let service = MockService::new("mock-1");
        let text = service
            .generate(GenerationRequest::text("\nAnalyze this.\nMore.", "key"))
            .await
            .unwrap();
        assert!(text.contains("Mock response 1 (mock-1)"));
        assert!(text.contains("Prompt opened with: Analyze this."));
        assert_eq!(service.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_fails_at_requested_call() {
        let service = MockService::new("mock-1").failing_at(2, failure_for("blocked"));
        assert!(service.generate(GenerationRequest::text("a", "k")).await.is_ok());
        let err = service
            .generate(GenerationRequest::text("b", "k"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Blocked { .. }));
        assert!(service.generate(GenerationRequest::text("c", "k")).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_rejects_blank_credential() {
        let service = MockService::new("mock-1");
        let err = service
            .generate(GenerationRequest::text("a", " "))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Credential { .. }));
    }
}

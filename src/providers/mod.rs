// File: src/providers/mod.rs
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::core::config::{GenerationConfig, TranscriptConfig};
use crate::core::error::GenerationError;
use crate::work::MediaAttachment;

pub mod command;
pub mod mock;
pub mod transcript;

pub use command::CommandService;
pub use mock::MockService;
pub use transcript::{TranscriptLogger, TranscribedService};

/// A single call to the generation service
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Instruction text; always present
    pub prompt: String,
    /// Media content part, present only for image or audio works
    pub attachment: Option<MediaAttachment>,
    /// Credential forwarded to the service
    pub credential: String,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            attachment: None,
            credential: credential.into(),
        }
    }

    pub fn with_attachment(mut self, attachment: Option<MediaAttachment>) -> Self {
        self.attachment = attachment;
        self
    }
}

/// The external generation service.
///
/// Implementations perform one blocking round trip per call and never retry;
/// timeouts are their responsibility.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generate text for the request
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;

    /// Short name used in logs and transcripts
    fn name(&self) -> &'static str;
}

/// Factory for creating the configured generation service
pub struct ServiceFactory;

impl ServiceFactory {
    /// Create a service from configuration, wrapped with transcript logging
    /// when enabled
    pub fn create(
        config: &GenerationConfig,
        transcript: &TranscriptConfig,
    ) -> Result<Arc<dyn GenerationService>> {
        let inner: Arc<dyn GenerationService> = match config.provider.as_str() {
            "mock" => Arc::new(MockService::from_env(&config.model)),
            "command" => Arc::new(CommandService::from_config(config)?),
            other => bail!(
                "Unsupported generation provider '{}': expected \"mock\" or \"command\"",
                other
            ),
        };

        if transcript.enabled {
            let logger = Arc::new(TranscriptLogger::new(transcript.clone())?);
            Ok(Arc::new(TranscribedService::new(
                inner,
                config.model.clone(),
                logger,
            )))
        } else {
            Ok(inner)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;

    #[test]
    fn test_factory_creates_mock_service() {
        let config = Config::for_testing();
        let service = ServiceFactory::create(&config.generation, &config.transcript).unwrap();
        assert_eq!(service.name(), "mock");
    }

    #[test]
    fn test_factory_rejects_unknown_provider() {
        let mut config = Config::for_testing();
        config.generation.provider = "telepathy".to_string();
        let err = ServiceFactory::create(&config.generation, &config.transcript)
            .err()
            .unwrap();
        assert!(err.to_string().contains("Unsupported generation provider"));
    }

    #[test]
    fn test_factory_requires_command_program() {
        let mut config = Config::for_testing();
        config.generation.provider = "command".to_string();
        assert!(ServiceFactory::create(&config.generation, &config.transcript).is_err());
    }
}

use thiserror::Error;

use crate::orchestrator::RunStep;

/// Custom error types for the Janus engine
#[derive(Error, Debug)]
pub enum JanusError {
    /// The lens selection does not fit the active analysis mode
    #[error("Selection incomplete: {0}")]
    SelectionIncomplete(String),

    /// Credential or work payload absent at execution time
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// The generation service failed; `message` is the user-facing text
    #[error("{message}")]
    Generation {
        step: RunStep,
        message: String,
        #[source]
        source: GenerationError,
    },

    /// The lens catalog is malformed or a lens key is unknown to it
    #[error("Construction defect: {0}")]
    ConstructionDefect(String),
}

impl JanusError {
    /// The generation failure behind this error, if any
    pub fn generation_failure(&self) -> Option<&GenerationError> {
        match self {
            JanusError::Generation { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Step at which a run halted, if it halted inside the generation chain
    pub fn failed_step(&self) -> Option<RunStep> {
        match self {
            JanusError::Generation { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Normalized generation-service errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Authentication error: {message}")]
    Credential { message: String },

    #[error("Content blocked: {message}")]
    Blocked {
        message: String,
        feedback: Option<String>,
    },

    #[error("Service error: {message}")]
    Transient { message: String },

    #[error("Generation timed out after {timeout_secs} s")]
    Timeout { timeout_secs: u64 },
}

impl GenerationError {
    /// Convenience to construct a Transient error
    pub fn transient(message: impl Into<String>) -> Self {
        GenerationError::Transient {
            message: message.into(),
        }
    }

    /// Convenience to construct a Credential error
    pub fn credential(message: impl Into<String>) -> Self {
        GenerationError::Credential {
            message: message.into(),
        }
    }

    /// Text shown to the user when this failure halts a run
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Credential { message } => format!(
                "The generation service rejected the credential. Please check your API key. ({})",
                message
            ),
            GenerationError::Blocked {
                message,
                feedback: Some(feedback),
            } => format!("Generation blocked. Feedback: {} ({})", feedback, message),
            GenerationError::Blocked {
                message,
                feedback: None,
            } => format!("Generation blocked. ({})", message),
            GenerationError::Transient { message } => message.clone(),
            GenerationError::Timeout { .. } => self.to_string(),
        }
    }
}

// File: src/providers/command.rs
//! Generation service backed by an external program.
//!
//! Each call spawns the configured command, writes a JSON request to its
//! stdin and reads the generated text from stdout. The credential travels in
//! the `JANUS_API_KEY` environment variable.
//!
//! Exit status mapping: 0 is success, 77 is a credential rejection, 65 is a
//! content-safety block (stderr carries the feedback), anything else is a
//! transient error.

use anyhow::{bail, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, warn};
use serde_json::{json, Value as JsonValue};
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use super::{GenerationRequest, GenerationService};
use crate::core::config::{GenerationConfig, API_KEY_ENV};
use crate::core::error::GenerationError;

pub const EXIT_CREDENTIAL: i32 = 77;
pub const EXIT_BLOCKED: i32 = 65;

/// Delegates generation to an external program
#[derive(Debug, Clone)]
pub struct CommandService {
    program: String,
    args: Vec<String>,
    model: String,
    timeout_secs: u64,
}

impl CommandService {
    pub fn from_config(cfg: &GenerationConfig) -> Result<Self> {
        let Some((program, args)) = cfg.command.split_first() else {
            bail!("generation.command must name a program when provider = \"command\"");
        };
        if program.trim().is_empty() {
            bail!("generation.command has an empty program name");
        }
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            model: cfg.model.clone(),
            timeout_secs: cfg.timeout_seconds,
        })
    }

    fn request_body(&self, req: &GenerationRequest) -> JsonValue {
        let mut body = json!({
            "model": self.model,
            "prompt": req.prompt,
        });
        if let Some(attachment) = &req.attachment {
            body["attachment"] = json!({
                "mime_type": attachment.mime_type,
                "name": attachment.name,
                "data": STANDARD.encode(&attachment.data),
            });
        }
        body
    }

    async fn run(&self, req: &GenerationRequest) -> Result<String, GenerationError> {
        let payload = serde_json::to_vec(&self.request_body(req))
            .map_err(|e| GenerationError::transient(format!("Failed to encode request: {}", e)))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env(API_KEY_ENV, &req.credential)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                GenerationError::transient(format!("Failed to start '{}': {}", self.program, e))
            })?;

        let stdin = child.stdin.take();
        let send = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&payload).await?;
                // Closing stdin signals the end of the request
                drop(stdin);
            }
            Ok::<(), std::io::Error>(())
        };

        // Output is drained while the request is still being written
        let (sent, output) = tokio::join!(send, child.wait_with_output());
        let output = output
            .map_err(|e| GenerationError::transient(format!("Generator did not finish: {}", e)))?;

        match sent {
            Ok(()) => {}
            // The generator may exit before reading its input; its status decides
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                debug!("Generator '{}' closed stdin early", self.program);
            }
            Err(e) => {
                return Err(GenerationError::transient(format!(
                    "Failed to send request: {}",
                    e
                )))
            }
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        match output.status.code() {
            Some(0) => {
                let text = String::from_utf8_lossy(&output.stdout).into_owned();
                if text.trim().is_empty() {
                    Err(GenerationError::transient("The generator returned an empty response"))
                } else {
                    Ok(text)
                }
            }
            Some(EXIT_CREDENTIAL) => Err(GenerationError::credential(non_empty_or(
                stderr,
                "credential rejected",
            ))),
            Some(EXIT_BLOCKED) => Err(GenerationError::Blocked {
                message: "the generator refused the content".to_string(),
                feedback: (!stderr.is_empty()).then_some(stderr),
            }),
            Some(code) => Err(GenerationError::transient(format!(
                "Generator exited with status {}: {}",
                code,
                non_empty_or(stderr, "no diagnostics")
            ))),
            None => Err(GenerationError::transient(
                "Generator was terminated by a signal",
            )),
        }
    }
}

fn non_empty_or(text: String, fallback: &str) -> String {
    if text.is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

#[async_trait]
impl GenerationService for CommandService {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        debug!(
            "Running generator '{}' ({} prompt chars, attachment: {})",
            self.program,
            request.prompt.len(),
            request.attachment.is_some()
        );
        match timeout(Duration::from_secs(self.timeout_secs), self.run(&request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "Generator '{}' timed out after {} s",
                    self.program, self.timeout_secs
                );
                Err(GenerationError::Timeout {
                    timeout_secs: self.timeout_secs,
                })
            }
        }
    }

    fn name(&self) -> &'static str {
        "command"
    }
}

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::prelude::*;
use log::{info, warn};
use std::fs::{self, create_dir_all, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use super::{GenerationRequest, GenerationService};
use crate::core::config::TranscriptConfig;
use crate::core::error::GenerationError;

const FILE_PREFIX: &str = "janus_transcript_";

/// Records generation exchanges to a transcript file
pub struct TranscriptLogger {
    config: TranscriptConfig,

    /// Current transcript file path
    log_file_path: Option<PathBuf>,

    log_file: Option<Arc<Mutex<File>>>,
}

impl TranscriptLogger {
    /// Create a new transcript logger with the given configuration
    pub fn new(config: TranscriptConfig) -> Result<Self> {
        let mut logger = Self {
            config,
            log_file_path: None,
            log_file: None,
        };

        if logger.config.enabled {
            logger.initialize_logging()?;
        }

        Ok(logger)
    }

    /// Path of the transcript file, once logging is initialised
    pub fn log_file_path(&self) -> Option<&Path> {
        self.log_file_path.as_deref()
    }

    fn initialize_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(&self.config.log_dir);
        create_dir_all(log_dir)
            .with_context(|| format!("Failed to create transcript directory: {:?}", log_dir))?;

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S%.3f").to_string();
        let log_file_path = log_dir.join(format!("{}{}.txt", FILE_PREFIX, timestamp));

        let file = File::create(&log_file_path)
            .with_context(|| format!("Failed to create transcript file: {:?}", log_file_path))?;

        self.log_file_path = Some(log_file_path.clone());
        self.log_file = Some(Arc::new(Mutex::new(file)));

        info!("Transcript logging initialized. Log file: {:?}", log_file_path);

        self.clean_old_logs()?;

        Ok(())
    }

    /// Log a request to the generation service
    pub fn log_request(&self, service: &str, model: &str, request: &GenerationRequest) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let mut entry = format!("\n===== REQUEST: {} {} =====\n", service, model);
        entry.push_str(&format!("TIMESTAMP: {}\n", timestamp));
        if let Some(attachment) = &request.attachment {
            entry.push_str(&format!(
                "ATTACHMENT: {} ({} bytes)\n",
                attachment.mime_type,
                attachment.data.len()
            ));
        }

        if self.config.include_full_prompts {
            entry.push_str(&format!("PROMPT:\n{}\n", request.prompt));
        } else {
            entry.push_str(&format!("PROMPT SUMMARY: {}\n", summarize(&request.prompt)));
        }

        self.emit(&entry)
    }

    /// Log the outcome of a generation call
    pub fn log_response(
        &self,
        service: &str,
        model: &str,
        outcome: &Result<String, GenerationError>,
        duration_ms: u64,
    ) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let mut entry = format!("\n===== RESPONSE: {} {} =====\n", service, model);
        entry.push_str(&format!("TIMESTAMP: {}\n", timestamp));
        entry.push_str(&format!("DURATION: {}ms\n", duration_ms));

        match outcome {
            Ok(text) if self.config.include_full_responses => {
                entry.push_str(&format!("RESPONSE:\n{}\n", text));
            }
            Ok(text) => {
                entry.push_str(&format!("RESPONSE SUMMARY: {}\n", summarize(text)));
            }
            Err(err) => {
                entry.push_str(&format!("FAILURE: {}\n", err));
            }
        }

        self.emit(&entry)
    }

    fn emit(&self, entry: &str) -> Result<()> {
        self.write_to_log(entry)?;

        // Echo through the logger so stdout stays reserved for results
        if self.config.console_logging {
            info!("{}", entry.trim_end());
        }

        Ok(())
    }

    fn write_to_log(&self, text: &str) -> Result<()> {
        if let Some(file) = &self.log_file {
            let mut file_guard = file.lock().map_err(|_| {
                io::Error::new(io::ErrorKind::Other, "Failed to acquire lock on transcript file")
            })?;

            file_guard
                .write_all(text.as_bytes())
                .with_context(|| "Failed to write to transcript file")?;

            file_guard
                .flush()
                .with_context(|| "Failed to flush transcript file")?;
        }

        Ok(())
    }

    /// Keep only the newest `log_files_to_keep` transcripts
    fn clean_old_logs(&self) -> Result<()> {
        let log_dir = Path::new(&self.config.log_dir);

        let entries = fs::read_dir(log_dir)
            .with_context(|| format!("Failed to read transcript directory: {:?}", log_dir))?;

        let mut log_files = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            if path.is_file()
                && path.extension().is_some_and(|ext| ext == "txt")
                && path
                    .file_name()
                    .is_some_and(|name| name.to_string_lossy().starts_with(FILE_PREFIX))
            {
                // Names embed a sortable timestamp
                log_files.push(path);
            }
        }

        // Newest first
        log_files.sort_by(|a, b| b.cmp(a));

        let keep = self.config.log_files_to_keep.max(1) as usize;
        for path in log_files.iter().skip(keep) {
            fs::remove_file(path)
                .with_context(|| format!("Failed to delete old transcript: {:?}", path))?;

            info!("Deleted old transcript: {:?}", path);
        }

        Ok(())
    }
}

fn summarize(text: &str) -> String {
    if text.chars().count() > 100 {
        let head: String = text.chars().take(100).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Generation service decorator that writes every exchange to a transcript
pub struct TranscribedService {
    inner: Arc<dyn GenerationService>,
    model: String,
    logger: Arc<TranscriptLogger>,
}

impl TranscribedService {
    pub fn new(inner: Arc<dyn GenerationService>, model: String, logger: Arc<TranscriptLogger>) -> Self {
        Self {
            inner,
            model,
            logger,
        }
    }
}

#[async_trait]
impl GenerationService for TranscribedService {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let service = self.inner.name();
        if let Err(e) = self.logger.log_request(service, &self.model, &request) {
            warn!("Failed to record transcript request: {}", e);
        }

        let started = Instant::now();
        let outcome = self.inner.generate(request).await;
        let elapsed = started.elapsed().as_millis() as u64;

        if let Err(e) = self
            .logger
            .log_response(service, &self.model, &outcome, elapsed)
        {
            warn!("Failed to record transcript response: {}", e);
        }
        outcome
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockService;
    use tempfile::tempdir;

    fn config_in(dir: &Path) -> TranscriptConfig {
        TranscriptConfig {
            enabled: true,
            log_dir: dir.to_string_lossy().into_owned(),
            include_full_prompts: true,
            include_full_responses: false,
            console_logging: false,
            log_files_to_keep: 2,
        }
    }

    #[tokio::test]
    async fn test_transcript_records_exchange() -> Result<()> {
        let dir = tempdir()?;
        let logger = Arc::new(TranscriptLogger::new(config_in(dir.path()))?);
        let service = TranscribedService::new(
            Arc::new(MockService::new("mock-1")),
            "mock-1".to_string(),
            logger.clone(),
        );

        let text = service
            .generate(GenerationRequest::text("Analyze the dunes.", "key"))
            .await
            .unwrap();
        assert!(text.contains("Mock response 1"));

        let written = fs::read_to_string(logger.log_file_path().unwrap())?;
        assert!(written.contains("===== REQUEST: mock mock-1 ====="));
        assert!(written.contains("PROMPT:\nAnalyze the dunes."));
        assert!(written.contains("RESPONSE SUMMARY: ## Mock response 1"));
        Ok(())
    }

    #[tokio::test]
    async fn test_transcript_records_failures() -> Result<()> {
        let dir = tempdir()?;
        let logger = Arc::new(TranscriptLogger::new(config_in(dir.path()))?);
        let service = TranscribedService::new(
            Arc::new(
                MockService::new("mock-1").failing_at(1, GenerationError::transient("overloaded")),
            ),
            "mock-1".to_string(),
            logger.clone(),
        );

        assert!(service
            .generate(GenerationRequest::text("p", "key"))
            .await
            .is_err());
        let written = fs::read_to_string(logger.log_file_path().unwrap())?;
        assert!(written.contains("FAILURE: Service error: overloaded"));
        Ok(())
    }

    #[test]
    fn test_old_transcripts_are_rotated() -> Result<()> {
        let dir = tempdir()?;
        for stamp in ["20200101_000000.000", "20200102_000000.000", "20200103_000000.000"] {
            fs::write(dir.path().join(format!("{}{}.txt", FILE_PREFIX, stamp)), "old")?;
        }
        fs::write(dir.path().join("notes.txt"), "keep me")?;

        let logger = TranscriptLogger::new(config_in(dir.path()))?;

        let remaining: Vec<String> = fs::read_dir(dir.path())?
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(FILE_PREFIX))
            .collect();
        assert_eq!(remaining.len(), 2);
        assert!(logger.log_file_path().unwrap().exists());
        assert!(!dir
            .path()
            .join(format!("{}20200101_000000.000.txt", FILE_PREFIX))
            .exists());
        assert!(dir.path().join("notes.txt").exists());
        Ok(())
    }

    #[test]
    fn test_summary_truncates_on_char_boundary() {
        let long = "é".repeat(150);
        let summary = summarize(&long);
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), 103);
    }
}

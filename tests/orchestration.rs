use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use janus::core::error::{GenerationError, JanusError};
use janus::lenses::LensCatalog;
use janus::orchestrator::{LensSelection, Orchestrator, RunOutcome, RunPhase, RunRequest, RunStep};
use janus::providers::{GenerationRequest, GenerationService, MockService};
use janus::work::{MediaAttachment, Work};

/// Records every request and answers from a script
struct RecordingService {
    requests: Mutex<Vec<GenerationRequest>>,
    replies: Mutex<Vec<Result<String, GenerationError>>>,
}

impl RecordingService {
    fn new(replies: Vec<Result<String, GenerationError>>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            replies: Mutex::new(replies.into_iter().rev().collect()),
        })
    }

    fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationService for RecordingService {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(GenerationError::transient("script exhausted")))
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

fn catalog() -> Arc<LensCatalog> {
    Arc::new(LensCatalog::builtin().expect("built-in catalog is well formed"))
}

fn dunes() -> Work {
    Work::text(
        Some("Dunes".to_string()),
        "The wind moves the sand without moving itself.",
    )
}

#[tokio::test]
async fn test_single_taoist_run_end_to_end() {
    let catalog = catalog();
    let service = RecordingService::new(vec![Ok("The sand *is* the Tao.".to_string())]);
    let mut orchestrator = Orchestrator::new(Arc::clone(&catalog), service.clone());

    let outcome = orchestrator
        .run(RunRequest::new(
            LensSelection::single("Philosophical (Taoist)"),
            dunes(),
            "secret",
        ))
        .await
        .unwrap();

    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    let prompt = &requests[0].prompt;
    assert!(prompt.contains(catalog.template("Philosophical (Taoist)").unwrap()));
    assert!(prompt.contains("Dunes"));
    assert!(prompt.contains("The wind moves the sand without moving itself."));
    assert_eq!(requests[0].credential, "secret");
    assert!(requests[0].attachment.is_none());

    assert_eq!(outcome.text(), "The sand *is* the Tao.");
    assert_eq!(orchestrator.phase(), RunPhase::Done);
}

#[tokio::test]
async fn test_marxist_feminist_dialogue_end_to_end() {
    let service = RecordingService::new(vec![
        Ok("Labour shapes the dunes.".to_string()),
        Ok("The wind is gendered.".to_string()),
        Ok("**The Marxist Critic:** ...".to_string()),
    ]);
    let mut orchestrator = Orchestrator::new(catalog(), service.clone());

    let outcome = orchestrator
        .run(RunRequest::new(
            LensSelection::dialectical("Socio-Political (Marxist)", "Socio-Political (Feminist)"),
            dunes(),
            "secret",
        ))
        .await
        .unwrap();

    let requests = service.requests();
    assert_eq!(requests.len(), 3);
    let synthesis = &requests[2].prompt;
    assert!(synthesis.contains("The Marxist Critic"));
    assert!(synthesis.contains("The Feminist Critic"));
    assert!(synthesis.contains("Aufheben / Synthesis"));
    assert!(synthesis.contains("Labour shapes the dunes."));
    assert!(synthesis.contains("The wind is gendered."));

    match outcome {
        RunOutcome::Dialectical {
            thesis,
            antithesis,
            dialogue,
        } => {
            assert_eq!(thesis.text, "Labour shapes the dunes.");
            assert_eq!(antithesis.persona, "The Feminist Critic");
            assert_eq!(dialogue, "**The Marxist Critic:** ...");
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn test_first_failure_makes_exactly_one_call() {
    let service = RecordingService::new(vec![
        Err(GenerationError::credential("API key not valid")),
        Ok("never used".to_string()),
        Ok("never used".to_string()),
    ]);
    let mut orchestrator = Orchestrator::new(catalog(), service.clone());

    let err = orchestrator
        .run(RunRequest::new(
            LensSelection::dialectical("Psychological (Jungian)", "Psychological (Freudian)"),
            dunes(),
            "secret",
        ))
        .await
        .unwrap_err();

    assert_eq!(service.requests().len(), 1);
    assert_eq!(err.failed_step(), Some(RunStep::Analysis(0)));
    assert!(matches!(
        err.generation_failure(),
        Some(GenerationError::Credential { .. })
    ));
}

#[tokio::test]
async fn test_parallel_run_still_reports_first_analysis() {
    let service = Arc::new(MockService::new("m").failing_at(1, GenerationError::transient("boom")));
    let mut orchestrator =
        Orchestrator::new(catalog(), service.clone()).with_parallel_analyses(true);

    let err = orchestrator
        .run(RunRequest::new(
            LensSelection::dialectical("Philosophical (Stoicism)", "Philosophical (Platonism)"),
            dunes(),
            "secret",
        ))
        .await
        .unwrap_err();

    // both analyses were in flight, synthesis never ran
    assert_eq!(service.call_count(), 2);
    assert!(matches!(err, JanusError::Generation { .. }));
    assert!(!orchestrator.history().contains(&RunPhase::Synthesizing));
}

#[tokio::test]
async fn test_image_work_travels_as_attachment() {
    let service = RecordingService::new(vec![Ok("A red square.".to_string())]);
    let mut orchestrator = Orchestrator::new(catalog(), service.clone());

    let image = Work::image(
        None,
        MediaAttachment {
            mime_type: "image/png".to_string(),
            name: Some("square.png".to_string()),
            data: vec![1, 2, 3],
        },
    );
    orchestrator
        .run(RunRequest::new(LensSelection::single("Structural & Formalist"), image, "k"))
        .await
        .unwrap();

    let request = &service.requests()[0];
    assert_eq!(request.attachment.as_ref().unwrap().data, vec![1, 2, 3]);
    assert!(request.prompt.contains("Title: (Untitled)"));
    let description = request.prompt.find("objective description").unwrap();
    let lens = request.prompt.find("Structural").unwrap();
    assert!(description < lens);
}

#[tokio::test]
async fn test_symposium_failure_halts_remaining_analyses() {
    let service = RecordingService::new(vec![
        Ok("one".to_string()),
        Err(GenerationError::Blocked {
            message: "blocked".to_string(),
            feedback: Some("SAFETY".to_string()),
        }),
    ]);
    let mut orchestrator = Orchestrator::new(catalog(), service.clone());

    let err = orchestrator
        .run(RunRequest::new(
            LensSelection::symposium([
                "Ethical Frameworks (Utilitarianism)",
                "Ethical Frameworks (Virtue Ethics)",
                "Historical & Biographical",
            ]),
            dunes(),
            "k",
        ))
        .await
        .unwrap_err();

    assert_eq!(service.requests().len(), 2);
    assert_eq!(err.failed_step(), Some(RunStep::Analysis(1)));
    assert!(err.to_string().contains("SAFETY"));
}

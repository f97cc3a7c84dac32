//! Orchestrator - sequences the generation calls of a run.
//!
//! A run is prepared (guards checked, lenses resolved) and then executed as a
//! chain of analysis calls followed, for multi-analysis modes, by one synthesis
//! call. The first failing call halts the chain.

use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

use crate::core::error::{GenerationError, JanusError};
use crate::lenses::{Lens, LensCatalog};
use crate::prompts::{
    build_analysis_request, build_comparative_prompt, build_symposium_prompt,
    build_synthesis_prompt,
};
use crate::providers::{GenerationRequest, GenerationService};
use crate::work::Work;

pub mod outcome;
pub mod phase;
pub mod selection;

pub use outcome::{Analysis, RunOutcome};
pub use phase::{RunPhase, RunStep};
pub use selection::{AnalysisMode, LensSelection, SYMPOSIUM_MIN_LENSES};

/// Everything a user supplies for one run
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub selection: LensSelection,
    pub work: Work,
    /// Second work, used only in comparative mode
    pub second_work: Option<Work>,
    pub credential: Option<String>,
}

impl RunRequest {
    pub fn new(selection: LensSelection, work: Work, credential: impl Into<String>) -> Self {
        Self {
            selection,
            work,
            second_work: None,
            credential: Some(credential.into()),
        }
    }

    pub fn with_second_work(mut self, work: Work) -> Self {
        self.second_work = Some(work);
        self
    }
}

/// A run whose guards all passed
#[derive(Debug, Clone)]
pub struct ReadyRun {
    mode: AnalysisMode,
    lenses: Vec<Lens>,
    work: Work,
    second_work: Option<Work>,
    credential: String,
}

impl ReadyRun {
    /// (lens, work) pairs in the order they are analysed
    fn jobs(&self) -> Vec<(&Lens, &Work)> {
        match (self.mode, &self.second_work) {
            (AnalysisMode::Comparative, Some(second)) => {
                vec![(&self.lenses[0], &self.work), (&self.lenses[0], second)]
            }
            _ => self.lenses.iter().map(|lens| (lens, &self.work)).collect(),
        }
    }
}

/// Drives runs against a generation service
pub struct Orchestrator {
    catalog: Arc<LensCatalog>,
    service: Arc<dyn GenerationService>,
    parallel_analyses: bool,
    phase: RunPhase,
    history: Vec<RunPhase>,
}

impl Orchestrator {
    pub fn new(catalog: Arc<LensCatalog>, service: Arc<dyn GenerationService>) -> Self {
        Self {
            catalog,
            service,
            parallel_analyses: false,
            phase: RunPhase::Idle,
            history: vec![RunPhase::Idle],
        }
    }

    /// Run the two analyses of a dialectical or comparative run concurrently
    pub fn with_parallel_analyses(mut self, parallel: bool) -> Self {
        self.parallel_analyses = parallel;
        self
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Phases visited by the current (or last) run
    pub fn history(&self) -> &[RunPhase] {
        &self.history
    }

    /// Check the guards for entering `Ready` and resolve the selected lenses.
    ///
    /// On a guard failure the orchestrator stays in `AwaitingSelection` and no
    /// call is made.
    pub fn prepare(&mut self, request: &RunRequest) -> Result<ReadyRun, JanusError> {
        self.phase = RunPhase::Idle;
        self.history = vec![RunPhase::Idle];
        self.transition(RunPhase::AwaitingSelection);

        let mode = request.selection.mode;
        let lenses: Vec<Lens> = request
            .selection
            .resolve(&self.catalog)?
            .into_iter()
            .cloned()
            .collect();

        let credential = request
            .credential
            .as_deref()
            .map(str::trim)
            .filter(|credential| !credential.is_empty())
            .ok_or_else(|| {
                JanusError::MissingInput("no credential configured for the generation service".to_string())
            })?
            .to_string();

        if !request.work.is_ready() {
            return Err(JanusError::MissingInput(format!(
                "the {} work is empty",
                request.work.modality()
            )));
        }

        let second_work = match mode {
            AnalysisMode::Comparative => match &request.second_work {
                Some(work) if work.is_ready() => Some(work.clone()),
                Some(work) => {
                    return Err(JanusError::MissingInput(format!(
                        "the second {} work is empty",
                        work.modality()
                    )))
                }
                None => {
                    return Err(JanusError::MissingInput(
                        "comparative mode needs a second work".into(),
                    ))
                }
            },
            _ => {
                if request.second_work.is_some() {
                    debug!("Ignoring second work outside comparative mode");
                }
                None
            }
        };

        self.transition(RunPhase::Ready);
        Ok(ReadyRun {
            mode,
            lenses,
            work: request.work.clone(),
            second_work,
            credential,
        })
    }

    /// Execute a prepared run
    pub async fn execute(&mut self, run: ReadyRun) -> Result<RunOutcome, JanusError> {
        if self.phase != RunPhase::Ready {
            return Err(JanusError::ConstructionDefect(format!(
                "run executed while {}",
                self.phase
            )));
        }

        info!(
            "Starting {} run with {} lens(es)",
            run.mode,
            run.lenses.len()
        );

        let jobs = run.jobs();
        let analyses = if self.parallel_analyses && jobs.len() == 2 {
            self.run_pair(&run, &jobs).await?
        } else {
            self.run_sequential(&run, &jobs).await?
        };

        if run.mode == AnalysisMode::Single {
            let analysis = analyses.into_iter().next().ok_or_else(|| {
                JanusError::ConstructionDefect("single run produced no analysis".into())
            })?;
            self.transition(RunPhase::Done);
            return Ok(RunOutcome::Single { analysis });
        }

        self.transition(RunPhase::Synthesizing);
        let prompt = synthesis_prompt(run.mode, &analyses);
        let service = Arc::clone(&self.service);
        let request = GenerationRequest::text(prompt, run.credential.as_str());
        let synthesis = match call(service.as_ref(), RunStep::Synthesis, request).await {
            Ok(text) => text,
            Err(err) => return Err(self.fail(run.mode, RunStep::Synthesis, None, err)),
        };

        let outcome = assemble(run.mode, analyses, synthesis)?;
        self.transition(RunPhase::Done);
        Ok(outcome)
    }

    /// Prepare and execute in one go
    pub async fn run(&mut self, request: RunRequest) -> Result<RunOutcome, JanusError> {
        let ready = self.prepare(&request)?;
        self.execute(ready).await
    }

    async fn run_sequential(
        &mut self,
        run: &ReadyRun,
        jobs: &[(&Lens, &Work)],
    ) -> Result<Vec<Analysis>, JanusError> {
        let service = Arc::clone(&self.service);
        let mut analyses = Vec::with_capacity(jobs.len());

        for (index, (lens, work)) in jobs.iter().enumerate() {
            self.transition(RunPhase::running(index));
            match analyse(service.as_ref(), index, lens, work, &run.credential).await {
                Ok(analysis) => analyses.push(analysis),
                Err(err) => {
                    return Err(self.fail(run.mode, RunStep::Analysis(index), Some(&lens.key), err))
                }
            }
        }

        Ok(analyses)
    }

    async fn run_pair(
        &mut self,
        run: &ReadyRun,
        jobs: &[(&Lens, &Work)],
    ) -> Result<Vec<Analysis>, JanusError> {
        let service = Arc::clone(&self.service);
        let (lens_a, work_a) = jobs[0];
        let (lens_b, work_b) = jobs[1];

        self.transition(RunPhase::RunningA);
        self.transition(RunPhase::RunningB);
        debug!("Running analyses A and B concurrently");

        let (result_a, result_b) = tokio::join!(
            analyse(service.as_ref(), 0, lens_a, work_a, &run.credential),
            analyse(service.as_ref(), 1, lens_b, work_b, &run.credential)
        );

        match (result_a, result_b) {
            (Err(err), _) => Err(self.fail(run.mode, RunStep::Analysis(0), Some(&lens_a.key), err)),
            (Ok(_), Err(err)) => {
                Err(self.fail(run.mode, RunStep::Analysis(1), Some(&lens_b.key), err))
            }
            (Ok(a), Ok(b)) => Ok(vec![a, b]),
        }
    }

    fn transition(&mut self, next: RunPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal run transition {} -> {}",
            self.phase,
            next
        );
        info!("Run phase: {} -> {}", self.phase, next);
        self.phase = next;
        self.history.push(next);
    }

    /// Move to `Failed` and build the single user-facing message for the failure
    fn fail(
        &mut self,
        mode: AnalysisMode,
        step: RunStep,
        lens: Option<&str>,
        source: GenerationError,
    ) -> JanusError {
        let reason = source.user_message();
        let message = match (mode, step) {
            (AnalysisMode::Single, _) => {
                format!("An error occurred during analysis generation: {}", reason)
            }
            (_, RunStep::Analysis(_)) => format!(
                "Could not generate the initial analyses. Cannot proceed to {}. \
                 Failure in {} ({}): {}",
                mode.combining_stage(),
                step,
                lens.unwrap_or("unknown lens"),
                reason
            ),
            (_, RunStep::Synthesis) => format!(
                "An error occurred during {} synthesis: {}",
                mode.synthesis_kind(),
                reason
            ),
        };

        warn!("Run halted at {}: {}", step, source);
        self.transition(RunPhase::Failed);
        JanusError::Generation {
            step,
            message,
            source,
        }
    }
}

async fn call(
    service: &dyn GenerationService,
    step: RunStep,
    request: GenerationRequest,
) -> Result<String, GenerationError> {
    debug!("Sending {} ({} chars)", step, request.prompt.len());
    let start = Instant::now();
    let result = service.generate(request).await;
    debug!(
        "{} finished in {} ms ({})",
        step,
        start.elapsed().as_millis(),
        if result.is_ok() { "ok" } else { "failed" }
    );
    result
}

async fn analyse(
    service: &dyn GenerationService,
    index: usize,
    lens: &Lens,
    work: &Work,
    credential: &str,
) -> Result<Analysis, GenerationError> {
    let request = build_analysis_request(lens, work, credential);
    let text = call(service, RunStep::Analysis(index), request).await?;
    Ok(Analysis {
        lens: lens.key.clone(),
        persona: lens.persona(),
        work_title: work.display_title().to_string(),
        text,
    })
}

fn synthesis_prompt(mode: AnalysisMode, analyses: &[Analysis]) -> String {
    match mode {
        AnalysisMode::Comparative => build_comparative_prompt(
            &analyses[0].lens,
            &analyses[0].work_title,
            &analyses[0].text,
            &analyses[1].work_title,
            &analyses[1].text,
        ),
        AnalysisMode::Symposium => {
            let pairs: Vec<(&str, &str)> = analyses
                .iter()
                .map(|analysis| (analysis.lens.as_str(), analysis.text.as_str()))
                .collect();
            build_symposium_prompt(&pairs, &analyses[0].work_title)
        }
        AnalysisMode::Dialectical | AnalysisMode::Single => build_synthesis_prompt(
            &analyses[0].lens,
            &analyses[0].text,
            &analyses[1].lens,
            &analyses[1].text,
            &analyses[0].work_title,
        ),
    }
}

fn assemble(
    mode: AnalysisMode,
    analyses: Vec<Analysis>,
    synthesis: String,
) -> Result<RunOutcome, JanusError> {
    if mode == AnalysisMode::Symposium {
        return Ok(RunOutcome::Symposium {
            analyses,
            dialogue: synthesis,
        });
    }

    let [first, second]: [Analysis; 2] = analyses.try_into().map_err(|left: Vec<Analysis>| {
        JanusError::ConstructionDefect(format!("expected two analyses, got {}", left.len()))
    })?;

    Ok(match mode {
        AnalysisMode::Comparative => RunOutcome::Comparative {
            first,
            second,
            synthesis,
        },
        _ => RunOutcome::Dialectical {
            thesis: first,
            antithesis: second,
            dialogue: synthesis,
        },
    })
}

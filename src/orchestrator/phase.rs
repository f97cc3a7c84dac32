//! Run phases and generation steps.

use serde::Serialize;
use std::fmt;

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunPhase {
    Idle,
    /// Waiting for a complete lens selection
    AwaitingSelection,
    /// Guards satisfied, nothing sent yet
    Ready,
    /// First analysis in flight
    RunningA,
    /// Second analysis in flight
    RunningB,
    /// Further symposium analysis in flight (0-based index, >= 2)
    RunningExtra(usize),
    Synthesizing,
    Done,
    Failed,
}

impl RunPhase {
    /// Phase for the analysis at `index` in a run
    pub fn running(index: usize) -> Self {
        match index {
            0 => RunPhase::RunningA,
            1 => RunPhase::RunningB,
            n => RunPhase::RunningExtra(n),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Done | RunPhase::Failed)
    }

    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: RunPhase) -> bool {
        use RunPhase::*;
        match (*self, next) {
            (_, Failed) => !self.is_terminal(),
            (Idle, AwaitingSelection) | (Idle, Ready) => true,
            (AwaitingSelection, Ready) => true,
            (Ready, RunningA) => true,
            (RunningA, RunningB) | (RunningA, Done) => true,
            (RunningB, RunningExtra(2)) | (RunningB, Synthesizing) => true,
            (RunningExtra(n), RunningExtra(m)) => m == n + 1,
            (RunningExtra(_), Synthesizing) => true,
            (Synthesizing, Done) => true,
            // A finished run may be prepared again
            (Done, Idle) | (Failed, Idle) => true,
            _ => false,
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPhase::Idle => write!(f, "idle"),
            RunPhase::AwaitingSelection => write!(f, "awaiting selection"),
            RunPhase::Ready => write!(f, "ready"),
            RunPhase::RunningA => write!(f, "running analysis A"),
            RunPhase::RunningB => write!(f, "running analysis B"),
            RunPhase::RunningExtra(n) => write!(f, "running analysis {}", n + 1),
            RunPhase::Synthesizing => write!(f, "synthesizing"),
            RunPhase::Done => write!(f, "done"),
            RunPhase::Failed => write!(f, "failed"),
        }
    }
}

/// A generation call within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStep {
    /// The analysis at this 0-based position
    Analysis(usize),
    Synthesis,
}

impl fmt::Display for RunStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStep::Analysis(0) => write!(f, "analysis A"),
            RunStep::Analysis(1) => write!(f, "analysis B"),
            RunStep::Analysis(n) => write!(f, "analysis {}", n + 1),
            RunStep::Synthesis => write!(f, "synthesis"),
        }
    }
}

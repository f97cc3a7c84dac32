use serde::Serialize;

/// One completed analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub lens: String,
    pub persona: String,
    pub work_title: String,
    pub text: String,
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RunOutcome {
    Single {
        analysis: Analysis,
    },
    Dialectical {
        thesis: Analysis,
        antithesis: Analysis,
        dialogue: String,
    },
    Symposium {
        analyses: Vec<Analysis>,
        dialogue: String,
    },
    Comparative {
        first: Analysis,
        second: Analysis,
        synthesis: String,
    },
}

impl RunOutcome {
    /// The text to display, exactly as the service returned it
    pub fn text(&self) -> &str {
        match self {
            RunOutcome::Single { analysis } => &analysis.text,
            RunOutcome::Dialectical { dialogue, .. } => dialogue,
            RunOutcome::Symposium { dialogue, .. } => dialogue,
            RunOutcome::Comparative { synthesis, .. } => synthesis,
        }
    }

    /// Analyses a synthesis was built from; empty for a single-lens run
    pub fn sources(&self) -> Vec<&Analysis> {
        match self {
            RunOutcome::Single { .. } => Vec::new(),
            RunOutcome::Dialectical {
                thesis, antithesis, ..
            } => vec![thesis, antithesis],
            RunOutcome::Symposium { analyses, .. } => analyses.iter().collect(),
            RunOutcome::Comparative { first, second, .. } => vec![first, second],
        }
    }

    /// Markdown for display, optionally followed by the source analyses
    pub fn render_markdown(&self, include_sources: bool) -> String {
        let heading = match self {
            RunOutcome::Single { analysis } => {
                format!("# Analysis Result: {}", analysis.lens)
            }
            RunOutcome::Dialectical {
                thesis, antithesis, ..
            } => format!(
                "# Dialectical Dialogue Result: {} vs. {}",
                thesis.lens, antithesis.lens
            ),
            RunOutcome::Symposium { analyses, .. } => format!(
                "# Symposium Dialogue Result: {} perspectives",
                analyses.len()
            ),
            RunOutcome::Comparative { first, second, .. } => format!(
                "# Comparative Synthesis Result: {} vs. {} ({})",
                first.work_title, second.work_title, first.lens
            ),
        };

        let mut out = format!("{}\n\n{}\n", heading, self.text());

        let sources = self.sources();
        if include_sources && !sources.is_empty() {
            out.push_str("\n---\n\n## Source Analyses (Reference)\n");
            for source in sources {
                out.push_str(&format!(
                    "\n### {} on \"{}\" ({})\n\n{}\n",
                    source.lens, source.work_title, source.persona, source.text
                ));
            }
        }
        out
    }
}

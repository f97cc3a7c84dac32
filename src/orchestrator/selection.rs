//! Lens selection per analysis mode.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::core::error::JanusError;
use crate::lenses::{Lens, LensCatalog};

/// Minimum number of lenses in a symposium
pub const SYMPOSIUM_MIN_LENSES: usize = 3;

/// How the selected lenses are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// One lens, one work
    Single,
    /// Two lenses on one work, then a two-persona debate
    Dialectical,
    /// Three or more lenses on one work, then a multi-persona dialogue
    Symposium,
    /// One lens on two works, then a comparison
    Comparative,
}

impl AnalysisMode {
    /// Word used in synthesis failure messages
    pub fn synthesis_kind(&self) -> &'static str {
        match self {
            AnalysisMode::Single => "single-lens",
            AnalysisMode::Dialectical => "dialectical",
            AnalysisMode::Symposium => "symposium",
            AnalysisMode::Comparative => "comparative",
        }
    }

    /// Name of the stage that consumes the analyses
    pub fn combining_stage(&self) -> &'static str {
        match self {
            AnalysisMode::Comparative => "comparison",
            _ => "synthesis",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::Single => write!(f, "Single Lens"),
            AnalysisMode::Dialectical => write!(f, "Dialectical Dialogue"),
            AnalysisMode::Symposium => write!(f, "Symposium"),
            AnalysisMode::Comparative => write!(f, "Comparative Synthesis"),
        }
    }
}

/// Lens keys chosen for a mode; blank entries count as not chosen yet
#[derive(Debug, Clone, PartialEq)]
pub struct LensSelection {
    pub mode: AnalysisMode,
    pub lenses: Vec<String>,
}

impl LensSelection {
    pub fn new(mode: AnalysisMode, lenses: Vec<String>) -> Self {
        Self { mode, lenses }
    }

    pub fn single(lens: impl Into<String>) -> Self {
        Self::new(AnalysisMode::Single, vec![lens.into()])
    }

    pub fn dialectical(thesis: impl Into<String>, antithesis: impl Into<String>) -> Self {
        Self::new(
            AnalysisMode::Dialectical,
            vec![thesis.into(), antithesis.into()],
        )
    }

    pub fn symposium<I, S>(lenses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            AnalysisMode::Symposium,
            lenses.into_iter().map(Into::into).collect(),
        )
    }

    pub fn comparative(lens: impl Into<String>) -> Self {
        Self::new(AnalysisMode::Comparative, vec![lens.into()])
    }

    /// Check the selection is complete for its mode and resolve every key.
    ///
    /// An incomplete selection is `SelectionIncomplete`; a key the catalog
    /// does not know is a `ConstructionDefect`, since keys are expected to come
    /// from the catalog's own key list.
    pub fn resolve<'c>(&self, catalog: &'c LensCatalog) -> Result<Vec<&'c Lens>, JanusError> {
        let chosen: Vec<&str> = self
            .lenses
            .iter()
            .map(|key| key.trim())
            .filter(|key| !key.is_empty())
            .collect();

        if chosen.len() < self.lenses.len() {
            return Err(JanusError::SelectionIncomplete(
                "every lens slot must be filled".to_string(),
            ));
        }

        match self.mode {
            AnalysisMode::Single | AnalysisMode::Comparative if chosen.len() != 1 => {
                return Err(JanusError::SelectionIncomplete(format!(
                    "{} mode needs exactly one lens, got {}",
                    self.mode,
                    chosen.len()
                )));
            }
            AnalysisMode::Dialectical if chosen.len() != 2 => {
                return Err(JanusError::SelectionIncomplete(format!(
                    "{} mode needs exactly two lenses (thesis and antithesis), got {}",
                    self.mode,
                    chosen.len()
                )));
            }
            AnalysisMode::Symposium if chosen.len() < SYMPOSIUM_MIN_LENSES => {
                return Err(JanusError::SelectionIncomplete(format!(
                    "{} mode needs at least {} lenses, got {}",
                    self.mode,
                    SYMPOSIUM_MIN_LENSES,
                    chosen.len()
                )));
            }
            _ => {}
        }

        let distinct: HashSet<&str> = chosen.iter().copied().collect();
        if distinct.len() != chosen.len() {
            return Err(JanusError::SelectionIncomplete(
                "the selected lenses must be different".to_string(),
            ));
        }

        chosen.into_iter().map(|key| catalog.resolve(key)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> LensCatalog {
        LensCatalog::builtin().unwrap()
    }

    #[test]
    fn test_single_selection_resolves() {
        let catalog = catalog();
        let lenses = LensSelection::single("Philosophical (Taoist)")
            .resolve(&catalog)
            .unwrap();
        assert_eq!(lenses.len(), 1);
        assert_eq!(lenses[0].key, "Philosophical (Taoist)");
    }

    #[test]
    fn test_dialectical_requires_two_distinct_lenses() {
        let catalog = catalog();
        let same = LensSelection::dialectical("Comparative", "Comparative");
        assert!(matches!(
            same.resolve(&catalog),
            Err(JanusError::SelectionIncomplete(_))
        ));

        let missing_b = LensSelection::dialectical("Comparative", "");
        assert!(matches!(
            missing_b.resolve(&catalog),
            Err(JanusError::SelectionIncomplete(_))
        ));

        let one = LensSelection::new(AnalysisMode::Dialectical, vec!["Comparative".into()]);
        assert!(matches!(
            one.resolve(&catalog),
            Err(JanusError::SelectionIncomplete(_))
        ));

        let ok = LensSelection::dialectical("Socio-Political (Marxist)", "Socio-Political (Feminist)");
        assert_eq!(ok.resolve(&catalog).unwrap().len(), 2);
    }

    #[test]
    fn test_symposium_needs_three() {
        let catalog = catalog();
        let two = LensSelection::symposium(["Comparative", "Structural & Formalist"]);
        assert!(matches!(
            two.resolve(&catalog),
            Err(JanusError::SelectionIncomplete(_))
        ));

        let three = LensSelection::symposium([
            "Comparative",
            "Structural & Formalist",
            "Psychological (Jungian)",
        ]);
        assert_eq!(three.resolve(&catalog).unwrap().len(), 3);
    }

    #[test]
    fn test_unknown_key_is_a_construction_defect() {
        let catalog = catalog();
        let err = LensSelection::single("Psychological (Lacanian)")
            .resolve(&catalog)
            .unwrap_err();
        assert!(matches!(err, JanusError::ConstructionDefect(_)));
    }
}

//! Prompt composition for analysis and synthesis calls.

pub mod analysis;
pub mod synthesis;

pub use analysis::{build_analysis_prompt, build_analysis_request};
pub use synthesis::{
    build_comparative_prompt, build_symposium_prompt, build_synthesis_prompt, AUFHEBEN_HEADING,
    HOLISTIC_HEADING,
};

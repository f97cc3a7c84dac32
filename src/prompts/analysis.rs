//! Analysis request builder.

use crate::lenses::Lens;
use crate::providers::GenerationRequest;
use crate::work::{Work, WorkPayload};

/// Preamble for image works; description comes before interpretation
pub const IMAGE_INSTRUCTION: &str = "\
Important: You are analyzing a visual artwork (the attached image).
1. First, provide a detailed, objective description of the image (composition, colors, subjects, textures).
2. Then, apply the requested analytical lens to the visual evidence. Ensure your analysis refers directly to what is visible in the image.";

/// Preamble for audio works
pub const AUDIO_INSTRUCTION: &str = "\
Important: You are analyzing an audio work (the attached file).
1. First, provide a detailed, objective description of the audio.
   - If music: Analyze instrumentation, tempo, dynamics, structure, mood, and lyrics (if present).
   - If speech: Provide a summary or analysis of the content, and analyze tone, pacing, and rhetorical devices.
   - If soundscape: Describe the sonic environment, sound sources, and atmosphere.
2. Then, apply the requested analytical lens to the audio evidence. Ensure your analysis refers directly to what is audible in the file.";

/// Compose the prompt text for analysing `work` through `lens`.
///
/// Text works are embedded literally after a delimiter block. Media works only
/// contribute their title here; the bytes travel as a separate content part
/// (see [`build_analysis_request`]).
pub fn build_analysis_prompt(lens: &Lens, work: &Work) -> String {
    let title = work.display_title();
    match &work.payload {
        WorkPayload::Text(text) => format!(
            "{}\n\nThe work is as follows:\n---\nTitle: {}\n\nWork:\n{}",
            lens.template, title, text
        ),
        WorkPayload::Image(_) => format!(
            "{}\n\n{}\n\nTitle: {}",
            IMAGE_INSTRUCTION, lens.template, title
        ),
        WorkPayload::Audio(_) => format!(
            "{}\n\n{}\n\nTitle: {}",
            AUDIO_INSTRUCTION, lens.template, title
        ),
    }
}

/// Full generation request for one analysis: prompt plus any media part
pub fn build_analysis_request(lens: &Lens, work: &Work, credential: &str) -> GenerationRequest {
    GenerationRequest::text(build_analysis_prompt(lens, work), credential)
        .with_attachment(work.attachment().cloned())
}

//! Second-stage prompts that combine completed analyses.
//!
//! These prompts consume only the text of prior analyses, never the work
//! itself, so each analysis must carry its own evidence.

use crate::lenses::name_persona;

/// Heading that closes a dialectical dialogue
pub const AUFHEBEN_HEADING: &str = "## Aufheben / Synthesis";

/// Heading that closes a symposium
pub const HOLISTIC_HEADING: &str = "## Holistic Synthesis";

/// Build the dialectical dialogue prompt for two analyses of the same work
pub fn build_synthesis_prompt(
    lens_a: &str,
    result_a: &str,
    lens_b: &str,
    result_b: &str,
    title: &str,
) -> String {
    let persona_a = name_persona(lens_a);
    let persona_b = name_persona(lens_b);

    format!(
        r#"You are tasked with creating a "Dialectical Dialogue" regarding the creative work titled "{title}". This dialogue must synthesize two distinct analytical perspectives that have already been generated on this single work.

Perspective A: {lens_a} ({persona_a})
<analysis_a>
{result_a}
</analysis_a>

Perspective B: {lens_b} ({persona_b})
<analysis_b>
{result_b}
</analysis_b>

Instructions:
1. **Format as Dialogue:** Create a structured, turn-based conversation between two personas. Persona A must be titled "**{persona_a}**" and Persona B must be titled "**{persona_b}**". All speaker names must be formatted in markdown bold.
2. **Interaction:** The dialogue should explore the tensions, agreements, and gaps between the two analyses. Each persona must argue from their specific viewpoint, referencing evidence from their respective analyses. The conversation should flow naturally, involving rebuttals and concessions.
3. **Aufheben / Synthesis:** After the dialogue, provide a concluding section titled "{heading}". This section must resolve the tensions discussed (thesis and antithesis) and offer a higher-level interpretation that incorporates the most salient points from both perspectives, demonstrating a richer understanding of the work.

Begin the dialogue immediately."#,
        heading = AUFHEBEN_HEADING,
    )
}

/// Build the symposium prompt for three or more analyses of the same work.
///
/// `analyses` pairs each lens key with its analysis text, in selection order.
pub fn build_symposium_prompt(analyses: &[(&str, &str)], title: &str) -> String {
    let mut prompt = format!(
        "You are tasked with creating a \"Symposium Dialogue\" regarding the creative work titled \"{}\".\n\
         This dialogue must synthesize multiple distinct analytical perspectives into a cohesive discussion.\n\n\
         --- Provided Analyses ---\n",
        title
    );

    for (lens, analysis) in analyses {
        prompt.push_str(&format!(
            "\n<analysis lens=\"{}\" persona=\"{}\">\n{}\n</analysis>\n",
            lens,
            name_persona(lens),
            analysis
        ));
    }

    let speakers: Vec<String> = analyses
        .iter()
        .map(|(lens, _)| format!("\"**{}**\"", name_persona(lens)))
        .collect();

    prompt.push_str(&format!(
        r#"
--- Instructions ---
1. **Format as Dialogue:** Create a structured conversation between the perspectives. The participants must be titled {speakers}, matching the persona of each analysis. All speaker names must be formatted in markdown bold.
2. **Interaction and Flow:** The dialogue should be dynamic and exploratory. Participants must build upon each other's points, respectfully challenge interpretations, and explore the complexity of the work holistically. Ensure all perspectives are adequately represented.
3. **Holistic Synthesis:** After the dialogue, provide a concluding section titled "{heading}". This section must summarize the key insights that emerged specifically from the interaction of all perspectives, offering a comprehensive understanding of the work.

Begin the dialogue immediately."#,
        speakers = speakers.join(", "),
        heading = HOLISTIC_HEADING,
    ));

    prompt
}

/// Build the comparative prompt for two works analysed through the same lens
pub fn build_comparative_prompt(
    lens: &str,
    title_a: &str,
    analysis_a: &str,
    title_b: &str,
    analysis_b: &str,
) -> String {
    format!(
        r#"You are tasked with generating a "Comparative Synthesis". You will compare and contrast two different creative works analyzed through the same analytical lens: **{lens}**.

Work A Title: {title_a}
<analysis_a>
{analysis_a}
</analysis_a>

Work B Title: {title_b}
<analysis_b>
{analysis_b}
</analysis_b>

Instructions:
1. **Identify Key Themes:** Based on the provided analyses, identify the central themes, findings, or arguments that emerged for each work under the {lens} lens.
2. **Dissonance and Resonance:** Analyze the points of contrast (dissonance) and similarity (resonance) between Work A and Work B. How does applying the same lens reveal different aspects of each work?
3. **Emergent Insights:** Discuss what new understanding emerges from the comparison itself. How does seeing these two works side-by-side deepen the interpretation of both?
4. **Structure:** Format your response as a cohesive essay with clear sections for comparison, contrast, and synthesis."#
    )
}

//! Built-in lens taxonomy.
//!
//! Templates are written indented for readability; the catalog normalises
//! them when it flattens the taxonomy.

use super::LensNode;

/// The built-in taxonomy, in presentation order
pub fn builtin_taxonomy() -> Vec<LensNode> {
    vec![
        LensNode::leaf(
            "Structural & Formalist",
            "A formalist analysis focusing purely on craft, composition, technique, and structure.",
            r#"
            Analyze the following creative work from a strictly formalist perspective. Disregard external context, biography, or social implications. Your analysis should focus entirely on the internal structure and aesthetic components.

            - Analyze elements such as composition, color, line, medium, structure, meter, rhyme scheme, word choice, sound structure, instrumentation, or editing techniques.
            - Explain how these formal elements work together to create the piece's overall aesthetic effect.
            "#,
        ),
        LensNode::branch(
            "Psychological",
            "An inquiry into the work's emotional, symbolic, and behavioral currents.",
            vec![
                (
                    "Jungian",
                    r#"
                    Analyze the following creative work using a Jungian psychological lens.
                    - Explore the role of archetypes (e.g., the Shadow, Persona, Anima/Animus), the process of individuation, and connections to the collective unconscious.
                    - Interpret the work's symbols and imagery as manifestations of the psyche.
                    "#,
                ),
                (
                    "Freudian",
                    r#"
                    Analyze the following creative work using a Freudian psychoanalytic lens.
                    - Explore themes of repressed desires, the unconscious mind, and the interplay of the Id, Ego, and Superego.
                    - Discuss any potential dream symbolism, wish-fulfillment, or Oedipal dynamics present in the work.
                    "#,
                ),
                (
                    "Evolutionary Psychology",
                    r#"
                    Analyze the following creative work through the lens of Evolutionary Psychology.
                    - Explore how the themes, characters, or imagery reflect innate human behaviors shaped by natural selection (e.g., survival instincts, mating strategies, altruism, kinship).
                    - Discuss how the work resonates with universal aspects of human nature rooted in our ancestral past.
                    "#,
                ),
                (
                    "Behaviorism",
                    r#"
                    Analyze the following creative work through the lens of Behaviorism.
                    - Focus strictly on observable behaviors, actions, and interactions depicted or elicited by the work.
                    - Discuss potential conditioning (classical or operant), reinforcement schedules, and environmental determinants of behavior.
                    - Analyze how the work itself acts as a stimulus. Explicitly avoid speculation on internal mental states.
                    "#,
                ),
            ],
        ),
        LensNode::branch(
            "Philosophical",
            "An exploration of the work's deeper, universal themes and ideas.",
            vec![
                (
                    "Existentialist",
                    r#"
                    Analyze the following creative work through an Existentialist lens.
                    - Discuss themes of freedom, responsibility, authenticity, and the search for meaning in a meaningless world (the Absurd).
                    - Explore how the characters or narrator confront anxiety, dread, and the burden of choice.
                    "#,
                ),
                (
                    "Taoist",
                    r#"
                    Analyze the following creative work through a Taoist lens.
                    - Explore the concepts of Yin and Yang, the harmony of opposites, and the idea of 'wu wei' (effortless action).
                    - Discuss how the work reflects the natural flow of the Tao, simplicity, and the virtue of accepting reality.
                    "#,
                ),
                (
                    "Phenomenological",
                    r#"
                    Analyze the following creative work using a Phenomenological approach.
                    - Focus intensely on the subjective, lived experience of perceiving the work. How does it appear to consciousness?
                    - Discuss the relationship between the observer and the object, focusing on embodiment, perception, time, and space as depicted or evoked by the work.
                    - Bracket out external explanations and focus on the 'things themselves' as presented.
                    "#,
                ),
                (
                    "Stoicism",
                    r#"
                    Analyze the following creative work through a Stoic lens.
                    - Examine the themes of virtue, reason, and the dichotomy of control (what is and is not within our power).
                    - Discuss how the work addresses fate, adversity, and the pursuit of emotional tranquility (apatheia).
                    - Explore any representations of living in accordance with nature.
                    "#,
                ),
                (
                    "Platonism",
                    r#"
                    Analyze the following creative work through a Platonic lens.
                    - Explore the distinction between appearance (the physical/sensory world) and reality (the realm of Forms or Ideals).
                    - Discuss how the work might be interpreted in relation to the Allegory of the Cave.
                    - Examine the role of beauty, truth, and the good, and the ascent of the soul towards higher understanding.
                    "#,
                ),
            ],
        ),
        LensNode::branch(
            "Socio-Political",
            "A critical analysis of the work's relationship to society, power, and ideology.",
            vec![
                (
                    "Marxist",
                    r#"
                    Analyze the following creative work through a Marxist critical lens.
                    - Focus on the representation of class struggle, economic structures, and the means of production.
                    - Discuss how the work either reinforces or subverts the dominant ideology (hegemony).
                    - Explore themes of alienation and commodification.
                    "#,
                ),
                (
                    "Feminist",
                    r#"
                    Analyze the following creative work using a Feminist critical lens.
                    - Examine the representation of gender roles, power dynamics between sexes, and the presence of patriarchal structures.
                    - Discuss how the work challenges or reinforces societal expectations regarding gender and explores the intersectionality of identity.
                    "#,
                ),
                (
                    "Post-Colonial",
                    r#"
                    Analyze the following creative work using Post-Colonial theory.
                    - Examine the representation of the colonizer and the colonized, and the lasting impact of imperialism on cultural identity.
                    - Discuss themes of hybridity, resistance, agency, and the representation of the "Other".
                    "#,
                ),
                (
                    "Queer Theory",
                    r#"
                    Analyze the following creative work through the lens of Queer Theory.
                    - Examine how the work constructs, deconstructs, or challenges norms of gender and sexuality.
                    - Challenge heteronormative assumptions and explore marginalized identities and desires.
                    - Discuss the performance of identity and the subversion of stable categories.
                    "#,
                ),
            ],
        ),
        LensNode::branch(
            "Ethical Frameworks",
            "An evaluation of the moral implications and ethical questions raised by the work.",
            vec![
                (
                    "Utilitarianism",
                    r#"
                    Analyze the following creative work using a Utilitarian ethical framework.
                    - Evaluate the actions, decisions, or themes within the work based on their consequences.
                    - Apply the principle of the 'greatest good for the greatest number'.
                    - Discuss the calculation of pleasure vs. pain (hedonic calculus) and whether the work promotes overall utility or happiness.
                    "#,
                ),
                (
                    "Virtue Ethics",
                    r#"
                    Analyze the following creative work through the lens of Virtue Ethics (primarily Aristotelian).
                    - Focus on the character, virtues, and vices depicted or embodied in the work.
                    - Discuss how the work explores the concept of 'eudaimonia' (human flourishing) and the development of moral character.
                    - Evaluate whether the work provides moral exemplars or cautionary tales regarding the cultivation of virtue.
                    "#,
                ),
            ],
        ),
        LensNode::branch(
            "Scientific Perspectives",
            "Applying concepts from natural and social sciences to interpret the work.",
            vec![
                (
                    "Cognitive Science",
                    r#"
                    Analyze the following creative work through the lens of Cognitive Science.
                    - Explore how the work engages human mental processes, including perception, attention, memory, and decision-making.
                    - Discuss the use of conceptual metaphors, cognitive biases, or narrative structures that resonate with how the mind processes information.
                    - Analyze the work's impact on the audience's cognitive and emotional state.
                    "#,
                ),
                (
                    "Systems Theory",
                    r#"
                    Analyze the following creative work using Systems Theory (Complexity Theory).
                    - Examine the work as a complex system of interconnected parts.
                    - Identify feedback loops, emergent properties, boundaries, and the interaction between the system and its environment.
                    - Discuss how elements within the narrative, visual composition, or sound design interact to create complexity and meaning that is greater than the sum of its parts.
                    "#,
                ),
                (
                    "Ecocriticism",
                    r#"
                    Analyze the following creative work through the lens of Ecocriticism.
                    - Examine the relationship between the work and the natural environment.
                    - Discuss how nature/the environment is represented (e.g., as background, antagonist, sanctuary).
                    - Explore themes of environmental ethics, sustainability, the human impact on the planet, and the portrayal of non-human life.
                    "#,
                ),
            ],
        ),
        LensNode::branch(
            "Spiritual & Esoteric Beliefs",
            "Interpreting the work through the lens of specific spiritual traditions or hidden knowledge.",
            vec![
                (
                    "Buddhist",
                    r#"
                    Analyze the following creative work through a Buddhist philosophical lens.
                    - Explore themes related to the Four Noble Truths and the nature of suffering (dukkha).
                    - Discuss concepts of impermanence (anicca), non-self (anatta), dependent origination, and karma.
                    - Analyze how the work might relate to the path towards enlightenment or liberation.
                    "#,
                ),
                (
                    "Western Esotericism",
                    r#"
                    Analyze the following creative work through the lens of Western Esotericism.
                    - Look for influences or symbolism derived from traditions such as Hermeticism, Alchemy, Kabbalah, Gnosticism, or Neoplatonism.
                    - Discuss the concept of correspondences ('as above, so below'), the search for hidden knowledge (gnosis), and themes of initiation or transformation.
                    - Interpret symbolic language and imagery that may have esoteric meaning.
                    "#,
                ),
            ],
        ),
        LensNode::leaf(
            "Historical & Biographical",
            "Examines the work in the context of the artist's life and the historical period.",
            r#"
            Analyze the following creative work through a Historical and Biographical lens.
            - How does the artist's personal life, experiences, and known beliefs influence the creation and content of the work?
            - Place the work within the specific historical, cultural, and political context of its time.
            - Discuss how understanding the biography and the historical milieu enriches the interpretation.
            "#,
        ),
        LensNode::leaf(
            "Comparative",
            "Places the work in conversation with other similar artists and movements.",
            r#"
            Analyze the following creative work using a comparative lens.
            - Identify the key themes, styles, and aesthetic choices in the piece.
            - Compare and contrast this work with other similar artists, movements, or genres.
            - Discuss where this work fits within its broader artistic or literary tradition.
            "#,
        ),
    ]
}

//! Lens catalog - the taxonomy of interpretive lenses and its flattened,
//! addressable form.

use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::error::JanusError;

pub mod persona;
pub mod taxonomy;
pub mod template;

pub use persona::{name_persona, persona_subject};
pub use taxonomy::builtin_taxonomy;
pub use template::normalize_template;

/// A category of the taxonomy: either a single lens or a parent of sub-lenses
#[derive(Debug, Clone, PartialEq)]
pub enum LensNode {
    /// Category that is itself a selectable lens
    Leaf {
        name: String,
        description: String,
        template: String,
    },
    /// Category grouping named sub-lenses
    Branch {
        name: String,
        description: String,
        sub_lenses: Vec<(String, String)>,
    },
}

impl LensNode {
    pub fn leaf(
        name: impl Into<String>,
        description: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        LensNode::Leaf {
            name: name.into(),
            description: description.into(),
            template: template.into(),
        }
    }

    pub fn branch<N, T>(
        name: impl Into<String>,
        description: impl Into<String>,
        sub_lenses: Vec<(N, T)>,
    ) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        LensNode::Branch {
            name: name.into(),
            description: description.into(),
            sub_lenses: sub_lenses
                .into_iter()
                .map(|(n, t)| (n.into(), t.into()))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LensNode::Leaf { name, .. } | LensNode::Branch { name, .. } => name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            LensNode::Leaf { description, .. } | LensNode::Branch { description, .. } => {
                description
            }
        }
    }

    /// Sub-lens names in lexicographic order; empty for a leaf
    pub fn sub_lens_names(&self) -> Vec<&str> {
        match self {
            LensNode::Leaf { .. } => Vec::new(),
            LensNode::Branch { sub_lenses, .. } => {
                let mut names: Vec<&str> = sub_lenses.iter().map(|(n, _)| n.as_str()).collect();
                names.sort_unstable();
                names
            }
        }
    }
}

/// Build the lens key for a category and optional sub-lens
pub fn lens_key(category: &str, sub_lens: Option<&str>) -> String {
    match sub_lens {
        Some(sub) => format!("{} ({})", category, sub),
        None => category.to_string(),
    }
}

/// A selectable lens with its normalised prompt template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lens {
    pub key: String,
    pub category: String,
    pub sub_lens: Option<String>,
    pub description: String,
    pub template: String,
}

impl Lens {
    /// Debate persona title for this lens
    pub fn persona(&self) -> String {
        name_persona(&self.key)
    }
}

/// Flatten a taxonomy into a key-ordered map of lenses.
///
/// Every sub-lens of a branch yields `"{category} ({sub_lens})"`, every leaf
/// yields its bare category name.
pub fn flatten(nodes: &[LensNode]) -> Result<BTreeMap<String, Lens>, JanusError> {
    let mut lenses = BTreeMap::new();

    for node in nodes {
        let entries: Vec<Lens> = match node {
            LensNode::Leaf {
                name,
                description,
                template,
            } => vec![Lens {
                key: lens_key(name, None),
                category: name.clone(),
                sub_lens: None,
                description: description.clone(),
                template: normalize_template(template),
            }],
            LensNode::Branch {
                name,
                description,
                sub_lenses,
            } => {
                if sub_lenses.is_empty() {
                    return Err(JanusError::ConstructionDefect(format!(
                        "category '{}' has no sub-lenses",
                        name
                    )));
                }
                sub_lenses
                    .iter()
                    .map(|(sub, template)| Lens {
                        key: lens_key(name, Some(sub)),
                        category: name.clone(),
                        sub_lens: Some(sub.clone()),
                        description: description.clone(),
                        template: normalize_template(template),
                    })
                    .collect()
            }
        };

        for lens in entries {
            if lens.template.is_empty() {
                return Err(JanusError::ConstructionDefect(format!(
                    "lens '{}' has an empty prompt template",
                    lens.key
                )));
            }
            if lenses.contains_key(&lens.key) {
                return Err(JanusError::ConstructionDefect(format!(
                    "duplicate lens key '{}'",
                    lens.key
                )));
            }
            lenses.insert(lens.key.clone(), lens);
        }
    }

    Ok(lenses)
}

/// Read-only catalog built once at startup and shared by reference
#[derive(Debug, Clone)]
pub struct LensCatalog {
    nodes: Vec<LensNode>,
    lenses: BTreeMap<String, Lens>,
}

impl LensCatalog {
    /// Build a catalog from a taxonomy, rejecting malformed entries
    pub fn new(nodes: Vec<LensNode>) -> Result<Self, JanusError> {
        let lenses = flatten(&nodes)?;
        debug!(
            "Lens catalog built: {} categories, {} lenses",
            nodes.len(),
            lenses.len()
        );
        Ok(Self { nodes, lenses })
    }

    /// Catalog over the built-in taxonomy
    pub fn builtin() -> Result<Self, JanusError> {
        Self::new(builtin_taxonomy())
    }

    pub fn len(&self) -> usize {
        self.lenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lenses.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lenses.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Lens> {
        self.lenses.get(key)
    }

    /// Normalised template for a lens key
    pub fn template(&self, key: &str) -> Option<&str> {
        self.lenses.get(key).map(|lens| lens.template.as_str())
    }

    /// Look up a key that callers guarantee to be valid
    pub fn resolve(&self, key: &str) -> Result<&Lens, JanusError> {
        self.lenses.get(key).ok_or_else(|| {
            JanusError::ConstructionDefect(format!("lens key '{}' is not in the catalog", key))
        })
    }

    /// All lens keys in lexicographic order
    pub fn sorted_keys(&self) -> Vec<&str> {
        self.lenses.keys().map(String::as_str).collect()
    }

    pub fn lenses(&self) -> impl Iterator<Item = &Lens> {
        self.lenses.values()
    }

    /// Categories in declaration order
    pub fn categories(&self) -> &[LensNode] {
        &self.nodes
    }

    pub fn category(&self, name: &str) -> Option<&LensNode> {
        self.nodes.iter().find(|node| node.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_catalog_flattens_every_entry() {
        let catalog = LensCatalog::builtin().unwrap();

        let expected: usize = catalog
            .categories()
            .iter()
            .map(|node| match node {
                LensNode::Leaf { .. } => 1,
                LensNode::Branch { sub_lenses, .. } => sub_lenses.len(),
            })
            .sum();
        assert_eq!(catalog.len(), expected);

        let unique: HashSet<&str> = catalog.sorted_keys().into_iter().collect();
        assert_eq!(unique.len(), expected);
    }

    #[test]
    fn test_keys_are_sorted_and_well_formed() {
        let catalog = LensCatalog::builtin().unwrap();
        let keys = catalog.sorted_keys();

        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        assert!(catalog.contains("Psychological (Jungian)"));
        assert!(catalog.contains("Philosophical (Taoist)"));
        assert!(catalog.contains("Socio-Political (Marxist)"));
        assert!(catalog.contains("Comparative"));
        assert!(catalog.contains("Structural & Formalist"));
        assert!(!catalog.contains("Psychological"));
    }

    #[test]
    fn test_templates_are_normalised() {
        let catalog = LensCatalog::builtin().unwrap();
        for lens in catalog.lenses() {
            assert_eq!(normalize_template(&lens.template), lens.template);
            assert!(!lens.template.starts_with(' '));
        }
        let taoist = catalog.template("Philosophical (Taoist)").unwrap();
        assert!(taoist.starts_with("Analyze the following creative work through a Taoist lens."));
        assert!(taoist.contains("\n- Explore the concepts of Yin and Yang"));
    }

    #[test]
    fn test_branch_without_sub_lenses_is_a_defect() {
        let nodes = vec![LensNode::Branch {
            name: "Empty".into(),
            description: "nothing here".into(),
            sub_lenses: vec![],
        }];
        let err = LensCatalog::new(nodes).unwrap_err();
        assert!(matches!(err, JanusError::ConstructionDefect(_)));
    }

    #[test]
    fn test_duplicate_keys_are_a_defect() {
        let nodes = vec![
            LensNode::leaf("Comparative", "a", "Compare."),
            LensNode::leaf("Comparative", "b", "Compare again."),
        ];
        assert!(matches!(
            LensCatalog::new(nodes),
            Err(JanusError::ConstructionDefect(_))
        ));
    }

    #[test]
    fn test_blank_template_is_a_defect() {
        let nodes = vec![LensNode::branch("Odd", "x", vec![("Blank", "   \n  ")])];
        assert!(matches!(
            LensCatalog::new(nodes),
            Err(JanusError::ConstructionDefect(_))
        ));
    }

    #[test]
    fn test_resolve_unknown_key() {
        let catalog = LensCatalog::builtin().unwrap();
        assert!(catalog.resolve("Psychological (Lacanian)").is_err());
        assert_eq!(
            catalog.resolve("Comparative").unwrap().persona(),
            "The Comparativist"
        );
    }

    #[test]
    fn test_category_browsing() {
        let catalog = LensCatalog::builtin().unwrap();
        let first = &catalog.categories()[0];
        assert_eq!(first.name(), "Structural & Formalist");
        assert!(first.sub_lens_names().is_empty());

        let psych = catalog.category("Psychological").unwrap();
        assert_eq!(
            psych.sub_lens_names(),
            vec!["Behaviorism", "Evolutionary Psychology", "Freudian", "Jungian"]
        );
        assert!(psych.description().contains("symbolic"));
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named visual treatment with the modifier vocabulary appended to
/// prompts rendered in that style.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StyleDefinition {
    pub id: String,
    pub name: String,
    pub modifier: String,
}

/// Immutable style-id → modifier mapping, loaded once at startup and
/// injected wherever prompts are composed. An unknown id degrades to an
/// empty modifier rather than failing.
#[derive(Debug, Clone, Default)]
pub struct StyleCatalog {
    styles: HashMap<String, StyleDefinition>,
}

impl StyleCatalog {
    pub fn new(styles: Vec<StyleDefinition>) -> Self {
        Self {
            styles: styles.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }

    /// The stock catalog shipped with the app.
    pub fn builtin() -> Self {
        let def = |id: &str, name: &str, modifier: &str| StyleDefinition {
            id: id.into(),
            name: name.into(),
            modifier: modifier.into(),
        };
        Self::new(vec![
            def(
                "anime",
                "Anime",
                "in anime style, vibrant colors, exaggerated features, anime aesthetic",
            ),
            def(
                "meme",
                "Meme",
                "humorous, bold text overlay, simplistic art, meme format, internet culture",
            ),
            def(
                "a24",
                "A24 Poster",
                "dramatic lighting, cinematic composition, indie film aesthetic, A24 movie poster style",
            ),
            def(
                "cyberpunk",
                "Cyberpunk",
                "cyberpunk style, neon lights, dystopian future, technological, high contrast",
            ),
            def(
                "vaporwave",
                "Vaporwave",
                "vaporwave aesthetic, retro, pastel colors, 80s and 90s nostalgia, digital surrealism",
            ),
        ])
    }

    /// Load a catalog from a JSON array of style definitions, for hosts
    /// that ship their own styles.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let styles: Vec<StyleDefinition> = serde_json::from_str(json)?;
        Ok(Self::new(styles))
    }

    pub fn get(&self, id: &str) -> Option<&StyleDefinition> {
        self.styles.get(id)
    }

    /// Modifier vocabulary for a style id; empty for unknown ids.
    pub fn modifier_for(&self, id: &str) -> &str {
        self.styles.get(id).map(|s| s.modifier.as_str()).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleDefinition> {
        self.styles.values()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_catalog_has_known_styles() {
        let catalog = StyleCatalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.get("anime").unwrap().name, "Anime");
    }

    #[test]
    fn unknown_id_degrades_to_empty_modifier() {
        let catalog = StyleCatalog::builtin();
        assert_eq!(catalog.modifier_for("nonexistent"), "");
    }

    #[test]
    fn loads_from_json() {
        let catalog = StyleCatalog::from_json(
            r#"[{"id":"noir","name":"Noir","modifier":"black and white, film noir"}]"#,
        )
        .unwrap();
        assert_eq!(catalog.modifier_for("noir"), "black and white, film noir");
    }
}

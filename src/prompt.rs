use crate::styles::StyleCatalog;

/// Quality boosters appended to every composed prompt.
const QUALITY_CLAUSE: &str = "high quality, detailed, 4K";

/// Pure prompt composition over an injected style catalog. No I/O, no
/// state; identical input always yields identical output.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    styles: StyleCatalog,
}

impl PromptComposer {
    pub fn new(styles: StyleCatalog) -> Self {
        Self { styles }
    }

    pub fn styles(&self) -> &StyleCatalog {
        &self.styles
    }

    /// Merge the user's prompt with the style's modifier vocabulary.
    /// Trailing runs of commas/periods are stripped so the modifier clause
    /// joins cleanly; unknown style ids leave the prompt untouched.
    fn apply_style(&self, style_id: &str, user_prompt: &str) -> String {
        let cleaned = user_prompt.trim().trim_end_matches([',', '.']);
        let modifier = self.styles.modifier_for(style_id);
        if modifier.is_empty() {
            cleaned.to_string()
        } else {
            format!("{cleaned}, {modifier}")
        }
    }

    /// Final generation instruction: styled prompt + quality clause +
    /// optional extra instructions. Total — an empty prompt still yields a
    /// syntactically valid string (the leading-comma artifact is accepted;
    /// validation happens before submission, not here).
    pub fn compose(
        &self,
        style_id: &str,
        user_prompt: &str,
        additional_instructions: Option<&str>,
    ) -> String {
        let styled = self.apply_style(style_id, user_prompt);
        let instructions = match additional_instructions {
            Some(extra) if !extra.is_empty() => format!("{QUALITY_CLAUSE}, {extra}"),
            _ => QUALITY_CLAUSE.to_string(),
        };
        format!("{styled}, {instructions}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn composer() -> PromptComposer {
        PromptComposer::new(StyleCatalog::builtin())
    }

    #[test]
    fn anime_style_appends_modifier_and_quality() {
        assert_eq!(
            composer().compose("anime", "a cat", None),
            "a cat, in anime style, vibrant colors, exaggerated features, \
             anime aesthetic, high quality, detailed, 4K"
        );
    }

    #[test]
    fn unknown_style_keeps_prompt_bare() {
        assert_eq!(
            composer().compose("nonexistent", "a cat.", None),
            "a cat, high quality, detailed, 4K"
        );
    }

    #[test]
    fn extra_instructions_go_after_quality_clause() {
        let out = composer().compose("meme", "dog", Some("square crop"));
        assert!(out.ends_with("4K, square crop"), "got: {out}");
    }

    #[test]
    fn empty_extra_instructions_are_ignored() {
        assert_eq!(
            composer().compose("nonexistent", "dog", Some("")),
            "dog, high quality, detailed, 4K"
        );
    }

    #[test]
    fn trailing_punctuation_runs_are_stripped() {
        assert_eq!(
            composer().compose("nonexistent", "  a dog,,.. ", None),
            "a dog, high quality, detailed, 4K"
        );
    }

    #[test]
    fn composition_is_deterministic() {
        let c = composer();
        assert_eq!(
            c.compose("cyberpunk", "a city", Some("wide shot")),
            c.compose("cyberpunk", "a city", Some("wide shot"))
        );
    }

    #[test]
    fn whitespace_only_prompt_keeps_leading_comma_artifact() {
        // Accepted cosmetic artifact; submit() validates before composing.
        assert_eq!(
            composer().compose("nonexistent", "   ", None),
            ", high quality, detailed, 4K"
        );
    }
}

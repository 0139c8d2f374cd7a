//! syntect-backed highlighting engine.

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::engine::{HighlightEngine, HighlightError};

/// Language ids used by corpora that syntect knows under another token.
const ALIASES: &[(&str, &str)] = &[
    ("c++", "cpp"),
    ("csharp", "cs"),
    ("golang", "go"),
    ("javascript", "js"),
    ("shell", "sh"),
    ("bash", "sh"),
    ("typescript", "js"),
];

/// Highlighting engine built from syntect's bundled syntaxes and themes.
///
/// Loading the bundled definitions is the expensive part; build it once and
/// share it through a [`HighlightCache`](crate::HighlightCache).
pub struct SyntectEngine {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl SyntectEngine {
    /// Load bundled syntaxes and the named bundled theme.
    pub fn load(theme_name: &str) -> Result<Self, HighlightError> {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let mut themes = ThemeSet::load_defaults();
        let theme = themes.themes.remove(theme_name).ok_or_else(|| {
            HighlightError::Construction(format!("unknown highlight theme: {theme_name}"))
        })?;
        Ok(Self { syntaxes, theme })
    }

    fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        let language = language.trim().to_ascii_lowercase();
        let token = ALIASES
            .iter()
            .find(|(alias, _)| *alias == language)
            .map_or(language.as_str(), |&(_, token)| token);
        self.syntaxes.find_syntax_by_token(token)
    }
}

impl HighlightEngine for SyntectEngine {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        let syntax = self
            .find_syntax(language)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        let mut lines = Vec::new();
        for line in LinesWithEndings::from(code) {
            let regions = highlighter
                .highlight_line(line, &self.syntaxes)
                .map_err(|e| HighlightError::Engine(e.to_string()))?;
            // Keep each line self-contained: no markup spans a line break.
            let regions: Vec<_> = regions
                .into_iter()
                .map(|(style, text)| (style, text.trim_end_matches(['\n', '\r'])))
                .collect();
            let html = styled_line_to_highlighted_html(&regions, IncludeBackground::No)
                .map_err(|e| HighlightError::Engine(e.to_string()))?;
            lines.push(html);
        }

        Ok(lines.join("\n"))
    }

    fn supports(&self, language: &str) -> bool {
        self.find_syntax(language).is_some()
    }
}

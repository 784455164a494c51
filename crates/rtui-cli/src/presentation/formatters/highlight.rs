//! Syntax highlighting shared by the console and the browser.
//!
//! Lines are highlighted as one document so that constructs spanning
//! several lines (block comments, docstrings) keep their colors. Each line
//! comes back as a list of [`Segment`]s that the renderers map onto their
//! own style types.

use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

pub const JSON_SYNTAX: &str = "json";

/// Language assumed for source snippets unless configured otherwise.
pub const DEFAULT_SOURCE_SYNTAX: &str = "rust";

const THEME: &str = "base16-eighties.dark";

/// A run of text drawn in one foreground color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    /// 24-bit foreground; `None` keeps the terminal default
    pub rgb: Option<(u8, u8, u8)>,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            rgb: None,
        }
    }

    fn styled(style: Style, text: &str) -> Self {
        let fg = style.foreground;
        Self {
            text: text.to_string(),
            rgb: Some((fg.r, fg.g, fg.b)),
        }
    }
}

pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    /// Process-wide instance; loading the bundled syntaxes is not free.
    pub fn shared() -> &'static Highlighter {
        static SHARED: OnceLock<Highlighter> = OnceLock::new();
        SHARED.get_or_init(Highlighter::load)
    }

    fn load() -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme: themes.remove(THEME).unwrap_or_default(),
        }
    }

    /// Whether `language` (a name or file extension) is known.
    pub fn supports(&self, language: &str) -> bool {
        self.syntaxes.find_syntax_by_token(language).is_some()
    }

    fn syntax(&self, language: &str) -> &SyntaxReference {
        self.syntaxes
            .find_syntax_by_token(language)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }

    /// Highlight `lines` in `language`. Unknown languages and lines the
    /// parser rejects come back uncolored.
    pub fn highlight(&self, lines: &[String], language: &str) -> Vec<Vec<Segment>> {
        let mut highlighter = HighlightLines::new(self.syntax(language), &self.theme);

        lines
            .iter()
            .map(|line| {
                let with_newline = format!("{}\n", line);
                match highlighter.highlight_line(&with_newline, &self.syntaxes) {
                    Ok(ranges) => ranges
                        .into_iter()
                        .filter_map(|(style, text)| {
                            let text = text.trim_end_matches('\n');
                            (!text.is_empty()).then(|| Segment::styled(style, text))
                        })
                        .collect(),
                    Err(err) => {
                        log::debug!("highlighting failed for {}: {}", language, err);
                        vec![Segment::plain(line)]
                    }
                }
            })
            .collect()
    }
}

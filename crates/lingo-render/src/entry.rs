//! Entry to HTML.

use std::fmt::Write;

use lingo_content::{Entry, Section, section_ids};
use lingo_highlight::{HighlightCache, HighlightEngine, Highlighted, emphasize_lines, escape_html};

use crate::callout::render_callout;
use crate::diagram::render_diagram_or_error;
use crate::markdown::render_markdown;

/// Language used for code when neither the section nor the corpus names one.
pub const DEFAULT_CODE_LANGUAGE: &str = "txt";

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (sections render as level 2).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Result of rendering an entry.
#[derive(Clone, Debug)]
pub struct RenderedEntry {
    /// Rendered HTML content.
    pub html: String,
    /// One entry per section, in order.
    pub toc: Vec<TocEntry>,
    /// Whether some code blocks still show raw code because the highlighting
    /// engine was not ready.
    pub loading: bool,
}

/// Renders entries, highlighting code through a shared [`HighlightCache`].
pub struct EntryRenderer<'c, E> {
    cache: &'c HighlightCache<E>,
    default_language: String,
}

impl<'c, E: HighlightEngine> EntryRenderer<'c, E> {
    #[must_use]
    pub fn new(cache: &'c HighlightCache<E>) -> Self {
        Self {
            cache,
            default_language: DEFAULT_CODE_LANGUAGE.to_owned(),
        }
    }

    /// Language for code in corpora that do not name one.
    #[must_use]
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Render `entry`, waiting for the highlighting engine if needed.
    ///
    /// `corpus_language` is the id of the language the entry belongs to; it
    /// is the code language unless a section overrides it.
    pub async fn render(&self, entry: &Entry, corpus_language: Option<&str>) -> RenderedEntry {
        let mut highlighted = Vec::with_capacity(entry.sections.len());
        for section in &entry.sections {
            let block = match &section.code {
                Some(code) => Some(
                    self.cache
                        .highlight(trim_code(code), self.code_language(section, corpus_language))
                        .await,
                ),
                None => None,
            };
            highlighted.push(block);
        }
        assemble(entry, corpus_language, &self.default_language, &highlighted)
    }

    /// Render `entry` without waiting.
    ///
    /// Code blocks show escaped raw code until the engine is ready; the
    /// result's `loading` flag tells whether a later [`render`](Self::render)
    /// would differ.
    #[must_use]
    pub fn render_now(&self, entry: &Entry, corpus_language: Option<&str>) -> RenderedEntry {
        let highlighted: Vec<_> = entry
            .sections
            .iter()
            .map(|section| {
                section.code.as_ref().map(|code| {
                    self.cache
                        .peek(trim_code(code), self.code_language(section, corpus_language))
                })
            })
            .collect();
        assemble(entry, corpus_language, &self.default_language, &highlighted)
    }

    fn code_language<'a>(&'a self, section: &'a Section, corpus_language: Option<&'a str>) -> &'a str {
        pick_language(section, corpus_language, &self.default_language)
    }
}

fn pick_language<'a>(
    section: &'a Section,
    corpus_language: Option<&'a str>,
    default_language: &'a str,
) -> &'a str {
    section
        .language
        .as_deref()
        .or(corpus_language)
        .unwrap_or(default_language)
}

/// Corpus files often end code samples with a newline; it would render as an
/// empty last line.
fn trim_code(code: &str) -> &str {
    code.trim_end_matches(['\n', '\r'])
}

fn assemble(
    entry: &Entry,
    corpus_language: Option<&str>,
    default_language: &str,
    highlighted: &[Option<Highlighted>],
) -> RenderedEntry {
    let mut out = String::new();
    let mut toc = Vec::with_capacity(entry.sections.len());
    let mut loading = false;

    write!(
        out,
        r#"<article class="entry" data-entry="{}"><header><h1>{}</h1>"#,
        escape_html(&entry.id),
        escape_html(&entry.title)
    )
    .unwrap();
    if let Some(difficulty) = entry.difficulty {
        let name = difficulty.as_str();
        write!(out, r#"<span class="difficulty difficulty-{name}">{name}</span>"#).unwrap();
    }
    if !entry.tags.is_empty() {
        out.push_str(r#"<ul class="tags">"#);
        for tag in &entry.tags {
            write!(out, "<li>{}</li>", escape_html(tag)).unwrap();
        }
        out.push_str("</ul>");
    }
    out.push_str("</header>");

    for ((section, id), block) in entry
        .sections
        .iter()
        .zip(section_ids(entry))
        .zip(highlighted)
    {
        write!(
            out,
            r#"<section id="{id}" class="entry-section"><h2>{}</h2>"#,
            escape_html(&section.heading)
        )
        .unwrap();

        for paragraph in section.paragraphs() {
            out.push_str(&render_markdown(paragraph));
        }

        if let Some(block) = block {
            loading |= block.loading;
            let language = pick_language(section, corpus_language, default_language);
            let markup = if section.highlight_lines.is_empty() {
                block.html.clone()
            } else {
                emphasize_lines(&block.html, &section.highlight_lines)
            };
            write!(
                out,
                r#"<div class="code-block"><pre><code class="language-{}">{markup}</code></pre></div>"#,
                escape_html(language)
            )
            .unwrap();
        }

        if let Some(output) = &section.output {
            write!(
                out,
                r#"<div class="code-output"><div class="code-output-title">Output</div><pre>{}</pre></div>"#,
                escape_html(trim_code(output))
            )
            .unwrap();
        }

        if let Some(diagram) = &section.diagram {
            out.push_str(&render_diagram_or_error(diagram));
        }

        for callout in section.callouts() {
            render_callout(&callout, &mut out);
        }

        out.push_str("</section>");
        toc.push(TocEntry {
            level: 2,
            title: section.heading.clone(),
            id,
        });
    }

    out.push_str("</article>");
    RenderedEntry {
        html: out,
        toc,
        loading,
    }
}

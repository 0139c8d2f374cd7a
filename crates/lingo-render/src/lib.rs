//! HTML rendering of Lingo tutorial entries.
//!
//! [`EntryRenderer`] turns an [`Entry`](lingo_content::Entry) into an
//! `<article>` with one `<section>` per entry section. Each section carries
//! its slug as `id`, which is also the anchor the scroll tracker observes and
//! the key of the matching [`TocEntry`].
//!
//! Section content is rendered in a fixed order: prose paragraphs, code,
//! expected output, diagram, then callouts.
//!
//! Code goes through a [`HighlightCache`](lingo_highlight::HighlightCache).
//! [`EntryRenderer::render`] waits for the engine;
//! [`EntryRenderer::render_now`] never waits and shows raw code while the
//! engine is still loading.

mod callout;
mod diagram;
mod entry;
mod markdown;

pub use diagram::render_diagram;
pub use entry::{DEFAULT_CODE_LANGUAGE, EntryRenderer, RenderedEntry, TocEntry};
pub use markdown::render_markdown;

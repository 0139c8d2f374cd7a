//! Cached syntax highlighting for Lingo code blocks.
//!
//! Building a highlighting engine (syntax definitions plus themes) is
//! expensive, so it happens once per process and the result is shared by
//! every code block:
//!
//! - [`HighlightCache`]: lazily constructs an engine, coalescing concurrent
//!   construction requests onto one background task
//! - [`HighlightEngine`]: the seam between the cache and a concrete tokenizer
//! - [`SyntectEngine`]: the production engine
//! - [`global`]: the process-wide cache used by the renderer
//! - [`emphasize_lines`]: line overlay driven only by line numbers
//! - [`CodeBlockView`]: per-block display state that ignores results arriving
//!   after the block was unmounted
//!
//! Highlighting is a progressive enhancement. Every failure path degrades to
//! the escaped raw code, and line emphasis works on that fallback too.
//!
//! # Example
//!
//! ```no_run
//! # async fn demo() {
//! let cache = lingo_highlight::global();
//!
//! // Before the engine is ready, `peek` returns the escaped raw code.
//! let early = cache.peek("int main() {}", "cpp");
//! assert!(early.loading);
//!
//! let done = cache.highlight("int main() {}", "cpp").await;
//! assert!(!done.loading);
//! let html = lingo_highlight::emphasize_lines(&done.html, &[1]);
//! # }
//! ```

mod cache;
mod engine;
mod global;
mod markup;
mod syntect_engine;
mod view;

pub use cache::{CacheState, HighlightCache, Highlighted};
pub use engine::{HighlightEngine, HighlightError};
pub use global::{DEFAULT_THEME, configure_global, global};
pub use markup::{emphasize_lines, escape_html};
pub use syntect_engine::SyntectEngine;
pub use view::{CodeBlock, CodeBlockView, PendingHighlight};

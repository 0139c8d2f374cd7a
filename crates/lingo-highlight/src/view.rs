//! Display state for a mounted code block.
//!
//! A code block shows escaped raw code immediately and swaps in highlighted
//! markup once the shared engine is ready. The view is owned by whoever
//! mounted it; the pending highlight only holds a weak reference, so a result
//! that arrives after the view was dropped is discarded.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::cache::{HighlightCache, Highlighted};
use crate::engine::HighlightEngine;
use crate::markup::emphasize_lines;

/// Source of a code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    pub code: String,
    pub language: String,
    /// 1-indexed lines to emphasise.
    pub emphasized_lines: Vec<usize>,
}

impl CodeBlock {
    #[must_use]
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            emphasized_lines: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_emphasized_lines(mut self, lines: Vec<usize>) -> Self {
        self.emphasized_lines = lines;
        self
    }

    fn render(&self, highlighted: &Highlighted) -> String {
        if self.emphasized_lines.is_empty() {
            highlighted.html.clone()
        } else {
            emphasize_lines(&highlighted.html, &self.emphasized_lines)
        }
    }
}

/// What a mounted code block currently displays.
#[derive(Debug)]
pub struct CodeBlockView {
    block: CodeBlock,
    html: String,
    loading: bool,
}

impl CodeBlockView {
    /// Mount a code block, showing whatever the cache can provide right now.
    pub fn mount<E: HighlightEngine>(
        cache: &HighlightCache<E>,
        block: CodeBlock,
    ) -> Rc<RefCell<Self>> {
        let initial = cache.peek(&block.code, &block.language);
        Rc::new(RefCell::new(Self {
            html: block.render(&initial),
            loading: initial.loading,
            block,
        }))
    }

    /// Start the asynchronous highlight for a mounted view.
    pub fn pending(view: &Rc<RefCell<Self>>) -> PendingHighlight {
        PendingHighlight {
            block: view.borrow().block.clone(),
            view: Rc::downgrade(view),
        }
    }

    /// Current markup, with line emphasis applied.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Whether the view still shows the raw fallback while the engine loads.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn apply(&mut self, highlighted: &Highlighted) {
        self.html = self.block.render(highlighted);
        self.loading = highlighted.loading;
    }
}

/// A highlight request bound to a view that may be unmounted before it completes.
#[derive(Debug)]
pub struct PendingHighlight {
    block: CodeBlock,
    view: Weak<RefCell<CodeBlockView>>,
}

impl PendingHighlight {
    /// Wait for the highlighted markup and apply it to the view.
    ///
    /// Returns `false` if the view was unmounted in the meantime; the result
    /// is dropped without touching any state.
    pub async fn resolve<E: HighlightEngine>(self, cache: &HighlightCache<E>) -> bool {
        let highlighted = cache
            .highlight(&self.block.code, &self.block.language)
            .await;

        match self.view.upgrade() {
            Some(view) => {
                view.borrow_mut().apply(&highlighted);
                true
            }
            None => {
                tracing::debug!("code block unmounted before highlighting finished");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::HighlightError;
    use pretty_assertions::assert_eq;

    struct BracketEngine;

    impl HighlightEngine for BracketEngine {
        fn highlight(&self, code: &str, _language: &str) -> Result<String, HighlightError> {
            Ok(code
                .lines()
                .map(|l| format!("<b>{l}</b>"))
                .collect::<Vec<_>>()
                .join("\n"))
        }

        fn supports(&self, _language: &str) -> bool {
            true
        }
    }

    fn cache() -> HighlightCache<BracketEngine> {
        HighlightCache::new(|| Ok(BracketEngine))
    }

    #[tokio::test]
    async fn test_view_starts_raw_then_highlights() {
        let cache = cache();
        let block = CodeBlock::new("a<b\nc", "x").with_emphasized_lines(vec![2]);
        let view = CodeBlockView::mount(&cache, block);

        assert!(view.borrow().is_loading());
        assert_eq!(
            view.borrow().html(),
            "<span class=\"line\">a&lt;b</span>\n<span class=\"line highlighted\">c</span>"
        );

        let applied = CodeBlockView::pending(&view).resolve(&cache).await;
        assert!(applied);
        assert!(!view.borrow().is_loading());
        assert_eq!(
            view.borrow().html(),
            "<span class=\"line\"><b>a<b</b></span>\n<span class=\"line highlighted\"><b>c</b></span>"
        );
    }

    #[tokio::test]
    async fn test_unmounted_view_discards_result() {
        let cache = cache();
        let view = CodeBlockView::mount(&cache, CodeBlock::new("x", "y"));
        let pending = CodeBlockView::pending(&view);
        drop(view);

        assert!(!pending.resolve(&cache).await);
        // The engine was still constructed and stays available.
        assert!(cache.ready_engine().is_some());
    }

    #[tokio::test]
    async fn test_mount_after_ready_is_immediate() {
        let cache = cache();
        cache.engine().await.unwrap();

        let view = CodeBlockView::mount(&cache, CodeBlock::new("x", "y"));
        assert!(!view.borrow().is_loading());
        assert_eq!(view.borrow().html(), "<b>x</b>");
    }
}

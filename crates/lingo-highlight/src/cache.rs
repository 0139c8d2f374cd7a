//! Lazily constructed, shared highlighting engine.
//!
//! [`HighlightCache`] moves through these states:
//!
//! ```text
//! Uninitialized --first request--> Constructing --success--> Ready
//!                                       |
//!                                       +--failure--> Failed
//! ```
//!
//! Construction runs in its own task, detached from the request that started
//! it. Requests issued while constructing wait for that one task; a request
//! that is dropped midway does not cancel it. The outcome is kept for the
//! life of the cache: a ready engine is never torn down, and a failed one is
//! not retried, so every later request falls back to raw code.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use tokio::sync::watch;

use crate::engine::{HighlightEngine, HighlightError};
use crate::markup::escape_html;

type EngineFactory<E> = Arc<dyn Fn() -> Result<E, HighlightError> + Send + Sync>;

/// Lifecycle of a [`HighlightCache`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheState {
    Uninitialized,
    Constructing,
    Ready,
    /// Construction failed; requests get raw code.
    Failed,
}

/// Markup for one code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Highlighted {
    /// Highlighted markup, or escaped raw code when highlighting is unavailable.
    pub html: String,
    /// `true` while the engine is still being constructed.
    pub loading: bool,
}

impl Highlighted {
    fn raw(code: &str, loading: bool) -> Self {
        Self {
            html: escape_html(code),
            loading,
        }
    }
}

/// State shared with the construction task.
struct Slot<E> {
    outcome: OnceLock<Result<E, HighlightError>>,
    started: AtomicBool,
    /// Signalled whenever a construction task ends.
    settled: watch::Sender<()>,
}

/// Wakes waiters when the construction task ends, including when its
/// runtime drops it before an outcome was stored. In that case the cache
/// goes back to uninitialized and the next waiter starts over.
struct SettleGuard<E>(Arc<Slot<E>>);

impl<E> Drop for SettleGuard<E> {
    fn drop(&mut self) {
        if self.0.outcome.get().is_none() {
            self.0.started.store(false, Ordering::Release);
        }
        self.0.settled.send_replace(());
    }
}

/// Construct-once holder for a highlighting engine.
pub struct HighlightCache<E> {
    slot: Arc<Slot<E>>,
    factory: EngineFactory<E>,
    constructions: AtomicUsize,
}

impl<E: HighlightEngine> HighlightCache<E> {
    /// Create an empty cache that builds its engine with `factory` on first use.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<E, HighlightError> + Send + Sync + 'static,
    {
        Self {
            slot: Arc::new(Slot {
                outcome: OnceLock::new(),
                started: AtomicBool::new(false),
                settled: watch::channel(()).0,
            }),
            factory: Arc::new(factory),
            constructions: AtomicUsize::new(0),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CacheState {
        match self.slot.outcome.get() {
            Some(Ok(_)) => CacheState::Ready,
            Some(Err(_)) => CacheState::Failed,
            None if self.slot.started.load(Ordering::Acquire) => CacheState::Constructing,
            None => CacheState::Uninitialized,
        }
    }

    /// Number of times the factory has been invoked.
    pub fn construction_count(&self) -> usize {
        self.constructions.load(Ordering::Acquire)
    }

    /// The engine, if construction has already completed.
    pub fn ready_engine(&self) -> Option<&E> {
        self.slot.outcome.get()?.as_ref().ok()
    }

    /// Get the engine, constructing it on first use.
    ///
    /// Concurrent callers share one construction, which runs on the blocking
    /// pool so it does not stall other tasks. Must be called within a Tokio
    /// runtime.
    pub async fn engine(&self) -> Result<&E, HighlightError> {
        loop {
            // Subscribe before checking so a construction finishing in
            // between still wakes us.
            let mut settled = self.slot.settled.subscribe();

            if let Some(outcome) = self.slot.outcome.get() {
                return outcome.as_ref().map_err(Clone::clone);
            }
            self.start();
            if settled.changed().await.is_err() {
                return Err(HighlightError::Join("construction channel closed".to_owned()));
            }
        }
    }

    /// Spawn the construction task unless one is already running.
    fn start(&self) {
        if self.slot.started.swap(true, Ordering::AcqRel) {
            return;
        }
        self.constructions.fetch_add(1, Ordering::AcqRel);
        tracing::debug!("constructing highlighting engine");

        let factory = Arc::clone(&self.factory);
        let guard = SettleGuard(Arc::clone(&self.slot));
        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || factory())
                .await
                .map_err(|e| HighlightError::Join(e.to_string()))
                .and_then(|built| built);

            match &result {
                Ok(_) => tracing::debug!("highlighting engine ready"),
                Err(e) => tracing::warn!("highlighting engine unavailable: {e}"),
            }
            let _ = guard.0.outcome.set(result);
            drop(guard);
        });
    }

    /// Highlight `code`, waiting for the engine if necessary.
    ///
    /// Falls back to escaped raw code when the engine cannot be built or
    /// fails on this input.
    pub async fn highlight(&self, code: &str, language: &str) -> Highlighted {
        match self.engine().await {
            Ok(engine) => Highlighted {
                html: highlight_or_raw(engine, code, language),
                loading: false,
            },
            Err(_) => Highlighted::raw(code, false),
        }
    }

    /// Highlight `code` only if the engine is already ready.
    ///
    /// Never waits: while the engine is missing this returns escaped raw code
    /// with `loading` set. After a failed construction `loading` is cleared.
    pub fn peek(&self, code: &str, language: &str) -> Highlighted {
        match self.slot.outcome.get() {
            Some(Ok(engine)) => Highlighted {
                html: highlight_or_raw(engine, code, language),
                loading: false,
            },
            Some(Err(_)) => Highlighted::raw(code, false),
            None => Highlighted::raw(code, true),
        }
    }
}

fn highlight_or_raw<E: HighlightEngine>(engine: &E, code: &str, language: &str) -> String {
    engine.highlight(code, language).unwrap_or_else(|e| {
        tracing::warn!(language, "falling back to plain code: {e}");
        escape_html(code)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    /// Engine that upper-cases its input and counts calls.
    struct ShoutEngine {
        id: usize,
    }

    impl HighlightEngine for ShoutEngine {
        fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
            if code.contains("boom") {
                return Err(HighlightError::Engine("boom".to_owned()));
            }
            Ok(format!("[{language}#{}]{}", self.id, code.to_uppercase()))
        }

        fn supports(&self, language: &str) -> bool {
            language == "shout"
        }
    }

    fn slow_cache(counter: Arc<AtomicUsize>) -> HighlightCache<ShoutEngine> {
        HighlightCache::new(move || {
            let id = counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(30));
            Ok(ShoutEngine { id })
        })
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_construction() {
        let counter = Arc::new(AtomicUsize::new(0));
        let cache = slow_cache(Arc::clone(&counter));
        assert_eq!(cache.state(), CacheState::Uninitialized);

        let (a, b, c, d) = tokio::join!(
            cache.highlight("a", "shout"),
            cache.highlight("b", "shout"),
            cache.highlight("c", "other"),
            cache.engine(),
        );

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(cache.construction_count(), 1);
        assert_eq!(cache.state(), CacheState::Ready);
        assert_eq!(a.html, "[shout#0]A");
        assert_eq!(b.html, "[shout#0]B");
        assert_eq!(c.html, "[other#0]C");
        assert_eq!(d.unwrap().id, 0);
        assert!(!a.loading);
    }

    #[tokio::test]
    async fn test_ready_engine_is_reused() {
        let counter = Arc::new(AtomicUsize::new(0));
        let cache = slow_cache(Arc::clone(&counter));

        cache.highlight("x", "shout").await;
        cache.highlight("y", "shout").await;
        let first = cache.engine().await.unwrap() as *const ShoutEngine;
        let second = cache.engine().await.unwrap() as *const ShoutEngine;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_peek_before_and_after_ready() {
        let counter = Arc::new(AtomicUsize::new(0));
        let cache = slow_cache(counter);

        let early = cache.peek("a < b", "shout");
        assert_eq!(
            early,
            Highlighted {
                html: "a &lt; b".to_owned(),
                loading: true,
            }
        );
        // Peeking never starts construction.
        assert_eq!(cache.construction_count(), 0);
        assert!(cache.ready_engine().is_none());

        cache.engine().await.unwrap();
        let late = cache.peek("a", "shout");
        assert_eq!(late.html, "[shout#0]A");
        assert!(!late.loading);
    }

    #[tokio::test]
    async fn test_engine_error_falls_back_to_raw() {
        let cache = HighlightCache::new(|| Ok(ShoutEngine { id: 7 }));
        let out = cache.highlight("<boom>", "shout").await;
        assert_eq!(out.html, "&lt;boom&gt;");
        assert!(!out.loading);
    }

    #[tokio::test]
    async fn test_construction_failure_is_kept() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let cache = HighlightCache::new(move || -> Result<ShoutEngine, HighlightError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(HighlightError::Construction("missing syntaxes".to_owned()))
        });

        for _ in 0..4 {
            let out = cache.highlight("<x>", "shout").await;
            assert_eq!(out.html, "&lt;x&gt;");
            assert!(!out.loading);
        }

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(cache.construction_count(), 1);
        assert_eq!(cache.state(), CacheState::Failed);
        assert!(cache.ready_engine().is_none());
        assert!(matches!(
            cache.engine().await,
            Err(HighlightError::Construction(_))
        ));
        // A failed engine is not loading any more.
        assert!(!cache.peek("x", "shout").loading);
    }

    #[tokio::test]
    async fn test_dropped_request_does_not_restart_construction() {
        let counter = Arc::new(AtomicUsize::new(0));
        let cache = HighlightCache::new({
            let counter = Arc::clone(&counter);
            move || {
                let id = counter.fetch_add(1, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(100));
                Ok(ShoutEngine { id })
            }
        });

        let early = tokio::time::timeout(
            Duration::from_millis(10),
            cache.highlight("a", "shout"),
        )
        .await;
        assert!(early.is_err());
        assert_eq!(cache.state(), CacheState::Constructing);

        let late = cache.highlight("b", "shout").await;
        assert_eq!(late.html, "[shout#0]B");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(cache.construction_count(), 1);
        assert_eq!(cache.state(), CacheState::Ready);
    }
}

//! Reader progress for Lingo.
//!
//! Progress is keyed by language id plus entry id, because entry ids are only
//! unique within one language. Persistence is a convenience: stores never
//! return errors, and a store that cannot read or write behaves as if no
//! progress was recorded.
//!
//! # Implementations
//!
//! - [`NullProgressStore`]: records nothing (progress tracking disabled)
//! - [`FileProgressStore`]: JSON file on disk
//!
//! # Example
//!
//! ```
//! use lingo_progress::{NullProgressStore, ProgressStore};
//!
//! let store = NullProgressStore;
//! store.mark_completed("cpp", "hello-world");
//! assert!(!store.is_completed("cpp", "hello-world"));
//! assert_eq!(store.count_completed("cpp"), 0);
//! ```

mod file;
pub use file::FileProgressStore;

/// Per-language completion and last-visit tracking.
pub trait ProgressStore: Send + Sync {
    /// Whether the entry was marked completed.
    fn is_completed(&self, lang_id: &str, entry_id: &str) -> bool;

    /// Mark an entry completed. Marking twice is a no-op.
    fn mark_completed(&self, lang_id: &str, entry_id: &str);

    /// Number of completed entries in a language.
    fn count_completed(&self, lang_id: &str) -> usize;

    /// The entry most recently opened in a language.
    fn last_visited(&self, lang_id: &str) -> Option<String>;

    /// Remember that an entry was opened.
    fn record_visit(&self, lang_id: &str, entry_id: &str);

    /// Forget all progress for a language.
    fn reset(&self, lang_id: &str);
}

/// [`ProgressStore`] that never records anything.
///
/// Used when progress tracking is disabled in the configuration.
pub struct NullProgressStore;

impl ProgressStore for NullProgressStore {
    fn is_completed(&self, _lang_id: &str, _entry_id: &str) -> bool {
        false
    }

    fn mark_completed(&self, _lang_id: &str, _entry_id: &str) {}

    fn count_completed(&self, _lang_id: &str) -> usize {
        0
    }

    fn last_visited(&self, _lang_id: &str) -> Option<String> {
        None
    }

    fn record_visit(&self, _lang_id: &str, _entry_id: &str) {}

    fn reset(&self, _lang_id: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_store_records_nothing() {
        let store = NullProgressStore;
        store.mark_completed("cpp", "hello-world");
        store.record_visit("cpp", "hello-world");

        assert!(!store.is_completed("cpp", "hello-world"));
        assert_eq!(store.count_completed("cpp"), 0);
        assert_eq!(store.last_visited("cpp"), None);
    }

    #[test]
    fn test_null_store_is_object_safe() {
        let store: Box<dyn ProgressStore> = Box::new(NullProgressStore);
        store.reset("cpp");
        assert_eq!(store.count_completed("cpp"), 0);
    }
}

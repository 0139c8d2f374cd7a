//! Navigation controller.
//!
//! [`Navigator`] owns the reader's position in the library: the current
//! language, the selected entry, collapsed sidebar categories and the scroll
//! tracker for the entry on screen. Every state reset happens synchronously
//! inside the call that causes it; anything that must happen later (scrolling
//! the container) is returned as a [`ScrollEffect`] for the host to schedule.

use std::collections::BTreeSet;
use std::time::Duration;

use lingo_content::{
    Entry, EntryRef, LanguageCorpus, Library, adjacent_entries, find_entry_by_id, section_ids,
};

use crate::observer::{ObserverOptions, VisibilityObserver};
use crate::tracker::{ScrollMetrics, ScrollTracker};

/// Delay between selecting an entry and scrolling it to the top.
pub const DEFAULT_SCROLL_DELAY: Duration = Duration::from_millis(50);

/// Scroll the host should perform after a navigation call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrollEffect {
    /// Scroll the content container to the top once `delay` has elapsed.
    ToTop { delay: Duration, smooth: bool },
    /// Bring the anchor with this section id into view.
    ToAnchor { id: String, smooth: bool },
}

/// Snapshot of the navigation state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationState {
    pub language_id: Option<String>,
    pub selected_entry_id: Option<String>,
    pub active_section_id: Option<String>,
    /// Scroll progress in `[0, 100]`.
    pub scroll_progress: f64,
    pub collapsed_category_ids: BTreeSet<String>,
}

/// Table-of-contents line for the selected entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocItem<'a> {
    pub id: String,
    pub heading: &'a str,
    pub active: bool,
}

/// Tunables for a [`Navigator`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigatorOptions {
    pub scroll_delay: Duration,
    pub observer: ObserverOptions,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            scroll_delay: DEFAULT_SCROLL_DELAY,
            observer: ObserverOptions::default(),
        }
    }
}

/// Reader navigation over a [`Library`].
pub struct Navigator<'a, O> {
    library: &'a Library,
    corpus: Option<&'a LanguageCorpus>,
    selected: Option<String>,
    collapsed: BTreeSet<String>,
    tracker: ScrollTracker<O>,
    scroll_delay: Duration,
}

impl<'a, O: VisibilityObserver> Navigator<'a, O> {
    /// Create a navigator with no language selected.
    pub fn new(library: &'a Library, observer: O, options: NavigatorOptions) -> Self {
        Self {
            library,
            corpus: None,
            selected: None,
            collapsed: BTreeSet::new(),
            tracker: ScrollTracker::new(observer, options.observer),
            scroll_delay: options.scroll_delay,
        }
    }

    /// Switch to another language.
    ///
    /// Selects the first entry of the first category, expands every category
    /// and clears the active section and progress. Unknown language ids leave
    /// the state untouched and return `None`.
    pub fn change_language(&mut self, lang_id: &str) -> Option<ScrollEffect> {
        let Some(corpus) = self.library.language(lang_id) else {
            tracing::warn!(language = lang_id, "unknown language");
            return None;
        };

        self.corpus = Some(corpus);
        self.collapsed.clear();
        self.tracker.reset();

        let first = corpus
            .categories
            .iter()
            .find_map(|category| category.entries.first());
        match first {
            Some(entry) => Some(self.enter(entry)),
            None => {
                self.selected = None;
                self.tracker.resubscribe(Vec::new());
                None
            }
        }
    }

    /// Select an entry of the current language.
    ///
    /// Returns `None` when the id is unknown; the selection is unchanged.
    pub fn select_entry(&mut self, entry_id: &str) -> Option<ScrollEffect> {
        let corpus = self.corpus?;
        let Some(found) = find_entry_by_id(&corpus.categories, entry_id) else {
            tracing::debug!(entry = entry_id, "entry not found");
            return None;
        };
        Some(self.enter(found.entry))
    }

    fn enter(&mut self, entry: &Entry) -> ScrollEffect {
        tracing::debug!(entry = %entry.id, "selecting entry");
        self.selected = Some(entry.id.clone());
        self.tracker.resubscribe(section_ids(entry));
        ScrollEffect::ToTop {
            delay: self.scroll_delay,
            smooth: true,
        }
    }

    /// Select the entry before the current one in sidebar order.
    pub fn previous(&mut self) -> Option<ScrollEffect> {
        let id = self.neighbour(true)?;
        self.select_entry(&id)
    }

    /// Select the entry after the current one in sidebar order.
    pub fn next(&mut self) -> Option<ScrollEffect> {
        let id = self.neighbour(false)?;
        self.select_entry(&id)
    }

    fn neighbour(&self, previous: bool) -> Option<String> {
        let corpus = self.corpus?;
        let selected = self.selected.as_deref()?;
        let adjacent = adjacent_entries(&corpus.categories, selected);
        let target = if previous {
            adjacent.previous
        } else {
            adjacent.next
        };
        target.map(|flat| flat.entry.id.clone())
    }

    /// Open a search hit, switching language first when needed.
    pub fn open_search_result(&mut self, lang_id: &str, entry_id: &str) -> Option<ScrollEffect> {
        if self.language_id() != Some(lang_id) {
            self.change_language(lang_id)?;
        }
        self.select_entry(entry_id)
    }

    /// Collapse or expand a sidebar category. Returns whether it is now collapsed.
    pub fn toggle_category(&mut self, category_id: &str) -> bool {
        if self.collapsed.remove(category_id) {
            false
        } else {
            self.collapsed.insert(category_id.to_owned());
            true
        }
    }

    #[must_use]
    pub fn is_collapsed(&self, category_id: &str) -> bool {
        self.collapsed.contains(category_id)
    }

    /// Scroll to a section of the current entry without changing the selection.
    #[must_use]
    pub fn scroll_to_section(&self, section_id: &str) -> Option<ScrollEffect> {
        self.tracker
            .anchors()
            .iter()
            .any(|anchor| anchor == section_id)
            .then(|| ScrollEffect::ToAnchor {
                id: section_id.to_owned(),
                smooth: true,
            })
    }

    /// Feed a scroll event to the tracker.
    pub fn on_scroll(&mut self, metrics: &ScrollMetrics) {
        self.tracker.on_scroll(metrics);
    }

    #[must_use]
    pub fn language(&self) -> Option<&'a LanguageCorpus> {
        self.corpus
    }

    #[must_use]
    pub fn language_id(&self) -> Option<&str> {
        self.corpus.map(|corpus| corpus.id.as_str())
    }

    /// The selected entry with its category.
    #[must_use]
    pub fn current_entry(&self) -> Option<EntryRef<'a>> {
        let corpus = self.corpus?;
        find_entry_by_id(&corpus.categories, self.selected.as_deref()?)
    }

    /// Table of contents for the selected entry, marking the active section.
    #[must_use]
    pub fn toc(&self) -> Vec<TocItem<'a>> {
        let Some(current) = self.current_entry() else {
            return Vec::new();
        };
        let active = self.tracker.active_section();
        current
            .entry
            .sections
            .iter()
            .zip(section_ids(current.entry))
            .map(|(section, id)| TocItem {
                active: active == Some(id.as_str()),
                id,
                heading: &section.heading,
            })
            .collect()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> NavigationState {
        NavigationState {
            language_id: self.language_id().map(str::to_owned),
            selected_entry_id: self.selected.clone(),
            active_section_id: self.tracker.active_section().map(str::to_owned),
            scroll_progress: self.tracker.progress(),
            collapsed_category_ids: self.collapsed.clone(),
        }
    }

    pub fn tracker(&self) -> &ScrollTracker<O> {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut ScrollTracker<O> {
        &mut self.tracker
    }
}

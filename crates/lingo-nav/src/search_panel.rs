//! Keyboard-driven search panel.

use lingo_search::{SearchIndex, SearchResult};

/// A key the panel reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Other,
}

/// A key press with its modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    /// Command key on macOS.
    pub meta: bool,
}

impl KeyPress {
    #[must_use]
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }

    #[must_use]
    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            meta: false,
        }
    }

    #[must_use]
    pub fn meta(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: true,
        }
    }

    fn is_search_shortcut(&self) -> bool {
        (self.ctrl || self.meta) && matches!(self.key, Key::Char('k' | 'K'))
    }
}

/// What a key press did to the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelAction {
    Opened,
    Closed,
    /// The key is not a panel shortcut; the host should handle it.
    Ignored,
}

/// Search overlay state: open flag, query and current results.
///
/// Results are recomputed synchronously on every query change; a newer query
/// simply replaces the previous list.
#[derive(Debug)]
pub struct SearchPanel<'a> {
    index: SearchIndex<'a>,
    open: bool,
    query: String,
    results: Vec<SearchResult<'a>>,
}

impl<'a> SearchPanel<'a> {
    #[must_use]
    pub fn new(index: SearchIndex<'a>) -> Self {
        Self {
            index,
            open: false,
            query: String::new(),
            results: Vec::new(),
        }
    }

    /// React to a global key press.
    ///
    /// Ctrl+K (Cmd+K on macOS) toggles the panel. Escape closes it and
    /// clears the query.
    pub fn handle_key(&mut self, press: KeyPress) -> PanelAction {
        if press.is_search_shortcut() {
            self.open = !self.open;
            return if self.open {
                PanelAction::Opened
            } else {
                PanelAction::Closed
            };
        }

        if press.key == Key::Escape && self.open {
            self.close();
            return PanelAction::Closed;
        }

        PanelAction::Ignored
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the panel and clear the query and results.
    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.results.clear();
    }

    /// Replace the query and recompute results.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.results = self.index.search(&self.query);
    }

    /// Take a result and close the panel.
    ///
    /// Returns the `(language, entry)` pair to hand to the navigator.
    pub fn choose(&mut self, position: usize) -> Option<(&'a str, &'a str)> {
        let result = self.results.get(position)?;
        let target = (result.lang_id, result.entry.id.as_str());
        self.close();
        Some(target)
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn results(&self) -> &[SearchResult<'a>] {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_content::{Category, Entry, LanguageCorpus, Library, Section};
    use pretty_assertions::assert_eq;

    fn library() -> Library {
        Library::new(vec![
            LanguageCorpus::new("cpp", "C++").with_category(
                Category::new("basics", "Basics").with_entry(
                    Entry::new("hello-world", "Hello World").with_section(Section::new(
                        "Your First Program",
                        "std::endl flushes the stream; prefer a newline character.",
                    )),
                ),
            ),
            LanguageCorpus::new("python", "Python").with_category(
                Category::new("strings", "Strings").with_entry(Entry::new(
                    "newline-escapes",
                    "Newline Escapes",
                )),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_shortcut_toggles() {
        let library = library();
        let mut panel = SearchPanel::new(SearchIndex::new(&library));

        assert_eq!(panel.handle_key(KeyPress::ctrl(Key::Char('k'))), PanelAction::Opened);
        assert!(panel.is_open());
        assert_eq!(panel.handle_key(KeyPress::meta(Key::Char('k'))), PanelAction::Closed);
        assert!(!panel.is_open());
        assert_eq!(panel.handle_key(KeyPress::plain(Key::Char('k'))), PanelAction::Ignored);
    }

    #[test]
    fn test_escape_closes_and_clears() {
        let library = library();
        let mut panel = SearchPanel::new(SearchIndex::new(&library));
        panel.handle_key(KeyPress::ctrl(Key::Char('K')));
        panel.set_query("hello");
        assert_eq!(panel.results().len(), 1);

        assert_eq!(panel.handle_key(KeyPress::plain(Key::Escape)), PanelAction::Closed);
        assert!(!panel.is_open());
        assert_eq!(panel.query(), "");
        assert!(panel.results().is_empty());

        // Escape on a closed panel belongs to the host.
        assert_eq!(panel.handle_key(KeyPress::plain(Key::Escape)), PanelAction::Ignored);
    }

    #[test]
    fn test_every_keystroke_recomputes() {
        let library = library();
        let mut panel = SearchPanel::new(SearchIndex::new(&library));
        panel.open();

        panel.set_query("n");
        let broad = panel.results().len();
        panel.set_query("newline");
        let results = panel.results();
        assert!(results.len() <= broad);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].lang_id, "cpp");
        assert_eq!(results[0].match_context, Some("Your First Program"));
        assert_eq!(results[1].lang_id, "python");
        assert_eq!(results[1].match_context, None);
    }

    #[test]
    fn test_choose_returns_target_and_closes() {
        let library = library();
        let mut panel = SearchPanel::new(SearchIndex::new(&library));
        panel.open();
        panel.set_query("newline");

        assert_eq!(panel.choose(1), Some(("python", "newline-escapes")));
        assert!(!panel.is_open());
        assert_eq!(panel.choose(0), None);
    }
}

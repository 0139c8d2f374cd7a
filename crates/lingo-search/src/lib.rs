//! Cross-language search over tutorial content.
//!
//! [`SearchIndex`] scans every language, category and entry of a
//! [`Library`] for a case-insensitive substring. An entry matches on its
//! title first; only when the title does not match are its sections scanned,
//! in declaration order, and the first section whose heading or body contains
//! the query becomes the result's match context.
//!
//! Results keep corpus iteration order (language, then category, then entry)
//! and are cut off at a fixed maximum. There is no relevance scoring, so a
//! query with more matches than the cap never surfaces entries from later
//! languages.
//!
//! The scan is cheap enough to run on every keystroke.
//!
//! # Example
//!
//! ```
//! use lingo_content::{Category, Entry, LanguageCorpus, Library};
//! use lingo_search::SearchIndex;
//!
//! let library = Library::new(vec![
//!     LanguageCorpus::new("cpp", "C++").with_category(
//!         Category::new("basics", "Basics").with_entry(Entry::new("hello-world", "Hello World")),
//!     ),
//! ])
//! .unwrap();
//!
//! let results = SearchIndex::new(&library).search("HELLO");
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].lang_id, "cpp");
//! assert!(results[0].match_context.is_none());
//! assert!(SearchIndex::new(&library).search("   ").is_empty());
//! ```

use lingo_content::{Entry, Library};

/// Default cap on the number of results.
pub const MAX_RESULTS: usize = 30;

/// One search hit.
///
/// Entry ids are only unique within a language, so a result always carries
/// its language id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult<'a> {
    /// Language the entry belongs to.
    pub lang_id: &'a str,
    /// Label of the category owning the entry.
    pub category_label: &'a str,
    /// The matching entry.
    pub entry: &'a Entry,
    /// Heading of the first matching section, `None` for a title match.
    pub match_context: Option<&'a str>,
}

/// Substring search over a [`Library`].
#[derive(Clone, Copy, Debug)]
pub struct SearchIndex<'a> {
    library: &'a Library,
    max_results: usize,
}

impl<'a> SearchIndex<'a> {
    /// Create an index with the default result cap.
    #[must_use]
    pub fn new(library: &'a Library) -> Self {
        Self {
            library,
            max_results: MAX_RESULTS,
        }
    }

    /// Override the result cap.
    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// The configured result cap.
    #[must_use]
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Search all languages for `query`.
    ///
    /// An empty or whitespace-only query yields no results.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchResult<'a>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();
        for corpus in self.library.languages() {
            for category in &corpus.categories {
                for entry in &category.entries {
                    if results.len() >= self.max_results {
                        return results;
                    }
                    if let Some(match_context) = match_entry(entry, &needle) {
                        results.push(SearchResult {
                            lang_id: &corpus.id,
                            category_label: &category.label,
                            entry,
                            match_context,
                        });
                    }
                }
            }
        }
        results
    }
}

/// Match a single entry against a lowercased needle.
///
/// Returns `Some(None)` for a title match, `Some(Some(heading))` for a
/// section match and `None` when nothing matches.
fn match_entry<'a>(entry: &'a Entry, needle: &str) -> Option<Option<&'a str>> {
    if contains_lowercase(&entry.title, needle) {
        return Some(None);
    }

    entry
        .sections
        .iter()
        .find(|s| contains_lowercase(&s.heading, needle) || contains_lowercase(&s.content, needle))
        .map(|s| Some(s.heading.as_str()))
}

/// Case-insensitive containment; `needle` must already be lowercase.
fn contains_lowercase(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_content::{Category, LanguageCorpus, Section};
    use pretty_assertions::assert_eq;

    fn cpp_corpus() -> LanguageCorpus {
        LanguageCorpus::new("cpp", "C++")
            .with_category(
                Category::new("basics", "Basics")
                    .with_entry(
                        Entry::new("hello-world", "Hello World")
                            .with_section(Section::new(
                                "Your First Program",
                                "Print text with std::cout.",
                            ))
                            .with_section(Section::new(
                                "Ending Lines with a Newline",
                                "Use std::endl or a newline escape.",
                            )),
                    )
                    .with_entry(
                        Entry::new("variables", "Variables")
                            .with_section(Section::new("Declaring", "int x = 5;"))
                            .with_section(Section::new("Printing", "Combine with std::cout.")),
                    ),
            )
            .with_category(
                Category::new("memory", "Memory")
                    .with_entry(Entry::new("pointers", "Pointers").with_section(Section::new(
                        "Addresses",
                        "A pointer stores an address.",
                    ))),
            )
    }

    fn python_corpus() -> LanguageCorpus {
        LanguageCorpus::new("python", "Python").with_category(
            Category::new("basics", "Basics").with_entry(
                Entry::new("hello-world", "Hello World")
                    .with_section(Section::new("print()", "Python prints with print().")),
            ),
        )
    }

    fn library() -> Library {
        Library::new(vec![cpp_corpus(), python_corpus()]).unwrap()
    }

    fn keys(results: &[SearchResult<'_>]) -> Vec<(String, String)> {
        results
            .iter()
            .map(|r| (r.lang_id.to_owned(), r.entry.id.clone()))
            .collect()
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let library = library();
        let index = SearchIndex::new(&library);
        assert!(index.search("").is_empty());
        assert!(index.search("   \t\n").is_empty());
    }

    #[test]
    fn test_title_match_has_no_context() {
        let library = library();
        let results = SearchIndex::new(&library).search("  hello ");
        assert_eq!(
            keys(&results),
            vec![
                ("cpp".to_owned(), "hello-world".to_owned()),
                ("python".to_owned(), "hello-world".to_owned()),
            ]
        );
        assert!(results.iter().all(|r| r.match_context.is_none()));
        assert_eq!(results[0].category_label, "Basics");
    }

    #[test]
    fn test_title_match_takes_precedence_over_sections() {
        let library = library();
        // "pointer" is in both the title and the body of the only section.
        let results = SearchIndex::new(&library).search("pointer");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.id, "pointers");
        assert_eq!(results[0].match_context, None);
    }

    #[test]
    fn test_section_match_reports_first_matching_heading() {
        let library = library();
        let results = SearchIndex::new(&library).search("STD::COUT");
        assert_eq!(
            keys(&results),
            vec![
                ("cpp".to_owned(), "hello-world".to_owned()),
                ("cpp".to_owned(), "variables".to_owned()),
            ]
        );
        assert_eq!(results[0].match_context, Some("Your First Program"));
        assert_eq!(results[1].match_context, Some("Printing"));
    }

    #[test]
    fn test_heading_only_match() {
        let library = library();
        let results = SearchIndex::new(&library).search("addresses");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.id, "pointers");
        assert_eq!(results[0].category_label, "Memory");
        assert_eq!(results[0].match_context, Some("Addresses"));
    }

    #[test]
    fn test_tags_are_not_searched() {
        let mut entry = Entry::new("loops", "Loops")
            .with_section(Section::new("For", "Repeat a block."));
        entry.tags = vec!["iteration".to_owned()];
        let library = Library::new(vec![
            LanguageCorpus::new("go", "Go").with_category(Category::new("flow", "Flow").with_entry(entry)),
        ])
        .unwrap();

        assert!(SearchIndex::new(&library).search("iteration").is_empty());
    }

    #[test]
    fn test_newline_scenario_single_result() {
        let library = library();
        let results = SearchIndex::new(&library).search("newline");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].lang_id, "cpp");
        assert_eq!(results[0].match_context, Some("Ending Lines with a Newline"));
    }

    #[test]
    fn test_no_match() {
        let library = library();
        assert!(SearchIndex::new(&library).search("monad").is_empty());
    }

    #[test]
    fn test_results_capped_in_corpus_order() {
        let mut category = Category::new("many", "Many");
        for i in 0..40 {
            category = category.with_entry(Entry::new(format!("topic-{i}"), format!("Topic {i}")));
        }
        let library = Library::new(vec![
            LanguageCorpus::new("a", "A").with_category(category.clone()),
            LanguageCorpus::new("b", "B").with_category(category),
        ])
        .unwrap();

        let results = SearchIndex::new(&library).search("topic");
        assert_eq!(results.len(), MAX_RESULTS);
        assert!(results.iter().all(|r| r.lang_id == "a"));
        assert_eq!(results[0].entry.id, "topic-0");
        assert_eq!(results[29].entry.id, "topic-29");
    }

    #[test]
    fn test_custom_cap() {
        let library = library();
        let index = SearchIndex::new(&library).with_max_results(1);
        assert_eq!(index.max_results(), 1);
        assert_eq!(index.search("hello").len(), 1);
    }

    #[test]
    fn test_unicode_case_folding() {
        let library = Library::new(vec![LanguageCorpus::new("de", "Deutsch").with_category(
            Category::new("k", "Kapitel").with_entry(Entry::new("gruss", "ÜBUNG Eins")),
        )])
        .unwrap();
        assert_eq!(SearchIndex::new(&library).search("übung").len(), 1);
    }
}

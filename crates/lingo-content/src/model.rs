//! Content model types.
//!
//! The shape mirrors the corpus files: a language corpus holds ordered
//! categories, each category holds ordered entries, each entry holds ordered
//! sections. Declaration order drives the sidebar, previous/next traversal
//! and search result order.

use serde::{Deserialize, Serialize};

use crate::diagram::Diagram;
use crate::error::ContentError;

/// Difficulty badge shown next to an entry title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Lowercase name as written in corpus files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// A group of entries in the sidebar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier, used as the collapsed-state key.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Icon name or glyph.
    #[serde(default)]
    pub icon: String,
    /// Entries in display order.
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Category {
    /// Create an empty category.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: String::new(),
            entries: Vec::new(),
        }
    }

    /// Append an entry.
    #[must_use]
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }
}

/// One documentation topic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Identifier, unique within one language only.
    pub id: String,
    /// Display title.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Sections in reading order.
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quiz: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<Challenge>,
}

impl Entry {
    /// Create an entry without sections.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            difficulty: None,
            tags: Vec::new(),
            sections: Vec::new(),
            quiz: Vec::new(),
            challenge: None,
        }
    }

    /// Append a section.
    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}

/// One titled sub-unit of an entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text. Its slug is the section's anchor and TOC key.
    pub heading: String,
    /// Body text. Paragraphs are separated by a blank line.
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Language of `code` when it differs from the corpus language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// 1-indexed lines of `code` to emphasise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlight_lines: Vec<usize>,
    /// Expected program output for `code`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<Diagram>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analogy: Option<String>,
}

impl Section {
    /// Create a section with heading and body text.
    #[must_use]
    pub fn new(heading: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Attach a code sample.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Body paragraphs, split on blank lines with surrounding whitespace removed.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// Callout boxes attached to this section, in display order.
    pub fn callouts(&self) -> impl Iterator<Item = Callout<'_>> {
        [
            (CalloutKind::Tip, self.tip.as_deref()),
            (CalloutKind::Warning, self.warning.as_deref()),
            (CalloutKind::Note, self.note.as_deref()),
            (CalloutKind::Analogy, self.analogy.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, text)| text.map(|text| Callout { kind, text }))
    }
}

/// Kind of callout box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalloutKind {
    Tip,
    Warning,
    Note,
    Analogy,
}

impl CalloutKind {
    /// CSS-friendly name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tip => "tip",
            Self::Warning => "warning",
            Self::Note => "note",
            Self::Analogy => "analogy",
        }
    }
}

/// A callout attached to a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Callout<'a> {
    pub kind: CalloutKind,
    pub text: &'a str,
}

/// Multiple-choice quiz question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Coding challenge attached to an entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub starter_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

/// All categories for one programming language.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LanguageCorpus {
    /// Language identifier (e.g. "cpp"), also the default code language.
    pub id: String,
    /// Display label (e.g. "C++").
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl LanguageCorpus {
    /// Create an empty corpus.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            categories: Vec::new(),
        }
    }

    /// Append a category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Total number of entries across all categories.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }
}

/// Ordered set of every language corpus.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Library {
    languages: Vec<LanguageCorpus>,
}

impl Library {
    /// Build a library, rejecting duplicate language ids.
    pub fn new(languages: Vec<LanguageCorpus>) -> Result<Self, ContentError> {
        for (i, corpus) in languages.iter().enumerate() {
            if languages[..i].iter().any(|other| other.id == corpus.id) {
                return Err(ContentError::DuplicateLanguage(corpus.id.clone()));
            }
        }
        Ok(Self { languages })
    }

    /// Corpora in library order.
    #[must_use]
    pub fn languages(&self) -> &[LanguageCorpus] {
        &self.languages
    }

    /// Look up a corpus by language id.
    #[must_use]
    pub fn language(&self, id: &str) -> Option<&LanguageCorpus> {
        self.languages.iter().find(|corpus| corpus.id == id)
    }

    /// Whether the library holds no languages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paragraphs_split_on_blank_line() {
        let section = Section::new("Intro", "First line.\n\n  Second para.  \n\n\n\nThird.");
        let paragraphs: Vec<&str> = section.paragraphs().collect();
        assert_eq!(paragraphs, vec!["First line.", "Second para.", "Third."]);
    }

    #[test]
    fn test_callouts_in_display_order() {
        let section = Section {
            note: Some("n".to_owned()),
            tip: Some("t".to_owned()),
            ..Section::new("h", "")
        };
        let kinds: Vec<CalloutKind> = section.callouts().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![CalloutKind::Tip, CalloutKind::Note]);
    }

    #[test]
    fn test_library_rejects_duplicate_language() {
        let result = Library::new(vec![
            LanguageCorpus::new("cpp", "C++"),
            LanguageCorpus::new("cpp", "C++ again"),
        ]);
        assert!(matches!(result, Err(ContentError::DuplicateLanguage(id)) if id == "cpp"));
    }

    #[test]
    fn test_library_lookup() {
        let library = Library::new(vec![
            LanguageCorpus::new("cpp", "C++"),
            LanguageCorpus::new("python", "Python"),
        ])
        .unwrap();
        assert_eq!(library.language("python").unwrap().label, "Python");
        assert!(library.language("go").is_none());
    }

    #[test]
    fn test_entry_deserializes_with_defaults() {
        let yaml = "id: hello-world\ntitle: Hello World\ndifficulty: beginner\n";
        let entry: Entry = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(entry.difficulty, Some(Difficulty::Beginner));
        assert!(entry.sections.is_empty());
        assert!(entry.quiz.is_empty());
        assert!(entry.challenge.is_none());
    }
}

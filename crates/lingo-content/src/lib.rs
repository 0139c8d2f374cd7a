//! Tutorial content model for Lingo.
//!
//! This crate provides:
//! - [`Category`], [`Entry`], [`Section`]: the fixed content shape of a
//!   language corpus
//! - [`Diagram`]: closed sum type of the supported visualisations
//! - [`slugify`]: deterministic heading → section id derivation
//! - [`find_entry_by_id`], [`flatten_entries`], [`adjacent_entries`]: the
//!   category tree resolver
//! - [`load_library`]: loading every language corpus from a content directory
//!
//! Content is read-only once loaded. Entry ids are unique only within one
//! language, so anything that crosses languages carries the language id too.
//!
//! # Example
//!
//! ```
//! use lingo_content::{Category, Entry, find_entry_by_id, flatten_entries};
//!
//! let categories =
//!     vec![Category::new("basics", "Basics").with_entry(Entry::new("hello-world", "Hello World"))];
//!
//! let found = find_entry_by_id(&categories, "hello-world").unwrap();
//! assert_eq!(found.category.label, "Basics");
//! assert!(find_entry_by_id(&categories, "missing").is_none());
//! assert_eq!(flatten_entries(&categories).len(), 1);
//! ```

mod diagram;
mod error;
mod loader;
mod model;
mod slug;
mod tree;

pub use diagram::{
    ContainerMode, Diagram, DiagramError, Edge, HeapOrder, KeyValue, MemoryCell, StepFrame,
    TreeNode,
};
pub use error::ContentError;
pub use loader::{load_corpus, load_library};
pub use model::{
    Callout, CalloutKind, Category, Challenge, Difficulty, Entry, LanguageCorpus, Library,
    Question, Section,
};
pub use slug::{section_ids, slugify};
pub use tree::{Adjacent, EntryRef, FlatEntry, adjacent_entries, find_entry_by_id, flatten_entries};

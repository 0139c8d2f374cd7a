//! Heading → section id derivation.
//!
//! The slug of a section heading is both its anchor in the rendered page and
//! its key in the table of contents. Two sections of one entry sharing a
//! heading collide on both; keeping headings unique within an entry is a
//! corpus authoring rule.

use crate::model::Entry;

/// Convert heading text to a section id.
///
/// Lowercases ASCII letters, collapses every run of non-alphanumeric
/// characters into a single `-`, and trims leading and trailing dashes.
///
/// # Examples
///
/// ```
/// use lingo_content::slugify;
///
/// assert_eq!(slugify("Your First Program"), "your-first-program");
/// assert_eq!(slugify("  What's `std::cout`?  "), "what-s-std-cout");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !result.is_empty() {
                result.push('-');
            }
            pending_dash = false;
            result.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    result
}

/// Section ids of an entry in declaration order.
#[must_use]
pub fn section_ids(entry: &Entry) -> Vec<String> {
    entry.sections.iter().map(|s| slugify(&s.heading)).collect()
}

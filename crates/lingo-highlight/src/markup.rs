//! Markup helpers shared by the highlighted and raw rendering paths.

use std::fmt::Write;

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Wrap every line of `markup` in a line span, marking the 1-indexed `lines`.
///
/// Works purely on line numbers, so it applies equally to engine output and
/// to escaped raw code. Line numbers outside the markup are ignored.
///
/// ```
/// use lingo_highlight::emphasize_lines;
///
/// assert_eq!(
///     emphasize_lines("a\nb", &[2]),
///     "<span class=\"line\">a</span>\n<span class=\"line highlighted\">b</span>"
/// );
/// ```
#[must_use]
pub fn emphasize_lines(markup: &str, lines: &[usize]) -> String {
    let mut out = String::with_capacity(markup.len() + 32);
    for (i, line) in markup.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let class = if lines.contains(&(i + 1)) {
            "line highlighted"
        } else {
            "line"
        };
        write!(out, r#"<span class="{class}">{line}</span>"#).unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_emphasize_no_lines() {
        assert_eq!(
            emphasize_lines("x", &[]),
            r#"<span class="line">x</span>"#
        );
    }

    #[test]
    fn test_emphasize_is_one_indexed() {
        let out = emphasize_lines("first\nsecond\nthird", &[1, 3]);
        assert_eq!(
            out,
            concat!(
                r#"<span class="line highlighted">first</span>"#,
                "\n",
                r#"<span class="line">second</span>"#,
                "\n",
                r#"<span class="line highlighted">third</span>"#,
            )
        );
    }

    #[test]
    fn test_emphasize_ignores_out_of_range() {
        let out = emphasize_lines("only", &[0, 2, 99]);
        assert_eq!(out, r#"<span class="line">only</span>"#);
    }

    #[test]
    fn test_emphasize_raw_fallback() {
        let raw = escape_html("if (a < b)\n  return;");
        let out = emphasize_lines(&raw, &[2]);
        assert!(out.contains(r#"<span class="line">if (a &lt; b)</span>"#));
        assert!(out.contains(r#"<span class="line highlighted">  return;</span>"#));
    }
}

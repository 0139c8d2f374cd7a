//! Inline markdown for section prose and callouts.

use pulldown_cmark::{Event, Options, Parser, html};

/// Render a prose block to HTML.
///
/// Raw HTML in the source is shown as text rather than passed through.
#[must_use]
pub fn render_markdown(text: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inline_formatting() {
        assert_eq!(
            render_markdown("Use **`std::cout`** to *print*."),
            "<p>Use <strong><code>std::cout</code></strong> to <em>print</em>.</p>\n"
        );
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let out = render_markdown("a <b>bold</b> claim");
        assert_eq!(out, "<p>a &lt;b&gt;bold&lt;/b&gt; claim</p>\n");
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(render_markdown("if a < b && c"), "<p>if a &lt; b &amp;&amp; c</p>\n");
    }
}

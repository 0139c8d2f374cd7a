//! `lingo render` command implementation.

use std::fmt::Write;
use std::path::PathBuf;

use clap::Args;
use lingo_content::find_entry_by_id;
use lingo_highlight::escape_html;
use lingo_render::{EntryRenderer, RenderedEntry};

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Language id (e.g. "cpp").
    language: String,

    /// Entry id.
    entry: String,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wrap the entry in a complete HTML page with a table of contents.
    #[arg(long)]
    standalone: bool,
}

impl RenderArgs {
    pub(crate) async fn execute(self, common: &CommonArgs) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = common.load(None)?;
        let corpus = ctx.language(&self.language)?;
        let found = find_entry_by_id(&corpus.categories, &self.entry).ok_or_else(|| {
            CliError::UnknownEntry {
                language: corpus.id.clone(),
                entry: self.entry.clone(),
            }
        })?;

        let highlight = &ctx.config.highlight;
        lingo_highlight::configure_global(&highlight.theme);
        let renderer = EntryRenderer::new(lingo_highlight::global())
            .with_default_language(highlight.default_language.as_str());
        let rendered = renderer.render(found.entry, Some(&corpus.id)).await;

        let html = if self.standalone {
            standalone_page(&found.entry.title, &corpus.label, &rendered)
        } else {
            rendered.html
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, html)?;
                output.info(&format!("Wrote {}", path.display()));
            }
            None => output.line(&html),
        }
        Ok(())
    }
}

/// Wrap a rendered entry in an HTML page with a table of contents.
fn standalone_page(title: &str, language_label: &str, rendered: &RenderedEntry) -> String {
    let mut page = String::with_capacity(rendered.html.len() + 512);
    write!(
        page,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{} - {}</title>\n</head>\n<body>\n",
        escape_html(title),
        escape_html(language_label)
    )
    .unwrap();

    if !rendered.toc.is_empty() {
        page.push_str("<nav class=\"toc\"><ul>");
        for item in &rendered.toc {
            write!(
                page,
                "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>",
                item.level,
                item.id,
                escape_html(&item.title)
            )
            .unwrap();
        }
        page.push_str("</ul></nav>\n");
    }

    page.push_str(&rendered.html);
    page.push_str("\n</body>\n</html>\n");
    page
}

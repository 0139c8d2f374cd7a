//! `lingo list` command implementation.

use clap::Args;
use lingo_content::LanguageCorpus;
use lingo_progress::ProgressStore;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Language to list entries of (default: list languages).
    language: Option<String>,
}

impl ListArgs {
    pub(crate) fn execute(self, common: &CommonArgs) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = common.load(None)?;
        let progress = ctx.progress_store();

        match self.language {
            Some(lang_id) => list_entries(&output, ctx.language(&lang_id)?, progress.as_ref()),
            None => {
                if ctx.library.is_empty() {
                    output.warning(&format!(
                        "No corpus files in {}",
                        ctx.config.content_resolved.dir.display()
                    ));
                }
                for corpus in ctx.library.languages() {
                    output.line(&format!(
                        "{:<12} {:<16} {:>3} entries, {} completed",
                        corpus.id,
                        corpus.label,
                        corpus.entry_count(),
                        progress.count_completed(&corpus.id)
                    ));
                }
            }
        }
        Ok(())
    }
}

fn list_entries(output: &Output, corpus: &LanguageCorpus, progress: &dyn ProgressStore) {
    let last = progress.last_visited(&corpus.id);
    for category in &corpus.categories {
        output.heading(&category.label);
        for entry in &category.entries {
            let mark = if progress.is_completed(&corpus.id, &entry.id) {
                "[x]"
            } else {
                "[ ]"
            };
            let line = match entry.difficulty {
                Some(difficulty) => format!(
                    "  {mark} {:<24} {} ({})",
                    entry.id,
                    entry.title,
                    difficulty.as_str()
                ),
                None => format!("  {mark} {:<24} {}", entry.id, entry.title),
            };
            if last.as_deref() == Some(entry.id.as_str()) {
                output.success_line(&format!("{line}  <- last visited"));
            } else {
                output.line(&line);
            }
        }
    }
}

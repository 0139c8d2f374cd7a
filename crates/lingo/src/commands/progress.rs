//! `lingo progress` command implementation.

use clap::Args;
use lingo_content::{LanguageCorpus, find_entry_by_id};
use lingo_progress::ProgressStore;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the progress command.
#[derive(Args)]
pub(crate) struct ProgressArgs {
    /// Language id (default: every language).
    language: Option<String>,

    /// Mark an entry of the language as completed.
    #[arg(long, requires = "language")]
    complete: Option<String>,

    /// Forget all progress for the language.
    #[arg(long, requires = "language", conflicts_with = "complete")]
    reset: bool,
}

impl ProgressArgs {
    pub(crate) fn execute(self, common: &CommonArgs) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = common.load(None)?;
        if !ctx.config.progress.enabled {
            output.warning("Progress tracking is disabled");
            return Ok(());
        }
        let progress = ctx.progress_store();

        let Some(lang_id) = self.language else {
            for corpus in ctx.library.languages() {
                summarize(&output, corpus, progress.as_ref());
            }
            return Ok(());
        };
        let corpus = ctx.language(&lang_id)?;

        if let Some(entry_id) = &self.complete {
            if find_entry_by_id(&corpus.categories, entry_id).is_none() {
                return Err(CliError::UnknownEntry {
                    language: corpus.id.clone(),
                    entry: entry_id.clone(),
                });
            }
            progress.mark_completed(&corpus.id, entry_id);
            output.info(&format!("Marked {entry_id} as completed"));
        }
        if self.reset {
            progress.reset(&corpus.id);
            output.info(&format!("Progress for {} reset", corpus.label));
        }

        summarize(&output, corpus, progress.as_ref());
        Ok(())
    }
}

fn summarize(output: &Output, corpus: &LanguageCorpus, progress: &dyn ProgressStore) {
    let total = corpus.entry_count();
    let done = progress.count_completed(&corpus.id);
    output.line(&format!(
        "{:<16} {done}/{total} completed ({}%)",
        corpus.label,
        percent(done, total)
    ));
    if let Some(last) = progress.last_visited(&corpus.id) {
        let title = find_entry_by_id(&corpus.categories, &last)
            .map_or(last.as_str(), |found| found.entry.title.as_str());
        output.dim_line(&format!("                 last visited: {title}"));
    }
}

/// Whole-number completion percentage, 0 for an empty corpus.
fn percent(done: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        (done.min(total) * 100) / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(3, 3), 100);
        // Progress for entries that were since removed.
        assert_eq!(percent(5, 3), 100);
    }
}

//! `lingo show` command implementation.

use clap::Args;
use lingo_content::{CalloutKind, EntryRef, Section, adjacent_entries};
use lingo_nav::{GeometryObserver, Navigator, TocItem};

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Language id (e.g. "cpp").
    language: String,

    /// Entry id (default: the last visited entry, else the first one).
    entry: Option<String>,

    /// Show the entry after the given one.
    #[arg(long, conflicts_with = "previous")]
    next: bool,

    /// Show the entry before the given one.
    #[arg(long)]
    previous: bool,

    /// Mark the shown entry as completed.
    #[arg(long)]
    complete: bool,
}

impl ShowArgs {
    pub(crate) fn execute(self, common: &CommonArgs) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = common.load(None)?;
        let corpus = ctx.language(&self.language)?;
        let progress = ctx.progress_store();

        let mut nav = Navigator::new(&ctx.library, GeometryObserver::new(), ctx.navigator_options());
        nav.change_language(&corpus.id);

        if let Some(entry_id) = &self.entry {
            if nav.select_entry(entry_id).is_none() {
                return Err(CliError::UnknownEntry {
                    language: corpus.id.clone(),
                    entry: entry_id.clone(),
                });
            }
        } else if let Some(last) = progress.last_visited(&corpus.id)
            && nav.select_entry(&last).is_none()
        {
            tracing::debug!(entry = %last, "last visited entry no longer exists");
        }

        if self.next && nav.next().is_none() {
            output.warning("Already at the last entry");
        }
        if self.previous && nav.previous().is_none() {
            output.warning("Already at the first entry");
        }

        let Some(current) = nav.current_entry() else {
            output.warning(&format!("No entries in {}", corpus.label));
            return Ok(());
        };

        progress.record_visit(&corpus.id, &current.entry.id);
        if self.complete {
            progress.mark_completed(&corpus.id, &current.entry.id);
        }
        let completed = progress.is_completed(&corpus.id, &current.entry.id);

        print_entry(&output, current, &nav.toc(), completed);

        let adjacent = adjacent_entries(&corpus.categories, &current.entry.id);
        output.separator();
        if let Some(previous) = adjacent.previous {
            output.dim_line(&format!("Previous: {} ({})", previous.entry.title, previous.entry.id));
        }
        if let Some(next) = adjacent.next {
            output.dim_line(&format!("Next:     {} ({})", next.entry.title, next.entry.id));
        }
        Ok(())
    }
}

fn print_entry(output: &Output, current: EntryRef<'_>, toc: &[TocItem<'_>], completed: bool) {
    let entry = current.entry;
    output.heading(&entry.title);

    let mut meta = vec![current.category.label.clone()];
    if let Some(difficulty) = entry.difficulty {
        meta.push(difficulty.as_str().to_owned());
    }
    if !entry.tags.is_empty() {
        meta.push(entry.tags.join(", "));
    }
    if completed {
        meta.push("completed".to_owned());
    }
    output.dim_line(&meta.join(" | "));

    if !toc.is_empty() {
        output.line("");
        output.line("Contents:");
        for (i, item) in toc.iter().enumerate() {
            output.line(&format!("  {}. {} (#{})", i + 1, item.heading, item.id));
        }
    }

    for section in &entry.sections {
        print_section(output, section);
    }

    if !entry.quiz.is_empty() {
        output.line("");
        output.dim_line(&format!("Quiz: {} questions", entry.quiz.len()));
    }
    if let Some(challenge) = &entry.challenge {
        output.dim_line(&format!("Challenge: {}", challenge.title));
    }
}

fn print_section(output: &Output, section: &Section) {
    output.line("");
    output.heading(&format!("## {}", section.heading));
    for paragraph in section.paragraphs() {
        output.line(paragraph);
        output.line("");
    }
    if let Some(code) = &section.code {
        for (i, line) in code.trim_end_matches('\n').lines().enumerate() {
            let line = format!("    {line}");
            if section.highlight_lines.contains(&(i + 1)) {
                output.success_line(&line);
            } else {
                output.line(&line);
            }
        }
    }
    if let Some(out) = &section.output {
        output.dim_line("Output:");
        for line in out.trim_end_matches('\n').lines() {
            output.dim_line(&format!("    {line}"));
        }
    }
    if let Some(diagram) = &section.diagram {
        output.dim_line(&format!("[{} diagram]", diagram.kind()));
    }
    for callout in section.callouts() {
        let title = match callout.kind {
            CalloutKind::Tip => "Tip",
            CalloutKind::Warning => "Warning",
            CalloutKind::Note => "Note",
            CalloutKind::Analogy => "Analogy",
        };
        output.line(&format!("{title}: {}", callout.text));
    }
}

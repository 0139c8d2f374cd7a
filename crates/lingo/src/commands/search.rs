//! `lingo search` command implementation.

use clap::Args;
use lingo_search::SearchIndex;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Text to look for in titles, headings and section bodies.
    query: String,

    /// Maximum number of results (overrides config).
    #[arg(short = 'n', long)]
    max_results: Option<usize>,
}

impl SearchArgs {
    pub(crate) fn execute(self, common: &CommonArgs) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = common.load(self.max_results)?;

        let index = SearchIndex::new(&ctx.library).with_max_results(ctx.config.search.max_results);
        let results = index.search(&self.query);

        if results.is_empty() {
            output.warning(&format!("No results for \"{}\"", self.query.trim()));
            return Ok(());
        }

        for result in &results {
            let line = format!(
                "{:<10} {} > {} ({})",
                result.lang_id, result.category_label, result.entry.title, result.entry.id
            );
            output.line(&line);
            if let Some(context) = result.match_context {
                output.dim_line(&format!("           in: {context}"));
            }
        }
        if results.len() == index.max_results() {
            output.info(&format!(
                "Showing the first {} results; refine the query to see more",
                index.max_results()
            ));
        }
        Ok(())
    }
}

//! CLI command implementations.

pub(crate) mod list;
pub(crate) mod progress;
pub(crate) mod render;
pub(crate) mod search;
pub(crate) mod show;

use std::path::PathBuf;

use clap::Args;
use lingo_config::{CliSettings, Config};
use lingo_content::{LanguageCorpus, Library, load_library};
use lingo_nav::{NavigatorOptions, ObserverOptions, RootMargin};
use lingo_progress::{FileProgressStore, NullProgressStore, ProgressStore};

use crate::error::CliError;

pub(crate) use list::ListArgs;
pub(crate) use progress::ProgressArgs;
pub(crate) use render::RenderArgs;
pub(crate) use search::SearchArgs;
pub(crate) use show::ShowArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover lingo.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Content directory (overrides config).
    #[arg(long, global = true, env = "LINGO_CONTENT_DIR")]
    content_dir: Option<PathBuf>,

    /// Disable progress tracking.
    #[arg(long, global = true)]
    no_progress: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Loaded configuration and content.
pub(crate) struct Context {
    pub config: Config,
    pub library: Library,
}

impl CommonArgs {
    /// Load configuration and the content library.
    pub(crate) fn load(&self, max_results: Option<usize>) -> Result<Context, CliError> {
        let cli_settings = CliSettings {
            content_dir: self.content_dir.clone(),
            max_results,
            progress_enabled: self.no_progress.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let content = &config.content_resolved;
        tracing::info!(dir = %content.dir.display(), "loading content");
        let library = load_library(&content.dir, &content.languages)?;

        Ok(Context { config, library })
    }
}

impl Context {
    /// Look up a language, failing with a CLI error.
    pub(crate) fn language(&self, lang_id: &str) -> Result<&LanguageCorpus, CliError> {
        self.library
            .language(lang_id)
            .ok_or_else(|| CliError::UnknownLanguage(lang_id.to_owned()))
    }

    /// Progress store for this configuration.
    pub(crate) fn progress_store(&self) -> Box<dyn ProgressStore> {
        if self.config.progress.enabled {
            Box::new(FileProgressStore::new(
                self.config.content_resolved.progress_path(),
            ))
        } else {
            Box::new(NullProgressStore)
        }
    }

    /// Navigator tunables from the `[scroll]` section.
    pub(crate) fn navigator_options(&self) -> NavigatorOptions {
        let scroll = &self.config.scroll;
        NavigatorOptions {
            scroll_delay: scroll.scroll_delay(),
            observer: ObserverOptions {
                root_margin: RootMargin {
                    top: scroll.top_margin,
                    bottom: scroll.bottom_margin,
                },
            },
        }
    }
}

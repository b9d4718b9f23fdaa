//! Command-line arguments
//!
//! Flags override values from configuration files and `WORDSIEVE_*`
//! environment variables.

use std::path::PathBuf;

use clap::Parser;
use wordsieve::config::{ConfigBuilder, ConfigLoader, LogLevel, SieveConfig};

#[derive(Debug, Parser)]
#[command(name = "wordsieve")]
#[command(about = "Keep the nouns, verbs and adjectives of a word list", long_about = None)]
#[command(version = wordsieve::VERSION)]
pub struct Cli {
    /// Configuration file (toml, yaml or json)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Word list, one word per line
    #[arg(long, short, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Destination of the filtered words
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Hub identifier of the tagging model
    #[arg(long, short, value_name = "ID")]
    pub model: Option<String>,

    /// Model revision (branch, tag or commit)
    #[arg(long, value_name = "REV")]
    pub revision: Option<String>,

    /// Directory for downloaded model files
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Verbose output (debug level logging)
    #[arg(long, short, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode (errors only, no progress bar)
    #[arg(long, short)]
    pub quiet: bool,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    /// Whether a progress bar should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.no_progress
    }

    /// Load the layered configuration and apply command-line overrides.
    ///
    /// An explicit `--config` file replaces the default file search.
    pub fn load_config(&self) -> wordsieve::Result<SieveConfig> {
        let mut loader = ConfigLoader::new();
        match &self.config {
            Some(path) => {
                loader.load_file(path)?;
            }
            None => {
                loader.load_default_files();
            }
        }
        loader.load_env();

        self.apply(loader.extract()?)
    }

    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, config: SieveConfig) -> wordsieve::Result<SieveConfig> {
        let mut builder = ConfigBuilder::from_config(config);

        if let Some(input) = &self.input {
            builder = builder.with_input(input);
        }
        if let Some(output) = &self.output {
            builder = builder.with_output(output);
        }
        if let Some(model) = &self.model {
            builder = builder.with_model(model);
        }
        if let Some(revision) = &self.revision {
            builder = builder.with_revision(revision);
        }
        if let Some(cache_dir) = &self.cache_dir {
            builder = builder.with_model_cache_dir(cache_dir);
        }
        if self.quiet {
            builder = builder.with_log_level(LogLevel::Error);
        } else if self.verbose {
            builder = builder.with_log_level(LogLevel::Debug);
        }

        Ok(builder.build()?)
    }
}

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use wordsieve::prelude::*;
use wordsieve_cli::{
    Cli, format_rejections, format_warning, output_error, print_summary, word_progress,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> wordsieve::Result<()> {
    let config = cli.load_config()?;

    // Held until exit so buffered file logs are flushed
    let _log_guard = wordsieve::logging::init(&config.logging)?;
    debug!(?config, "Configuration loaded");

    let tagger = TokenClassificationPipeline::from_pretrained(&config.model).await?;
    info!(model = tagger.name(), "Model ready");

    let progress = word_progress(cli.show_progress());
    let outcome = sieve_file(&config, &tagger, |done, total| {
        progress.set_length(total as u64);
        progress.set_position(done as u64);
    })
    .await;
    progress.finish_and_clear();
    let outcome = outcome?;

    if cli.verbose {
        eprintln!("{}", format_rejections(&outcome));
    }
    if outcome.kept() == 0 && outcome.total > 0 && !cli.quiet {
        eprintln!("{}", format_warning("No word passed the part-of-speech filter"));
    }

    print_summary(&outcome);
    Ok(())
}

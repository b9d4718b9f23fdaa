use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use is_terminal::IsTerminal;
use wordsieve::filter::FilterOutcome;

pub struct CliColors;

impl CliColors {
    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

/// Print an error to stderr.
pub fn output_error(error: &wordsieve::SieveError) {
    eprintln!("{}", format_error(&error.to_string()));
}

/// Print the one-line run summary to stdout.
pub fn print_summary(outcome: &FilterOutcome) {
    println!("{}", outcome.summary());
}

/// Breakdown of dropped words for verbose runs, on stderr.
pub fn format_rejections(outcome: &FilterOutcome) -> String {
    format!(
        "{} {} ({} without a span, {} split into several spans, {} with another tag)",
        "dropped:".color(CliColors::muted()),
        outcome.rejected(),
        outcome.no_span,
        outcome.multi_span,
        outcome.disallowed_tag
    )
}

/// Progress bar over the word list, drawn on stderr. Its length is set once
/// the list has been read.
///
/// Returns a hidden bar when disabled or when stderr is not a terminal.
pub fn word_progress(enabled: bool) -> ProgressBar {
    if !enabled || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message("tagging");
    pb
}

pub mod args;
pub mod output;

pub use args::Cli;
pub use output::{
    CliColors, format_error, format_rejections, format_warning, output_error, print_summary,
    word_progress,
};

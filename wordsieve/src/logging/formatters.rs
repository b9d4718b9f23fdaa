//! Custom formatters for the logging system.

use std::fmt;
use time::{OffsetDateTime, macros::format_description};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, format};
use tracing_subscriber::registry::LookupSpan;

/// Custom formatter for development that emphasizes readability.
///
/// Produces `HH:MM:SS.mmm LEVEL [target] span: fields` lines with a local
/// timestamp.
#[derive(Debug, Clone, Copy)]
pub struct DevelopmentFormatter {
    ansi: bool,
}

impl DevelopmentFormatter {
    /// Create a formatter; `ansi` enables coloured level names.
    pub fn new(ansi: bool) -> Self {
        Self { ansi }
    }

    fn level_str(&self, level: tracing::Level) -> String {
        let name = format!("{:<5}", level.as_str());
        if !self.ansi {
            return name;
        }

        let color = match level {
            tracing::Level::TRACE => "36",
            tracing::Level::DEBUG => "34",
            tracing::Level::INFO => "32",
            tracing::Level::WARN => "33",
            _ => "31",
        };
        format!("\x1b[{}m{}\x1b[0m", color, name)
    }
}

impl<S, N> FormatEvent<S, N> for DevelopmentFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> fmt::Result {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let time = now
            .format(format_description!("[hour]:[minute]:[second].[subsecond digits:3]"))
            .unwrap_or_default();

        let metadata = event.metadata();
        write!(
            writer,
            "{} {} [{}] ",
            time,
            self.level_str(*metadata.level()),
            metadata.target()
        )?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}: ", span.name())?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

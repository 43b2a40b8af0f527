//! Configuration for rendering a combat.

use luchadores_engine::{CombatResult, EventLog};

use crate::filter::EventFilter;
use crate::format::{EventFormatter, HumanFormatter, JsonFormatter};
use crate::stats::CombatStats;

/// Output format for events and results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Console text.
    #[default]
    Human,
    /// One JSON object per line.
    Json,
}

/// Controls how a combat is rendered.
#[derive(Clone, Debug, Default)]
pub struct FormatConfig {
    /// Text or JSON.
    pub format: OutputFormat,
    /// Which events to show.
    pub filter: EventFilter,
    /// Show only the final result.
    pub quiet: bool,
    /// Append per-fighter statistics (human format only).
    pub show_stats: bool,
    /// Prefix records with their IDs (human format only).
    pub show_ids: bool,
}

impl FormatConfig {
    /// Creates a default configuration: human text, every event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the output format.
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder method to set the event filter.
    #[must_use]
    pub fn with_filter(mut self, filter: EventFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Builder method to show only the result.
    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Builder method to append statistics.
    #[must_use]
    pub fn with_stats(mut self, show_stats: bool) -> Self {
        self.show_stats = show_stats;
        self
    }

    /// Builder method to show record IDs.
    #[must_use]
    pub fn with_ids(mut self, show_ids: bool) -> Self {
        self.show_ids = show_ids;
        self
    }

    /// Returns the formatter this configuration selects.
    #[must_use]
    pub fn formatter(&self) -> Box<dyn EventFormatter> {
        match self.format {
            OutputFormat::Human if self.show_ids => Box::new(HumanFormatter::new().with_ids()),
            OutputFormat::Human => Box::new(HumanFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Renders the log and result as lines of output.
    #[must_use]
    pub fn render(&self, log: &EventLog, result: &CombatResult) -> Vec<String> {
        let formatter = self.formatter();
        let mut lines = Vec::new();

        if !self.quiet {
            lines.extend(self.filter.apply(log).into_iter().map(|r| formatter.format(r)));
        }
        lines.push(formatter.format_result(result));

        if self.show_stats && self.format == OutputFormat::Human {
            lines.push(CombatStats::from_log(log).to_string());
        }
        lines
    }
}

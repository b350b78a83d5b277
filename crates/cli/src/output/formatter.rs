//! Output formatter for human-readable and JSON output
//!
//! In human mode each report becomes a few styled lines; in JSON mode each
//! report is printed as one JSON object per line so a scripted session can
//! be parsed line by line.

use bkt_core::{Report, Reporter};
use console::style;

use super::{OutputConfig, Spinner};

/// One line of human-readable output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Out(String),
    Success(String),
    Warning(String),
    Error(String),
}

impl Line {
    /// Text without colors
    pub fn plain(&self) -> String {
        match self {
            Line::Out(text) => text.clone(),
            Line::Success(text) => format!("✓ {text}"),
            Line::Warning(text) => format!("⚠ {text}"),
            Line::Error(text) => format!("✗ {text}"),
        }
    }
}

/// Lay out a report for a human reader
pub fn human_lines(report: &Report) -> Vec<Line> {
    match report {
        Report::Listing { keys, truncated } => {
            let mut lines: Vec<Line> = keys.iter().cloned().map(Line::Out).collect();
            if *truncated {
                lines.push(truncation_warning());
            }
            lines
        }
        Report::NoFiles => vec![Line::Out("No files found.".into())],
        Report::Matches {
            pattern,
            keys,
            truncated,
        } => {
            let mut lines: Vec<Line> = keys.iter().cloned().map(Line::Out).collect();
            lines.push(Line::Success(format!(
                "{} file(s) match '{pattern}'",
                keys.len()
            )));
            if *truncated {
                lines.push(truncation_warning());
            }
            lines
        }
        Report::NoMatches { pattern } => vec![Line::Warning(format!(
            "No matches for '{pattern}'. Nothing deleted."
        ))],
        Report::Uploaded {
            key,
            location,
            size_bytes,
        } => vec![Line::Success(format!(
            "File uploaded successfully: {key} ({}) -> {location}",
            humansize::format_size(*size_bytes, humansize::BINARY)
        ))],
        Report::Deleted { key } => vec![Line::Out(format!("Deleted {key}"))],
        Report::DeleteAborted {
            key,
            error,
            remaining,
        } => {
            let mut lines = vec![Line::Error(format!("Failed to delete {key}: {error}"))];
            if !remaining.is_empty() {
                lines.push(Line::Warning(format!(
                    "Stopped. {} matching object(s) were not attempted:",
                    remaining.len()
                )));
                lines.extend(remaining.iter().map(|k| Line::Out(format!("  {k}"))));
            }
            lines
        }
        Report::DeleteSummary { deleted } => {
            vec![Line::Success(format!("Removed {deleted} object(s)."))]
        }
        Report::Failed { action, error, .. } => {
            vec![Line::Error(format!("{} failed: {error}", action.label()))]
        }
    }
}

fn truncation_warning() -> Line {
    Line::Warning("Listing truncated. Only the first page of keys was examined.".into())
}

/// Formatter for CLI output
///
/// Also acts as the session's [`Reporter`], owning the spinner so it is
/// cleared before anything else is printed.
#[derive(Debug)]
pub struct Formatter {
    config: OutputConfig,
    spinner: Option<Spinner>,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self {
            config,
            spinner: None,
        }
    }

    /// Check if JSON output mode is enabled
    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Check if colors are enabled
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    /// Push the color settings into `console`'s global switches
    pub fn apply_color_settings(&self) {
        if !self.colors_enabled() {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        } else if self.config.force_color {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        }
    }

    /// Output an error message
    ///
    /// Used for failures outside the session, such as bad configuration.
    pub fn error(&self, message: &str) {
        if self.config.json {
            let error = serde_json::json!({ "error": message });
            eprintln!("{error}");
        } else {
            self.emit(&Line::Error(message.to_string()));
        }
    }

    fn emit(&self, line: &Line) {
        match line {
            Line::Out(text) => println!("{text}"),
            Line::Success(text) => println!("{} {text}", style("✓").green()),
            Line::Warning(text) => eprintln!("{} {text}", style("⚠").yellow().for_stderr()),
            Line::Error(text) => eprintln!("{} {text}", style("✗").red().for_stderr()),
        }
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Reporter for Formatter {
    fn busy(&mut self, activity: &str) {
        match &self.spinner {
            Some(spinner) => spinner.set_message(activity),
            None => self.spinner = Some(Spinner::start(&self.config, activity)),
        }
    }

    fn report(&mut self, report: Report) {
        self.clear_spinner();

        if self.config.json {
            let is_error = matches!(
                report,
                Report::Failed { .. } | Report::DeleteAborted { .. }
            );
            match serde_json::to_string(&report) {
                Ok(json) if is_error => eprintln!("{json}"),
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Error serializing output: {e}"),
            }
            return;
        }

        for line in human_lines(&report) {
            self.emit(&line);
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use bkt_core::{ErrorKind, MenuChoice};

    use super::*;

    fn render(report: &Report) -> String {
        human_lines(report)
            .iter()
            .map(Line::plain)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_formatter_default() {
        let formatter = Formatter::default();
        assert!(!formatter.is_json());
        assert!(formatter.colors_enabled());
    }

    #[test]
    fn test_formatter_json_mode() {
        let config = OutputConfig {
            json: true,
            ..Default::default()
        };
        let formatter = Formatter::new(config);
        assert!(formatter.is_json());
        assert!(!formatter.colors_enabled());
    }

    #[test]
    fn test_formatter_no_color() {
        let config = OutputConfig {
            no_color: true,
            ..Default::default()
        };
        let formatter = Formatter::new(config);
        assert!(!formatter.colors_enabled());
    }

    #[test]
    fn test_render_listing() {
        let report = Report::Listing {
            keys: vec!["a/1.txt".into(), "b/1.txt".into()],
            truncated: false,
        };
        insta::assert_snapshot!(render(&report), @r"
        a/1.txt
        b/1.txt
        ");
    }

    #[test]
    fn test_render_truncated_listing_warns() {
        let report = Report::Listing {
            keys: vec!["a".into()],
            truncated: true,
        };
        let lines = human_lines(&report);
        assert_eq!(lines.len(), 2);
        assert!(matches!(&lines[1], Line::Warning(text) if text.contains("truncated")));
    }

    #[test]
    fn test_render_no_files() {
        insta::assert_snapshot!(render(&Report::NoFiles), @"No files found.");
    }

    #[test]
    fn test_render_empty_matches() {
        let report = Report::Matches {
            pattern: "zzz".into(),
            keys: vec![],
            truncated: false,
        };
        insta::assert_snapshot!(render(&report), @"✓ 0 file(s) match 'zzz'");
    }

    #[test]
    fn test_render_uploaded() {
        let report = Report::Uploaded {
            key: "docs/a.txt".into(),
            location: "http://localhost:9000/photos/docs/a.txt".into(),
            size_bytes: 12,
        };
        insta::assert_snapshot!(
            render(&report),
            @"✓ File uploaded successfully: docs/a.txt (12 B) -> http://localhost:9000/photos/docs/a.txt"
        );
    }

    #[test]
    fn test_render_delete_aborted() {
        let report = Report::DeleteAborted {
            key: "log/2".into(),
            error: "Network error: timeout".into(),
            remaining: vec!["log/3".into(), "log/4".into()],
        };
        let lines = human_lines(&report);
        assert_eq!(
            lines,
            vec![
                Line::Error("Failed to delete log/2: Network error: timeout".into()),
                Line::Warning("Stopped. 2 matching object(s) were not attempted:".into()),
                Line::Out("  log/3".into()),
                Line::Out("  log/4".into()),
            ]
        );
    }

    #[test]
    fn test_render_failed() {
        let report = Report::Failed {
            action: MenuChoice::FilterList,
            kind: ErrorKind::Pattern,
            error: "Malformed pattern '(': unclosed group".into(),
        };
        insta::assert_snapshot!(
            render(&report),
            @"✗ List files by regex failed: Malformed pattern '(': unclosed group"
        );
    }

    #[test]
    fn test_report_json_lines() {
        let json = serde_json::to_string(&Report::Deleted { key: "a".into() }).unwrap();
        assert_eq!(json, r#"{"event":"deleted","key":"a"}"#);

        let json = serde_json::to_string(&Report::NoFiles).unwrap();
        assert_eq!(json, r#"{"event":"no_files"}"#);

        let json = serde_json::to_string(&Report::Failed {
            action: MenuChoice::Upload,
            kind: ErrorKind::LocalIo,
            error: "Failed to read x".into(),
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"event":"failed","action":"upload","kind":"local_io","error":"Failed to read x"}"#
        );
    }

    #[test]
    fn test_busy_then_report_clears_spinner() {
        let config = OutputConfig {
            no_progress: true,
            ..Default::default()
        };
        let mut formatter = Formatter::new(config);
        formatter.busy("Listing objects");
        assert!(formatter.spinner.is_some());
        formatter.report(Report::NoFiles);
        assert!(formatter.spinner.is_none());
    }
}

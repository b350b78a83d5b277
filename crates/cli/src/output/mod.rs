//! Output formatting utilities
//!
//! Renders session reports in human-readable or JSON form and shows a
//! spinner while store calls are in flight.

mod formatter;
mod progress;

use bkt_core::config::Defaults;

pub use formatter::Formatter;
pub use progress::Spinner;

/// Output configuration derived from CLI flags and config file defaults
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Force colored output even when not writing to a terminal
    pub force_color: bool,
    /// Disable the spinner
    pub no_progress: bool,
}

impl OutputConfig {
    /// Combine command-line flags with the config file defaults
    ///
    /// A flag can only switch a behavior on; it never re-enables something
    /// the file turned off.
    pub fn resolve(json: bool, no_color: bool, no_progress: bool, defaults: &Defaults) -> Self {
        Self {
            json: json || defaults.output == "json",
            no_color: no_color || defaults.color == "never",
            force_color: !no_color && defaults.color == "always",
            no_progress: no_progress || !defaults.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = OutputConfig::resolve(false, false, false, &Defaults::default());
        assert!(!config.json);
        assert!(!config.no_color);
        assert!(!config.force_color);
        assert!(!config.no_progress);
    }

    #[test]
    fn test_resolve_file_settings() {
        let defaults = Defaults {
            output: "json".into(),
            color: "never".into(),
            progress: false,
        };
        let config = OutputConfig::resolve(false, false, false, &defaults);
        assert!(config.json);
        assert!(config.no_color);
        assert!(config.no_progress);
    }

    #[test]
    fn test_no_color_flag_beats_always() {
        let defaults = Defaults {
            color: "always".into(),
            ..Default::default()
        };
        assert!(OutputConfig::resolve(false, false, false, &defaults).force_color);

        let config = OutputConfig::resolve(false, true, false, &defaults);
        assert!(config.no_color);
        assert!(!config.force_color);
    }
}

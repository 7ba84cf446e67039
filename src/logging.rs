// cluster-ops/src/logging.rs
use log::{error, LevelFilter};
use log4rs::config::RawConfig;

use crate::error::LoggingError;

// stdout belongs to the tools' own output, so everything logged goes to stderr.
const LOG_CONFIG_TEMPLATE: &str = r#"
appenders:
  stderr:
    kind: console
    target: stderr
    encoder:
      pattern: "{m}{n}"
root:
  level: __LEVEL__
  appenders:
    - stderr
"#;

pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn render_config(level: LevelFilter) -> String {
    LOG_CONFIG_TEMPLATE.replace("__LEVEL__", &level.to_string().to_lowercase())
}

/// Installs the log4rs backend for the `log` facade.
pub fn init_logging(verbosity: u8) -> Result<(), LoggingError> {
    let raw: RawConfig = serde_yaml::from_str(&render_config(level_for_verbosity(verbosity)))?;
    log4rs::init_raw_config(raw)?;
    Ok(())
}

fn logger_accepts_errors(max_level: LevelFilter) -> bool {
    max_level >= LevelFilter::Error
}

/// Reports a fatal failure on stderr: through the logger when one is
/// installed, straight to stderr otherwise.
pub fn report_failure(message: &str) {
    if logger_accepts_errors(log::max_level()) {
        error!("{}", message);
    } else {
        eprintln!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, LevelFilter::Warn)]
    #[case(1, LevelFilter::Info)]
    #[case(2, LevelFilter::Debug)]
    #[case(7, LevelFilter::Debug)]
    fn verbosity_maps_to_level(#[case] verbosity: u8, #[case] expected: LevelFilter) {
        assert_eq!(level_for_verbosity(verbosity), expected);
    }

    #[rstest]
    #[case(LevelFilter::Off, false)]
    #[case(LevelFilter::Error, true)]
    #[case(LevelFilter::Warn, true)]
    #[case(LevelFilter::Debug, true)]
    fn failures_bypass_a_silent_logger(#[case] max_level: LevelFilter, #[case] via_log: bool) {
        assert_eq!(logger_accepts_errors(max_level), via_log);
    }

    #[test]
    fn no_logger_means_direct_stderr() {
        // Nothing in this test binary installs a logger.
        assert!(!logger_accepts_errors(log::max_level()));
    }

    #[test]
    fn embedded_config_parses() {
        let rendered = render_config(LevelFilter::Info);
        assert!(rendered.contains("level: info"));
        let raw: Result<RawConfig, _> = serde_yaml::from_str(&rendered);
        assert!(raw.is_ok(), "{:?}", raw.err());
    }
}

use log::LevelFilter;

use crate::error::{ReliabilityError, Result};

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Parses a `LOG_LEVEL` value. Unset or blank means `info`.
///
/// Besides the `log` level names, `warning`, `fatal` and `panic` are accepted
/// and map to `warn`, `error` and `error`.
pub fn parse_level(value: Option<&str>) -> Result<LevelFilter> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(LevelFilter::Info);
    };

    match raw.to_ascii_lowercase().as_str() {
        "warning" => Ok(LevelFilter::Warn),
        "fatal" | "panic" => Ok(LevelFilter::Error),
        other => other
            .parse()
            .map_err(|_| ReliabilityError::InvalidLogLevel(raw.to_string())),
    }
}

/// Initializes `env_logger` at the level given by `LOG_LEVEL`.
pub fn init() -> Result<()> {
    let value = std::env::var(LOG_LEVEL_VAR).ok();
    let level = parse_level(value.as_deref())?;

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .init();

    Ok(())
}

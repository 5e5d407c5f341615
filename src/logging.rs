//! Logger installation for the `commonkit` binary.
//!
//! Log output goes to stderr so replay results on stdout stay parseable.
//! Level precedence: `--log-level`, then `RUST_LOG`, then the config's
//! `log_level`.

use commonkit_config::LogLevel;

/// Build a logger from the three level sources, lowest precedence first.
fn build_logger(
    cli_level: Option<log::LevelFilter>,
    env_filters: Option<&str>,
    config_level: LogLevel,
) -> env_logger::Logger {
    let mut builder = env_logger::Builder::new();
    builder
        .target(env_logger::Target::Stderr)
        .filter_level(config_level.to_level_filter());

    if let Some(filters) = env_filters {
        builder.parse_filters(filters);
    }
    if let Some(level) = cli_level {
        builder.filter_level(level);
    }
    builder.build()
}

/// Install the global logger. Later calls are ignored.
pub fn init_logging(cli_level: Option<log::LevelFilter>, config_level: LogLevel) {
    let env_filters = std::env::var("RUST_LOG").ok();
    let logger = build_logger(cli_level, env_filters.as_deref(), config_level);
    let max_level = logger.filter();

    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(max_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_level_is_the_fallback() {
        let logger = build_logger(None, None, LogLevel::Info);
        assert_eq!(logger.filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_rust_log_overrides_config() {
        let logger = build_logger(None, Some("trace"), LogLevel::Error);
        assert_eq!(logger.filter(), log::LevelFilter::Trace);
    }

    #[test]
    fn test_cli_level_overrides_everything() {
        let logger = build_logger(Some(log::LevelFilter::Warn), Some("trace"), LogLevel::Debug);
        assert_eq!(logger.filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(Some(log::LevelFilter::Off), LogLevel::Warn);
        init_logging(None, LogLevel::Debug);
    }
}

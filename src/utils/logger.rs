use crate::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

/// Filter directive for the crate's own events. `--verbose` wins over the
/// configured level; `RUST_LOG` wins over both.
pub fn filter_directive(config: &LoggingConfig, verbose: bool) -> String {
    if verbose {
        return "ergani=debug,info".to_string();
    }
    let level = config.level.as_deref().unwrap_or(DEFAULT_LEVEL);
    format!("ergani={}", level)
}

/// Installs the global subscriber: compact lines for a terminal, JSON lines
/// when `logging.json` is set.
pub fn init_logger(config: &LoggingConfig, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config, verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.compact()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        let default = LoggingConfig::default();
        assert_eq!(filter_directive(&default, false), "ergani=info");
        assert_eq!(filter_directive(&default, true), "ergani=debug,info");

        let quiet = LoggingConfig {
            json: true,
            level: Some("warn".to_string()),
        };
        assert_eq!(filter_directive(&quiet, false), "ergani=warn");
        assert_eq!(filter_directive(&quiet, true), "ergani=debug,info");
    }
}

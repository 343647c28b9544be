//! Tracing setup
//!
//! Output format and level come from the `logging` config section; a
//! `RUST_LOG` environment filter, when present, wins over the configured
//! level.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};

pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| build_filter(&config.level));

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .init();
        }
    }

    tracing::info!(level = %config.level, "logging initialized");
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::new(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_from_configured_level() {
        let filter = build_filter("user_account_service=debug,info");
        assert!(filter.to_string().contains("user_account_service=debug"));
    }

    #[test]
    fn test_build_filter_accepts_plain_level() {
        let filter = build_filter("warn");
        assert_eq!(filter.to_string(), "warn");
    }
}

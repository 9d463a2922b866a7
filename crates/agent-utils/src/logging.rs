//! Logging and tracing utilities
//!
//! Log records always go to stderr, in either format, so stdout stays free
//! for command output.

use crate::config::{Config, LogFormat};
use tracing::Dispatch;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with a fallback filter and output format
///
/// A valid `RUST_LOG` wins over `default_filter`. An invalid one is ignored
/// with a warning instead of being applied partially.
pub fn init_tracing_with(default_filter: &str, format: LogFormat) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, rejected) = resolve_filter(rust_log.as_deref(), default_filter);

    build_dispatch(filter, format, std::io::stderr).init();

    if let Some(err) = rejected {
        tracing::warn!("Ignoring invalid {}: {}", EnvFilter::DEFAULT_ENV, err);
    }
}

/// Initialize tracing from an application [`Config`]
pub fn init_from_config(config: &Config) {
    init_tracing_with(&config.log_filter, config.log_format);
}

/// Pick the filter from `RUST_LOG` if it parses, else from the fallback
fn resolve_filter(
    rust_log: Option<&str>,
    default_filter: &str,
) -> (EnvFilter, Option<ParseError>) {
    match rust_log.filter(|v| !v.trim().is_empty()).map(EnvFilter::try_new) {
        Some(Ok(filter)) => (filter, None),
        Some(Err(err)) => (EnvFilter::new(default_filter), Some(err)),
        None => (EnvFilter::new(default_filter), None),
    }
}

fn build_dispatch<W>(filter: EnvFilter, format: LogFormat, writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => Dispatch::new(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(writer),
            ),
        ),
        LogFormat::Pretty => {
            Dispatch::new(registry.with(tracing_subscriber::fmt::layer().with_writer(writer)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_json_records_use_the_given_writer() {
        let capture = Capture::default();
        let dispatch = build_dispatch(EnvFilter::new("info"), LogFormat::Json, capture.clone());

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!(stage = "news_analysis", "Stage started");
        });

        let output = capture.contents();
        let record: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(record["level"], "INFO");
        assert_eq!(record["fields"]["message"], "Stage started");
        assert_eq!(record["fields"]["stage"], "news_analysis");
    }

    #[test]
    fn test_pretty_records_use_the_given_writer() {
        let capture = Capture::default();
        let dispatch = build_dispatch(EnvFilter::new("info"), LogFormat::Pretty, capture.clone());

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!("Run completed");
            tracing::debug!("filtered out");
        });

        let output = capture.contents();
        assert!(output.contains("Run completed"));
        assert!(!output.contains("filtered out"));
    }

    #[test]
    fn test_valid_rust_log_wins() {
        let (filter, rejected) = resolve_filter(Some("debug"), "warn");
        assert!(rejected.is_none());
        assert_eq!(filter.to_string().to_lowercase(), "debug");
    }

    #[test]
    fn test_invalid_rust_log_falls_back_whole() {
        let (filter, rejected) = resolve_filter(Some("agent_portfolio=loud"), "warn");
        assert!(rejected.is_some());
        assert_eq!(filter.to_string().to_lowercase(), "warn");
    }

    #[test]
    fn test_missing_rust_log_uses_fallback() {
        let (filter, rejected) = resolve_filter(None, "warn,agent_portfolio=info");
        assert!(rejected.is_none());
        assert!(filter.to_string().contains("agent_portfolio=info"));

        let (_, rejected) = resolve_filter(Some("  "), "warn");
        assert!(rejected.is_none());
    }
}

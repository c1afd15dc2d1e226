use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a file to log into instead of stderr.
pub const LOG_FILE_ENV: &str = "SIMPLE_INTEREST_LOG";

pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "simple_interest=debug,info"
    } else {
        "simple_interest=info,warn"
    }
}

/// Initialize tracing.
///
/// `RUST_LOG` overrides the default filter. When `SIMPLE_INTEREST_LOG` is set,
/// output goes to `{path}.{pid}` so concurrent instances don't clobber each
/// other; otherwise it goes to stderr.
pub fn init_tracing(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    if let Ok(log_path) = std::env::var(LOG_FILE_ENV) {
        let unique_path = format!("{}.{}", log_path, std::process::id());
        match std::fs::File::create(&unique_path) {
            Ok(file) => {
                let file_layer = fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_level(true)
                    .with_timer(UtcTime::rfc_3339());
                tracing_subscriber::registry()
                    .with(filter)
                    .with(file_layer)
                    .init();
                return;
            }
            Err(e) => eprintln!("Warning: Failed to create log file {}: {}", unique_path, e),
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_timer(UtcTime::rfc_3339()),
        )
        .init();
}

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Holds the appender guards; dropping it flushes and stops the file writers.
pub struct Logger {
    pub guards: Vec<WorkerGuard>,
}

impl Logger {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let guards = Self::setup_logging()?;
        Ok(Logger { guards })
    }

    /// Console plus daily rolling files under `LOG_DIR` (default `logs`).
    ///
    /// - `RUST_LOG` filters the console, `LOG_FORMAT=json` switches it to JSON
    /// - `FILE_LOG_LEVEL` filters `harbonline-backend.log` and its JSON twin
    /// - `ERROR_FILE_LOG_LEVEL` filters the `error/` files
    pub fn setup_logging() -> Result<Vec<WorkerGuard>, Box<dyn std::error::Error>> {
        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
        let error_dir = format!("{}/error", log_dir);
        std::fs::create_dir_all(&error_dir)?;

        let console_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,harbonline_backend=debug"));
        let console_json = std::env::var("LOG_FORMAT").map(|f| f.eq_ignore_ascii_case("json")).unwrap_or(false);
        let file_log_level = std::env::var("FILE_LOG_LEVEL").unwrap_or_else(|_| "debug".to_string());
        let error_file_log_level = std::env::var("ERROR_FILE_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        let (general, general_guard) = non_blocking(rolling::daily(&log_dir, "harbonline-backend.log"));
        let (general_json, general_json_guard) = non_blocking(rolling::daily(&log_dir, "harbonline-backend.json"));
        let (errors, errors_guard) = non_blocking(rolling::daily(&error_dir, "harbonline-backend-error.log"));
        let (errors_json, errors_json_guard) = non_blocking(rolling::daily(&error_dir, "harbonline-backend-error.json"));

        let console = if console_json {
            fmt::layer().json().with_target(true).with_filter(console_filter).boxed()
        } else {
            fmt::layer().pretty().with_target(true).with_thread_ids(true).with_filter(console_filter).boxed()
        };

        tracing_subscriber::registry()
            .with(console)
            .with(
                fmt::layer()
                    .with_writer(general)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(general_json)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .with(
                fmt::layer()
                    .with_writer(errors)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&error_file_log_level)),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(errors_json)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&error_file_log_level)),
            )
            .try_init()?;

        Ok(vec![general_guard, general_json_guard, errors_guard, errors_json_guard])
    }
}

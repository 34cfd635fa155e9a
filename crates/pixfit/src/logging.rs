//! Logging initialization for the CLI.
//!
//! Log output goes to stderr; stdout is left for data such as `config show`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem.
///
/// `level` is the default filter directive (for example `"info"` or
/// `"pixfit_core=debug"`). The RUST_LOG environment variable overrides it.
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(console::colors_enabled_stderr()),
            )
            .init();
    }
}

/// Initialize logging from the `[logging]` section, with CLI flags taking precedence.
pub fn init_from_config(config: &pixfit_core::Config, verbose: bool, json_logs: bool) {
    let (level, json_format) = resolve(config, verbose, json_logs);
    init(level, json_format);
}

fn resolve(config: &pixfit_core::Config, verbose: bool, json_logs: bool) -> (&str, bool) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    (level, json_logs || config.logging.format == "json")
}

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber with timestamp, level, and structured fields.
///
/// Everything logs at INFO. If `debug` is true this crate logs at DEBUG, so
/// failed conversions are reported without turning on debug output for the
/// embedding application.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init(debug: bool) -> bool {
    fmt()
        .with_env_filter(filter(debug))
        .with_timer(fmt::time::SystemTime)
        .with_level(true)
        .with_target(true)
        .try_init()
        .is_ok()
}

fn directive(debug: bool) -> &'static str {
    if debug {
        "info,modelconv_lib=debug"
    } else {
        "info"
    }
}

fn filter(debug: bool) -> EnvFilter {
    EnvFilter::new(directive(debug))
}

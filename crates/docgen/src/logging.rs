use std::backtrace::Backtrace;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber. `RUST_LOG` wins over `verbose`.
pub fn init(verbose: bool, ansi: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(ansi)
        .with_target(verbose)
        .with_writer(std::io::stderr);

    // Ignored if a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info.payload();
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            *s
        } else if let Some(s) = payload.downcast_ref::<String>() {
            &s[..]
        } else {
            "Unknown panic message"
        };

        let location = match panic_info.location() {
            Some(location) => format!(" at {}:{}", location.file(), location.line()),
            None => String::from(" at unknown location"),
        };

        let backtrace = Backtrace::capture();
        tracing::error!("Panic occurred{location}: {message}\nBacktrace:\n{backtrace}");
    }));
}

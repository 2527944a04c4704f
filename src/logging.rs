use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Logs go to stderr so stdout only carries the report.
pub fn init_cli_logger(verbose: bool) {
    let default_filter = if verbose {
        "splitwiser=debug"
    } else {
        "splitwiser=warn"
    };
    init_with_default(default_filter);
}

pub fn init_server_logger() {
    init_with_default("splitwiser=info");
}

fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    let directive = match (verbose, level) {
        (true, _) => "company_admin=debug,info".to_string(),
        (false, Some(level)) => format!("company_admin={}", level),
        (false, None) => "company_admin=info".to_string(),
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// JSON lines on stderr, for log shippers.
pub fn init_json_logger(level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(false, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .json(),
        )
        .init();
}

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins when set; otherwise each `-v` raises the level one step
/// from `info`.
pub fn filter_for(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

pub fn init(verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

use tracing_subscriber::EnvFilter;

/// Initialize tracing based on CLI verbosity level.
///
/// 0 -> warn, 1 (-v) -> info, 2 (-vv) -> debug, 3+ -> trace.
/// `RUST_LOG` overrides the flag when set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_filter(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    format!("ghcnd={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_verbosity_to_level() {
        assert_eq!(default_filter(0), "ghcnd=warn");
        assert_eq!(default_filter(1), "ghcnd=info");
        assert_eq!(default_filter(2), "ghcnd=debug");
        assert_eq!(default_filter(7), "ghcnd=trace");
    }
}

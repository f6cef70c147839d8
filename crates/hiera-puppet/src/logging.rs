use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directives used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVES: &str = "warn,hiera_core=info,hiera_puppet=info";

/// Initialize a tracing subscriber for a host embedding the bridge.
///
/// `RUST_LOG` selects levels, falling back to [`DEFAULT_DIRECTIVES`]. Set
/// it to `hiera_core=debug` to follow hierarchy walks; engine events carry
/// the `logger` field set to `puppet`. Fails if a global subscriber is
/// already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).compact())
        .try_init()?;

    Ok(())
}

fn default_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_DIRECTIVES)
}

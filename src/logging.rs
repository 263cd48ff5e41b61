use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` directives take precedence
/// over the default level.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

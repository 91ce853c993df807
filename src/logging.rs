//! Logging setup.
//!
//! Logs go to stderr through `tracing-subscriber`. `RUST_LOG` overrides the
//! default filter; eframe and wgpu chatter is kept at `warn`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "adzan_player=info,warn";
pub const VERBOSE_FILTER: &str = "adzan_player=debug,warn";

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init()?;

    tracing::debug!(filter = default, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_parse() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
        assert!(EnvFilter::try_new(VERBOSE_FILTER).is_ok());
    }
}

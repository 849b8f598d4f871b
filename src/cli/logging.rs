use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use super::CliError;

/// Install a compact stderr subscriber. `RUST_LOG` wins over `log_level`.
pub(super) fn init_subscriber(log_level: &str) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init()?;

    Ok(())
}

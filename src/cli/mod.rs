use std::{
    io::{self, BufWriter},
    num::NonZeroUsize,
    path::PathBuf,
};

use clap::Parser;
use tag_input::{
    config::{ConfigError, TagInputConfig},
    session::Session,
};
use thiserror::Error;
use tracing::warn;

mod logging;

/// Errors that end the CLI with a failure exit code.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Neither a config file nor `--limit` was given.
    #[error("a tag limit is required: pass --limit or --config")]
    MissingLimit,

    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),

    /// Reading stdin or writing stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "tag-input", about = "Interactive tag input", long_about = None)]
pub(crate) struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "TAG_INPUT_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of tags; overrides the configuration file
    #[arg(short, long, env = "TAG_INPUT_LIMIT")]
    limit: Option<NonZeroUsize>,

    /// CSS class for rendered chips; overrides the configuration file
    #[arg(short, long)]
    tag_class: Option<String>,

    /// Log level used when `RUST_LOG` is unset (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), CliError> {
        logging::init_subscriber(&self.log_level)?;

        let config = self.resolve_config()?;
        let mut session = Session::new(&config);

        let stdin = io::stdin();
        let stdout = io::stdout();

        let mut out = BufWriter::new(stdout.lock());

        session.run(stdin.lock(), &mut out)?;

        Ok(())
    }

    fn resolve_config(&self) -> Result<TagInputConfig, CliError> {
        let mut config = match (&self.config, self.limit) {
            (Some(path), _) => TagInputConfig::load(path)?,
            (None, Some(limit)) => TagInputConfig::new(limit),
            (None, None) => return Err(CliError::MissingLimit),
        };

        if let Some(limit) = self.limit {
            config.limit = limit;
        }

        if let Some(tag_class) = &self.tag_class {
            config.tag_class = Some(tag_class.clone());
        }

        if config.tag_class.is_some() && !config.uses_tag_class() {
            warn!("tag class is set but the chip template has no {{{{class}}}} placeholder");
        }

        Ok(config)
    }
}

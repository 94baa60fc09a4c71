mod providers;
mod resolve;

use serde_json::Value;
use tickmatch_core::DisambiguatorBuilder;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// JSON payload for stdout plus how many inputs stayed unresolved.
pub struct CommandResult {
    pub data: Value,
    pub unresolved: usize,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            unresolved: 0,
        }
    }

    pub fn with_unresolved(mut self, unresolved: usize) -> Self {
        self.unresolved = unresolved;
        self
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    match &cli.command {
        Command::Resolve(args) => {
            let builder = builder(cli).with_threshold(args.threshold);
            resolve::run(args, builder).await
        }
        Command::Providers => providers::run(builder(cli)),
    }
}

/// Builder configured from the global flags.
fn builder(cli: &Cli) -> DisambiguatorBuilder {
    let mut builder = DisambiguatorBuilder::new()
        .with_env_credentials()
        .with_primary_provider(cli.provider.clone())
        .with_timeout_ms(cli.timeout_ms);

    if let Some(key) = &cli.api_key {
        builder = builder.with_api_key(key.clone());
    }
    if !cli.fallbacks.is_empty() {
        builder = builder.with_fallback_providers(cli.fallbacks.iter().cloned());
    }
    if cli.mock {
        builder = builder.with_mock_mode();
    }

    builder
}

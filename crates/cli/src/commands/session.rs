//! Interactive session command
//!
//! Resolves configuration, builds the S3 client, and hands control to the
//! menu loop until the user exits.

use std::path::Path;

use anyhow::Context;
use bkt_core::{BucketSession, Config, ConfigManager, Credentials, Overrides, StoreConfig};
use bkt_s3::S3Client;

use super::Cli;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};
use crate::prompt::TerminalPrompt;

/// Run the interactive session
pub async fn execute(cli: &Cli) -> ExitCode {
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Formatter::new(OutputConfig::resolve(
                cli.json,
                cli.no_color,
                cli.no_progress,
                &Default::default(),
            ))
            .error(&format!("{e:#}"));
            return ExitCode::UsageError;
        }
    };

    let output_config =
        OutputConfig::resolve(cli.json, cli.no_color, cli.no_progress, &config.defaults);
    let mut formatter = Formatter::new(output_config);
    formatter.apply_color_settings();

    let store_config = match StoreConfig::resolve(
        &config.store,
        overrides(cli),
        Credentials::from_env(),
    ) {
        Ok(store_config) => store_config,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    tracing::debug!(
        bucket = %store_config.bucket,
        endpoint = store_config.endpoint.as_deref().unwrap_or("aws"),
        region = %store_config.region,
        path_style = store_config.path_style,
        static_credentials = store_config.credentials.is_some(),
        "starting session"
    );

    let client = match S3Client::new(&store_config).await {
        Ok(client) => client,
        Err(e) => {
            formatter.error(&format!("Failed to create S3 client: {e}"));
            return ExitCode::GeneralError;
        }
    };

    let mut prompt = TerminalPrompt::new(formatter.is_json());
    BucketSession::new(&store_config.bucket, &client, &mut prompt, &mut formatter)
        .run()
        .await;

    ExitCode::Success
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };

    manager
        .load()
        .with_context(|| format!("loading {}", manager.config_path().display()))
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        bucket: cli.bucket.clone(),
        endpoint: cli.endpoint.clone(),
        region: cli.region.clone(),
        path_style: cli.path_style,
    }
}

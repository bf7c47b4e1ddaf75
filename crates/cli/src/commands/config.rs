use std::path::Path;

use anyhow::Result;
use clap::Args;

use crate::context::load_config;

#[derive(Args, Debug)]
#[command(about = "Show the effective configuration")]
pub struct ConfigArgs {}

/// Display the configuration, with defaults filled in
///
/// # Errors
/// Returns error if reading the configuration fails.
pub async fn handle_config(_args: &ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path).await?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

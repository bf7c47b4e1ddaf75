use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{
    commands::{
        ConfigArgs, CopyArgs, DeleteArgs, HealthArgs, InspectArgs, ListArgs, PrepareArgs,
        ShowArgs, UploadArgs, UsageArgs, handle_config, handle_copy, handle_delete,
        handle_health, handle_inspect, handle_list, handle_prepare, handle_show, handle_upload,
        handle_usage,
    },
    context::CommandContext,
    options::FormatOptions,
};
pub mod commands;
pub mod context;
mod logging;
pub mod options;

pub use logging::init_tracing;

#[derive(Parser, Debug)]
#[command(
    name = "initscripts",
    author,
    version,
    about = "Manage Gradle init scripts shared along a project hierarchy",
    help_template = "{name} {version}\n{about}\n\n{usage-heading} {usage}\n\n{all-args}"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: .initscripts/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value = "stdout")]
    format: FormatOptions,
}

#[derive(Subcommand, Debug)]
enum Commands {
    List(ListArgs),
    Show(ShowArgs),
    Upload(UploadArgs),
    Delete(DeleteArgs),
    Usage(UsageArgs),
    Health(HealthArgs),
    Inspect(InspectArgs),
    Copy(CopyArgs),
    Prepare(PrepareArgs),
    Config(ConfigArgs),
}

pub async fn main(args: &[String]) -> Result<()> {
    let cli = Cli::parse_from(args);
    init_tracing();

    let config_path = cli.config.as_deref();
    if let Commands::Config(args) = &cli.command {
        return handle_config(args, config_path).await;
    }

    let context = CommandContext::new(config_path).await?;
    let format = cli.format;
    match &cli.command {
        Commands::List(args) => handle_list(args, &context, format).await?,
        Commands::Show(args) => handle_show(args, &context).await?,
        Commands::Upload(args) => handle_upload(args, &context).await?,
        Commands::Delete(args) => handle_delete(args, &context).await?,
        Commands::Usage(args) => handle_usage(args, &context, format).await?,
        Commands::Health(args) => handle_health(args, &context, format).await?,
        Commands::Inspect(args) => handle_inspect(args, &context, format).await?,
        Commands::Copy(args) => handle_copy(args, &context).await?,
        Commands::Prepare(args) => handle_prepare(args, &context, format).await?,
        Commands::Config(_) => {}
    }
    Ok(())
}

use anyhow::Result;
use clap::Args;

use crate::context::CommandContext;

#[derive(Args, Debug)]
#[command(about = "Copy the scripts of a project to another, as done when a project is copied")]
pub struct CopyArgs {
    /// Source project id or external id
    source: String,

    /// Target project id or external id
    target: String,
}

/// Copy every script of the source project into the target project
///
/// # Errors
/// Returns error if either project is unknown.
pub async fn handle_copy(args: &CopyArgs, context: &CommandContext) -> Result<()> {
    let source = context.project(&args.source)?;
    let target = context.project(&args.target)?;
    let copied = context.manager.map_data(&[(source, target)]).await;
    println!("Copied {copied} init scripts from {source} to {target}");
    Ok(())
}

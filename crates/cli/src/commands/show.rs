use anyhow::{Result, anyhow};
use clap::Args;

use crate::context::CommandContext;

#[derive(Args, Debug)]
#[command(about = "Print the content a project resolves for a script")]
pub struct ShowArgs {
    /// Project id or external id
    project: String,

    /// Script name
    name: String,
}

/// Print the nearest script with the given name
///
/// # Errors
/// Returns error if the project is unknown or no ancestor defines the script.
pub async fn handle_show(args: &ShowArgs, context: &CommandContext) -> Result<()> {
    let project = context.project(&args.project)?;
    let content = context
        .manager
        .find_script(project, &args.name)
        .await?
        .ok_or_else(|| anyhow!("Init script '{}' not found", args.name))?;
    print!("{content}");
    Ok(())
}

use anyhow::Result;
use clap::Args;
use initscripts_server::ScriptActions;

use crate::context::CommandContext;

#[derive(Args, Debug)]
#[command(about = "Delete a script owned by a project")]
pub struct DeleteArgs {
    /// Project id
    project: String,

    /// Script name
    name: String,
}

/// Delete a script from the project's own directory; ancestors are left alone
///
/// # Errors
/// Returns error if the project is unknown or the file cannot be removed.
pub async fn handle_delete(args: &DeleteArgs, context: &CommandContext) -> Result<()> {
    let message = ScriptActions::new(context.manager.clone())
        .delete(&context.tree, &args.project, &args.name)
        .await?;
    println!("{message}");
    Ok(())
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use initscripts_server::{ScriptActions, UploadRequest};

use crate::context::CommandContext;

#[derive(Args, Debug)]
#[command(about = "Upload a script to a project")]
pub struct UploadArgs {
    /// Project id or external id
    project: String,

    /// File to upload
    file: PathBuf,

    /// Script name, defaults to the file name
    #[arg(short, long)]
    name: Option<String>,
}

/// Store a file in the project's own script directory
///
/// # Errors
/// Returns error if the file cannot be read or the upload is rejected.
pub async fn handle_upload(args: &UploadArgs, context: &CommandContext) -> Result<()> {
    let content = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let file_name = args.name.clone().or_else(|| {
        args.file
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
    });
    let project = context.project(&args.project)?;
    let request = UploadRequest {
        project: project.external_id().to_string(),
        file_name: file_name.clone(),
        content: Some(content),
    };

    ScriptActions::new(context.manager.clone())
        .upload(&context.tree, request)
        .await?;
    println!(
        "Uploaded {} to {}",
        file_name.unwrap_or_default().green(),
        project.name().bold()
    );
    Ok(())
}

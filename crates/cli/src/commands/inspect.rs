use anyhow::Result;
use clap::Args;
use colored::Colorize;
use initscripts_server::health::{ProjectInspector, ProjectReport};

use crate::{context::CommandContext, options::FormatOptions};

#[derive(Args, Debug)]
#[command(about = "Find configurations selecting scripts that cannot be found")]
pub struct InspectArgs {
    /// Project id or external id; sub-projects are inspected too
    project: String,
}

/// Report, per project, the configurations and templates whose script does not resolve
///
/// # Errors
/// Returns error if the project is unknown.
pub async fn handle_inspect(
    args: &InspectArgs,
    context: &CommandContext,
    format: FormatOptions,
) -> Result<()> {
    let project = context.project(&args.project)?;
    let reports = ProjectInspector::new(context.manager.clone())
        .report(project)
        .await;
    format.print(&reports, |reports| render(reports))
}

fn render(reports: &[ProjectReport]) -> Vec<String> {
    if reports.is_empty() {
        return vec!["All init scripts resolve".green().to_string()];
    }
    let mut lines = vec![];
    for report in reports {
        lines.push(report.project_id.bold().to_string());
        for (id, name) in &report.build_types {
            lines.push(format!("  build configuration {id}: {} not found", name.red()));
        }
        for (id, name) in &report.build_templates {
            lines.push(format!("  template {id}: {} not found", name.red()));
        }
    }
    lines
}

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use initscripts_server::{GradleInitScriptsPage, PageModel};

use crate::{context::CommandContext, options::FormatOptions};

#[derive(Args, Debug)]
#[command(about = "List the scripts visible from a project")]
pub struct ListArgs {
    /// Project id or external id
    project: String,
}

/// List visible scripts grouped by the project defining them, with their usage
///
/// # Errors
/// Returns error if the project is unknown.
pub async fn handle_list(
    args: &ListArgs,
    context: &CommandContext,
    format: FormatOptions,
) -> Result<()> {
    let project = context.project(&args.project)?;
    let page = GradleInitScriptsPage::new(context.manager.clone(), context.analyzer());
    let model = page.fill_model(project, None).await;
    let title = page.tab_title(project).await;

    format.print(&model, |model| render(&title, model))
}

fn render(title: &str, model: &PageModel) -> Vec<String> {
    let mut lines = vec![title.bold().to_string()];
    if model.scripts.is_empty() {
        lines.push("No init scripts".dimmed().to_string());
    }
    for owner in &model.scripts {
        lines.push(format!("{} ({})", owner.project_name.bold(), owner.project_id));
        for name in &owner.scripts {
            let used_by = model
                .usage
                .get(name)
                .map_or(0, |usage| usage.build_types().count() + usage.build_templates().count());
            let usage = if used_by == 0 {
                "unused".yellow().to_string()
            } else {
                format!("used by {used_by}")
            };
            lines.push(format!("  {} {}", name.green(), usage));
        }
    }
    lines
}

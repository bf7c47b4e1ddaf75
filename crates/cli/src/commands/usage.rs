use anyhow::Result;
use clap::Args;
use colored::Colorize;
use indexmap::IndexMap;
use initscripts_core::ScriptUsage;
use initscripts_server::GradleInitScriptsPage;

use crate::{context::CommandContext, options::FormatOptions};

#[derive(Args, Debug)]
#[command(about = "Show which configurations and templates use a project's scripts")]
pub struct UsageArgs {
    /// Project id or external id
    project: String,

    /// Only this script
    name: Option<String>,
}

/// Show the usage of the scripts a project defines itself
///
/// # Errors
/// Returns error if the project is unknown.
pub async fn handle_usage(
    args: &UsageArgs,
    context: &CommandContext,
    format: FormatOptions,
) -> Result<()> {
    let project = context.project(&args.project)?;
    match &args.name {
        Some(name) => {
            let page = GradleInitScriptsPage::new(context.manager.clone(), context.analyzer());
            let report = page.usages_report(project, name).await;
            format.print(&report, |report| {
                let mut lines = vec![report.script_name.green().to_string()];
                lines.extend(render_ids(
                    &report.build_type_usages,
                    &report.template_usages,
                ));
                lines
            })
        }
        None => {
            let usage = context.analyzer().project_scripts_usage(project).await;
            format.print(&usage, render)
        }
    }
}

fn render(usage: &IndexMap<String, ScriptUsage>) -> Vec<String> {
    let mut lines = vec![];
    for (name, script_usage) in usage {
        lines.push(name.green().to_string());
        let build_types = script_usage.build_types().collect::<Vec<_>>();
        let templates = script_usage.build_templates().collect::<Vec<_>>();
        lines.extend(render_ids(&build_types, &templates));
    }
    lines
}

fn render_ids(build_types: &[impl AsRef<str>], templates: &[impl AsRef<str>]) -> Vec<String> {
    if build_types.is_empty() && templates.is_empty() {
        return vec![format!("  {}", "unused".yellow())];
    }
    build_types
        .iter()
        .map(|id| format!("  build configuration {}", id.as_ref()))
        .chain(
            templates
                .iter()
                .map(|id| format!("  template {}", id.as_ref())),
        )
        .collect()
}

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use initscripts_server::health::{
    HealthStatusItem, HealthStatusReport, HealthStatusScope, InvalidInitScriptsHealthReport,
    ItemSeverity, MissingInitScriptsHealthReport, SameInitScriptsHealthReport,
    UnusedInitScriptsHealthReport,
};

use crate::{
    context::CommandContext,
    options::{FormatOptions, SeverityOptions},
};

#[derive(Args, Debug)]
#[command(about = "Report missing, unused and misconfigured init scripts")]
pub struct HealthArgs {
    /// Limit the report to this project and its sub-projects
    #[arg(short, long)]
    project: Option<String>,

    /// Lowest severity to report
    #[arg(short, long, value_enum, default_value = "info")]
    severity: SeverityOptions,
}

fn reports(context: &CommandContext) -> Vec<Box<dyn HealthStatusReport>> {
    vec![
        Box::new(MissingInitScriptsHealthReport::new(context.manager.clone())),
        Box::new(InvalidInitScriptsHealthReport::new(&context.config.runner_type)),
        Box::new(UnusedInitScriptsHealthReport::new(context.analyzer())),
        Box::new(SameInitScriptsHealthReport),
    ]
}

/// Run every health report over the selected projects
///
/// # Errors
/// Returns error if the project is unknown.
pub async fn handle_health(
    args: &HealthArgs,
    context: &CommandContext,
    format: FormatOptions,
) -> Result<()> {
    let scope = match &args.project {
        Some(id) => HealthStatusScope::for_project(context.project(id)?),
        None => HealthStatusScope::for_tree(&context.tree),
    }
    .with_min_severity(args.severity.into());

    let mut items: Vec<HealthStatusItem> = vec![];
    for report in reports(context) {
        if !report.can_report_items_for(&scope) {
            tracing::debug!(report = report.report_type(), "Skipping report");
            continue;
        }
        report.report(&scope, &mut items).await;
    }
    format.print(&items, |items| render(items))
}

fn render(items: &[HealthStatusItem]) -> Vec<String> {
    if items.is_empty() {
        return vec!["No problems found".green().to_string()];
    }
    items
        .iter()
        .map(|item| {
            let severity = match item.category.severity {
                ItemSeverity::Warn => item.category.severity.to_string().yellow(),
                ItemSeverity::Info => item.category.severity.to_string().blue(),
            };
            let script = item.script_name().unwrap_or_default();
            format!(
                "{severity} {}: {} {}",
                item.category.description,
                item.target,
                script.green()
            )
        })
        .collect()
}

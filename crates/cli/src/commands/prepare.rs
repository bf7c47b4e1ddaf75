use std::{collections::BTreeMap, path::PathBuf};

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use initscripts_agent::{BuildRunnerContext, GradleInitScriptsFeature};
use initscripts_core::{
    BuildFeature, SettingsKind,
    plugin::{GRADLE_CMD_PARAMS, INIT_SCRIPT_CONTENT, INIT_SCRIPT_CONTENT_PARAMETER},
};
use initscripts_server::{BuildStartContext, InitScriptsBuildFeature, InitScriptsProvider};
use serde::Serialize;

use crate::{context::CommandContext, options::FormatOptions};

#[derive(Args, Debug)]
#[command(about = "Resolve the init scripts a build of a configuration would receive")]
pub struct PrepareArgs {
    /// Build configuration id
    build_type: String,

    /// Write the scripts to this directory and print the resulting Gradle parameters
    #[arg(short, long)]
    temp_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreparedBuild {
    build_type: String,
    /// Descriptions of the init script features attached to the configuration.
    features: Vec<String>,
    runners: Vec<PreparedRunner>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreparedRunner {
    run_type: String,
    /// Parameters added at build start; script contents are left out.
    added: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gradle_cmd_params: Option<String>,
}

/// Run build start injection for every Gradle step of a configuration and, with `--temp-dir`,
/// materialise the scripts the way an agent does
///
/// # Errors
/// Returns error if the configuration is unknown or a selected script has no content.
pub async fn handle_prepare(
    args: &PrepareArgs,
    context: &CommandContext,
    format: FormatOptions,
) -> Result<()> {
    let build_type = context
        .tree
        .settings(&args.build_type)
        .filter(|settings| settings.kind() == SettingsKind::BuildType)
        .ok_or_else(|| anyhow!("Build configuration '{}' not found", args.build_type))?;

    let provider = InitScriptsProvider::new(context.manager.clone())
        .with_runner_type(&context.config.runner_type);
    let mut start = BuildStartContext::for_build_type(build_type);
    provider.update_parameters(&mut start).await;

    let features = describe_features(&build_type.features);
    let mut runners = vec![];
    let mut agent = GradleInitScriptsFeature::new();
    for runner in start.runner_contexts {
        if runner.run_type != context.config.runner_type {
            continue;
        }
        let gradle_cmd_params = match &args.temp_dir {
            Some(temp_dir) => {
                let mut parameters = runner.parameters.clone();
                parameters.extend(runner.added.clone());
                let mut agent_runner = BuildRunnerContext {
                    parameters,
                    build_features: build_type.features.clone(),
                    temp_dir: temp_dir.clone(),
                };
                agent.before_runner_start(&mut agent_runner).await?;
                agent_runner.parameter(GRADLE_CMD_PARAMS).map(str::to_string)
            }
            None => None,
        };
        runners.push(PreparedRunner {
            run_type: runner.run_type,
            added: added_names(&runner.added),
            gradle_cmd_params,
        });
    }

    let prepared = PreparedBuild {
        build_type: args.build_type.clone(),
        features,
        runners,
    };
    format.print(&prepared, render)
}

fn describe_features(features: &[BuildFeature]) -> Vec<String> {
    let descriptor = InitScriptsBuildFeature;
    let described = features
        .iter()
        .filter(|feature| feature.feature_type == descriptor.feature_type())
        .map(|feature| {
            format!(
                "{}: {}",
                descriptor.display_name(),
                descriptor.describe_parameters(&feature.parameters)
            )
        })
        .collect::<Vec<_>>();
    if described.len() > 1 && !descriptor.is_multiple_features_per_build_type_allowed() {
        tracing::warn!(
            count = described.len(),
            "Only one init scripts feature is allowed per build configuration"
        );
    }
    described
}

fn added_names(added: &BTreeMap<String, String>) -> Vec<String> {
    added
        .keys()
        .filter(|key| *key != INIT_SCRIPT_CONTENT && *key != INIT_SCRIPT_CONTENT_PARAMETER)
        .map(|key| format!("{key}={}", added[key]))
        .collect()
}

fn render(prepared: &PreparedBuild) -> Vec<String> {
    let mut lines = prepared
        .features
        .iter()
        .map(|feature| feature.cyan().to_string())
        .collect::<Vec<_>>();
    if prepared.runners.is_empty() {
        lines.push(format!(
            "{} has no Gradle build steps",
            prepared.build_type.bold()
        ));
        return lines;
    }
    for (index, runner) in prepared.runners.iter().enumerate() {
        lines.push(format!("Step {} ({})", index + 1, runner.run_type).bold().to_string());
        if runner.added.is_empty() {
            lines.push(format!("  {}", "no init script".dimmed()));
        }
        for parameter in &runner.added {
            lines.push(format!("  {}", parameter.green()));
        }
        if let Some(params) = &runner.gradle_cmd_params {
            lines.push(format!("  {GRADLE_CMD_PARAMS}={params}"));
        }
    }
    lines
}

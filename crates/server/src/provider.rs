use std::collections::BTreeMap;

use initscripts_core::{
    BuildRunner, SettingsRef,
    plugin::{
        GRADLE_RUNNER_TYPE, INIT_SCRIPT_CONTENT, INIT_SCRIPT_CONTENT_PARAMETER, INIT_SCRIPT_NAME,
        INIT_SCRIPT_NAME_PARAMETER,
    },
};

use crate::GradleScriptsManager;

/// One build step of a starting build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerContext {
    pub run_type: String,
    /// Parameters configured on the runner.
    pub parameters: BTreeMap<String, String>,
    /// Parameters added at build start and sent to the agent.
    pub added: BTreeMap<String, String>,
}

impl RunnerContext {
    pub fn new(runner: &BuildRunner) -> Self {
        Self {
            run_type: runner.run_type.clone(),
            parameters: runner.parameters.clone(),
            added: BTreeMap::new(),
        }
    }

    pub fn add_runner_parameter(&mut self, key: &str, value: &str) {
        self.added.insert(key.to_string(), value.to_string());
    }
}

/// A build about to start. Builds without a configuration, personal ones for instance, have
/// no `build_type`.
#[derive(Debug, Clone)]
pub struct BuildStartContext<'a> {
    pub build_type: Option<SettingsRef<'a>>,
    pub runner_contexts: Vec<RunnerContext>,
}

impl<'a> BuildStartContext<'a> {
    pub fn for_build_type(build_type: SettingsRef<'a>) -> Self {
        Self {
            build_type: Some(build_type),
            runner_contexts: build_type.runners.iter().map(RunnerContext::new).collect(),
        }
    }
}

/// Adds the content of the selected scripts to Gradle build steps when a build starts.
#[derive(Debug, Clone)]
pub struct InitScriptsProvider {
    manager: GradleScriptsManager,
    runner_type: String,
}

impl InitScriptsProvider {
    pub fn new(manager: GradleScriptsManager) -> Self {
        Self {
            manager,
            runner_type: GRADLE_RUNNER_TYPE.to_string(),
        }
    }

    #[must_use]
    pub fn with_runner_type(mut self, runner_type: &str) -> Self {
        self.runner_type = runner_type.to_string();
        self
    }

    pub async fn update_parameters(&self, context: &mut BuildStartContext<'_>) {
        let Some(build_type) = context.build_type else {
            return;
        };
        for runner in &mut context.runner_contexts {
            if runner.run_type != self.runner_type {
                continue;
            }
            self.apply_runner_parameters(runner, build_type).await;
            self.apply_feature_parameters(runner, build_type).await;
        }
    }

    async fn apply_runner_parameters(&self, runner: &mut RunnerContext, build_type: SettingsRef<'_>) {
        let Some(name) = runner.parameters.get(INIT_SCRIPT_NAME_PARAMETER).cloned() else {
            return;
        };
        if let Some(content) = self.resolve(build_type, &name).await {
            runner.add_runner_parameter(INIT_SCRIPT_NAME_PARAMETER, &name);
            runner.add_runner_parameter(INIT_SCRIPT_CONTENT_PARAMETER, &content);
        }
    }

    async fn apply_feature_parameters(
        &self,
        runner: &mut RunnerContext,
        build_type: SettingsRef<'_>,
    ) {
        for feature in build_type.settings().init_script_features() {
            let Some(name) = feature.script_name() else {
                tracing::warn!(
                    build_type = build_type.id.as_str(),
                    "Init script feature has no script selected"
                );
                continue;
            };
            if let Some(content) = self.resolve(build_type, name).await {
                runner.add_runner_parameter(INIT_SCRIPT_NAME, name);
                runner.add_runner_parameter(INIT_SCRIPT_CONTENT, &content);
            }
        }
    }

    async fn resolve(&self, build_type: SettingsRef<'_>, name: &str) -> Option<String> {
        match self.manager.find_script(build_type.project(), name).await {
            Ok(Some(content)) => Some(content),
            Ok(None) => {
                tracing::error!(build_type = build_type.id.as_str(), "Init script '{name}' not found");
                None
            }
            Err(e) => {
                tracing::error!(
                    build_type = build_type.id.as_str(),
                    error = %e,
                    "Init script '{name}' could not be read"
                );
                None
            }
        }
    }
}

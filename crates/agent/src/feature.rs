use std::path::{Path, PathBuf};

use initscripts_core::plugin::{
    FEATURE_TYPE, GRADLE_CMD_PARAMS, INIT_SCRIPT_CONTENT, INIT_SCRIPT_CONTENT_PARAMETER,
    INIT_SCRIPT_NAME, INIT_SCRIPT_NAME_PARAMETER,
};
use tempfile::Builder;
use tokio::fs::{remove_file, write};

use crate::{AgentError, BuildFinishedStatus, BuildRunnerContext};

/// Materialises init scripts for Gradle build steps and removes them when the step finishes.
#[derive(Debug, Default)]
pub struct GradleInitScriptsFeature {
    init_script_files: Vec<PathBuf>,
}

impl GradleInitScriptsFeature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files written for the current build step.
    pub fn init_script_files(&self) -> &[PathBuf] {
        &self.init_script_files
    }

    /// # Errors
    /// Returns [`AgentError::MissingContent`] if a script is selected but the server sent no
    /// content for it. The build step must not run in that case.
    pub async fn before_runner_start(
        &mut self,
        runner: &mut BuildRunnerContext,
    ) -> Result<(), AgentError> {
        if let Some(name) = runner.parameter(INIT_SCRIPT_NAME_PARAMETER) {
            let name = name.to_string();
            let content = runner
                .parameter(INIT_SCRIPT_CONTENT_PARAMETER)
                .map(str::to_string);
            self.add_init_script(runner, &name, content).await?;
        }

        if let Some(name) = feature_script_name(runner) {
            let content = runner.parameter(INIT_SCRIPT_CONTENT).map(str::to_string);
            self.add_init_script(runner, &name, content).await?;
        }
        Ok(())
    }

    async fn add_init_script(
        &mut self,
        runner: &mut BuildRunnerContext,
        name: &str,
        content: Option<String>,
    ) -> Result<(), AgentError> {
        let content = content.ok_or_else(|| AgentError::MissingContent(name.to_string()))?;

        let path = match write_init_script(&runner.temp_dir, &content).await {
            Ok(path) => path,
            Err(e) => {
                tracing::info!(script = name, error = %e, "Failed to write init script");
                return Ok(());
            }
        };
        let params = runner.parameter(GRADLE_CMD_PARAMS).unwrap_or_default();
        let params = format!("--init-script {} {params}", path.display());
        runner.add_runner_parameter(GRADLE_CMD_PARAMS, &params);
        tracing::debug!(script = name, file = %path.display(), "Added init script");
        self.init_script_files.push(path);
        Ok(())
    }

    /// Removes every file written for the step, whatever the build status.
    pub async fn runner_finished(
        &mut self,
        _runner: &BuildRunnerContext,
        status: BuildFinishedStatus,
    ) {
        for file in self.init_script_files.drain(..) {
            if let Err(e) = remove_file(&file).await {
                tracing::debug!(
                    file = %file.display(),
                    ?status,
                    error = %e,
                    "Failed to delete init script"
                );
            }
        }
    }
}

/// Script selected by the build feature: the name injected at build start or, failing that,
/// the feature's own parameter.
fn feature_script_name(runner: &BuildRunnerContext) -> Option<String> {
    let mut features = runner.features_of_type(FEATURE_TYPE).peekable();
    features.peek()?;
    runner
        .parameter(INIT_SCRIPT_NAME)
        .or_else(|| features.find_map(|feature| feature.script_name()))
        .map(str::to_string)
}

async fn write_init_script(dir: &Path, content: &str) -> std::io::Result<PathBuf> {
    let path = Builder::new()
        .prefix("init_")
        .suffix(".gradle")
        .tempfile_in(dir)?
        .into_temp_path()
        .keep()
        .map_err(|e| e.error)?;
    let path = std::path::absolute(&path)?;
    write(&path, content).await?;
    Ok(path)
}

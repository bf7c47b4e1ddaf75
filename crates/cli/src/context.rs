use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result, anyhow};
use initscripts_core::{Config, ProjectRef, ProjectTree};
use initscripts_server::{GradleScriptsManager, InitScriptsUsageAnalyzer};
use initscripts_store::FsScriptStore;

pub const CONFIG_FILE: &str = ".initscripts/config.json";

/// Reads the configuration at `path`, or the defaults when the file does not exist.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub async fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.map_or_else(|| PathBuf::from(CONFIG_FILE), Path::to_path_buf);
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => serde_json::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// # Errors
/// Returns error if the file cannot be read or does not describe a valid tree.
pub async fn load_tree(path: &Path) -> Result<ProjectTree> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read project tree from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid project tree in {}", path.display()))
}

/// Everything a command needs: configuration, host project tree and script resolution.
pub struct CommandContext {
    pub config: Config,
    pub tree: ProjectTree,
    pub manager: GradleScriptsManager,
}

impl CommandContext {
    /// # Errors
    /// Returns error if the configuration or the project tree cannot be loaded.
    pub async fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = load_config(config_path).await?;
        let tree = load_tree(&config.projects_file).await?;
        let store = Arc::new(FsScriptStore::new(&config.data_dir));
        let manager =
            GradleScriptsManager::new(store).with_listing_failure(config.listing_failure);
        Ok(Self {
            config,
            tree,
            manager,
        })
    }

    /// Looks a project up by id, then by external id.
    ///
    /// # Errors
    /// Returns error if no project matches.
    pub fn project(&self, id: &str) -> Result<ProjectRef<'_>> {
        self.tree
            .project(id)
            .or_else(|| self.tree.project_by_external_id(id))
            .ok_or_else(|| anyhow!("Project '{id}' not found"))
    }

    pub fn analyzer(&self) -> InitScriptsUsageAnalyzer {
        InitScriptsUsageAnalyzer::new(self.manager.clone()).with_scope(self.config.usage_scope)
    }
}

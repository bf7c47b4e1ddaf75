use std::sync::Arc;

use async_trait::async_trait;
use initscripts_core::{ProjectNode, ProjectRef, ProjectTree};
use initscripts_store::{FsScriptStore, ScriptStore, StoreError};
use tempfile::TempDir;

use crate::GradleScriptsManager;

pub(crate) struct Fixture {
    _temp_dir: TempDir,
    pub store: Arc<FsScriptStore>,
}

impl Fixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(FsScriptStore::new(temp_dir.path()));
        Self {
            _temp_dir: temp_dir,
            store,
        }
    }

    pub fn manager(&self) -> GradleScriptsManager {
        GradleScriptsManager::new(self.store.clone())
    }

    pub async fn write(&self, project_id: &str, name: &str, content: &str) {
        self.store.write(project_id, name, content).await.unwrap();
    }
}

/// `root -> team -> app`
pub(crate) fn scenario_tree() -> ProjectTree {
    scenario_tree_with(vec![])
}

/// `root -> team -> app` followed by `extra` nodes.
pub(crate) fn scenario_tree_with(extra: Vec<ProjectNode>) -> ProjectTree {
    let mut nodes = vec![
        ProjectNode::new("root"),
        ProjectNode::new("team").with_parent("root"),
        ProjectNode::new("app").with_parent("team"),
    ];
    nodes.extend(extra);
    ProjectTree::new(nodes).unwrap()
}

pub(crate) fn ids<'a>(projects: impl IntoIterator<Item = ProjectRef<'a>>) -> Vec<&'a str> {
    projects.into_iter().map(ProjectRef::id).collect()
}

/// Delegates to a real store but fails to list one project.
#[derive(Debug)]
pub(crate) struct FailingStore {
    inner: Arc<FsScriptStore>,
    failing_project: String,
}

impl FailingStore {
    pub fn new(inner: Arc<FsScriptStore>, failing_project: &str) -> Self {
        Self {
            inner,
            failing_project: failing_project.to_string(),
        }
    }
}

#[async_trait]
impl ScriptStore for FailingStore {
    async fn list(&self, project_id: &str) -> Result<Vec<String>, StoreError> {
        if project_id == self.failing_project {
            return Err(StoreError::Io {
                action: "list",
                path: self.inner.project_dir(project_id),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        self.inner.list(project_id).await
    }

    async fn read(&self, project_id: &str, name: &str) -> Result<Option<String>, StoreError> {
        self.inner.read(project_id, name).await
    }

    async fn write(&self, project_id: &str, name: &str, content: &str) -> Result<(), StoreError> {
        self.inner.write(project_id, name, content).await
    }

    async fn delete(&self, project_id: &str, name: &str) -> Result<bool, StoreError> {
        self.inner.delete(project_id, name).await
    }

    async fn copy_all(&self, source_id: &str, target_id: &str) -> Result<usize, StoreError> {
        self.inner.copy_all(source_id, target_id).await
    }
}

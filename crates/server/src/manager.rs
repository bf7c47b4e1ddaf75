use std::{collections::HashSet, sync::Arc};

use indexmap::IndexMap;
use initscripts_core::{ListingFailure, ProjectRef};
use initscripts_store::{ScriptStore, StoreError, validate_script_name};

/// Scripts visible from a project, grouped by the ancestor that defines them,
/// nearest ancestor first.
pub type ScriptNames<'a> = IndexMap<ProjectRef<'a>, Vec<String>>;

/// Resolves scripts along a project's ancestor chain.
///
/// A script defined by a project is visible to all of its sub-projects unless one of them
/// defines a script with the same name, which then shadows the ancestor's.
#[derive(Debug, Clone)]
pub struct GradleScriptsManager {
    store: Arc<dyn ScriptStore>,
    listing_failure: ListingFailure,
}

impl GradleScriptsManager {
    pub fn new(store: Arc<dyn ScriptStore>) -> Self {
        Self {
            store,
            listing_failure: ListingFailure::default(),
        }
    }

    #[must_use]
    pub fn with_listing_failure(mut self, listing_failure: ListingFailure) -> Self {
        self.listing_failure = listing_failure;
        self
    }

    /// Visible script names of `project`, keyed by the project contributing them.
    ///
    /// Walks from `project` up to the root; each ancestor contributes the names not already
    /// claimed by a nearer one, and ancestors contributing nothing are left out. When listing an
    /// ancestor fails the whole result is empty, unless partial listings are configured.
    pub async fn script_names<'a>(&self, project: ProjectRef<'a>) -> ScriptNames<'a> {
        let mut found = HashSet::new();
        let mut result = IndexMap::new();

        for current in project.self_to_root() {
            let names = match self.store.list(current.id()).await {
                Ok(names) => names,
                Err(e) => match self.listing_failure {
                    ListingFailure::FailClosed => {
                        tracing::error!(
                            project = current.id(),
                            error = %e,
                            "Failed to list init scripts"
                        );
                        return IndexMap::new();
                    }
                    ListingFailure::Partial => {
                        tracing::warn!(
                            project = current.id(),
                            error = %e,
                            "Failed to list init scripts, skipping project"
                        );
                        continue;
                    }
                },
            };

            let mut scripts = vec![];
            for name in names {
                if found.insert(name.clone()) {
                    scripts.push(name);
                }
            }
            if !scripts.is_empty() {
                result.insert(current, scripts);
            }
        }
        result
    }

    /// Number of distinct script names visible from `project`.
    pub async fn scripts_count(&self, project: ProjectRef<'_>) -> usize {
        self.script_names(project).await.values().map(Vec::len).sum()
    }

    /// Names defined in the project's own directory.
    ///
    /// # Errors
    /// Returns error if the directory cannot be listed.
    pub async fn own_script_names(&self, project: ProjectRef<'_>) -> Result<Vec<String>, StoreError> {
        self.store.list(project.id()).await
    }

    /// Content of the nearest script called `name`, searching from `project` up to the root.
    ///
    /// # Errors
    /// Returns error if a script file exists but cannot be read.
    pub async fn find_script(
        &self,
        project: ProjectRef<'_>,
        name: &str,
    ) -> Result<Option<String>, StoreError> {
        if validate_script_name(name).is_err() {
            return Ok(None);
        }
        for current in project.self_to_root() {
            if let Some(content) = self.store.read(current.id(), name).await? {
                return Ok(Some(content));
            }
        }
        Ok(None)
    }

    /// # Errors
    /// Returns error if the name is invalid or the script cannot be written.
    pub async fn save_script(
        &self,
        project: ProjectRef<'_>,
        name: &str,
        content: &str,
    ) -> Result<(), StoreError> {
        self.store.write(project.id(), name, content).await
    }

    /// Deletes a script owned by `project` itself; ancestors are never touched.
    ///
    /// # Errors
    /// Returns error if the name is invalid or the file cannot be removed.
    pub async fn delete_script(&self, project: ProjectRef<'_>, name: &str) -> Result<bool, StoreError> {
        self.store.delete(project.id(), name).await
    }

    /// Replicates scripts for projects copied by the host, `(source, target)` pairs.
    /// Returns the number of files copied; failures are logged and skipped.
    pub async fn map_data(&self, copied: &[(ProjectRef<'_>, ProjectRef<'_>)]) -> usize {
        let mut total = 0;
        for (source, target) in copied {
            match self.store.copy_all(source.id(), target.id()).await {
                Ok(count) => total += count,
                Err(e) => tracing::warn!(
                    source = source.id(),
                    target = target.id(),
                    error = %e,
                    "Could not copy init scripts for project"
                ),
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fixture, FailingStore, ids, scenario_tree};
    use initscripts_core::{ProjectNode, ProjectTree};

    #[tokio::test]
    async fn test_script_names_nearest_wins() {
        let fixture = Fixture::new();
        let tree = scenario_tree();
        fixture.write("root", "common.gradle", "root common").await;
        fixture.write("root", "root-only.gradle", "root only").await;
        fixture.write("app", "common.gradle", "app common").await;
        fixture.write("app", "app-only.gradle", "app only").await;
        let manager = fixture.manager();
        let app = tree.project("app").unwrap();

        let names = manager.script_names(app).await;

        assert_eq!(ids(names.keys().copied()), vec!["app", "root"]);
        assert_eq!(names[&app], vec!["app-only.gradle", "common.gradle"]);
        assert_eq!(
            names[&tree.project("root").unwrap()],
            vec!["root-only.gradle"]
        );
        assert_eq!(manager.scripts_count(app).await, 3);
    }

    #[tokio::test]
    async fn test_script_names_scenario_shadowed_root() {
        let fixture = Fixture::new();
        let tree = scenario_tree();
        fixture.write("root", "common.gradle", "root common").await;
        fixture.write("app", "common.gradle", "app common").await;
        fixture.write("app", "app-only.gradle", "app only").await;
        let manager = fixture.manager();
        let app = tree.project("app").unwrap();

        let names = manager.script_names(app).await;

        assert_eq!(names.len(), 1);
        assert_eq!(names[&app], vec!["app-only.gradle", "common.gradle"]);
        assert_eq!(manager.scripts_count(app).await, 2);
    }

    #[tokio::test]
    async fn test_script_names_from_root_seen_by_descendants() {
        let fixture = Fixture::new();
        let tree = scenario_tree();
        fixture.write("root", "defaults.gradle", "defaults").await;
        let manager = fixture.manager();

        for id in ["root", "team", "app"] {
            let names = manager.script_names(tree.project(id).unwrap()).await;
            assert_eq!(ids(names.keys().copied()), vec!["root"]);
        }
        let sibling_tree = ProjectTree::new(vec![ProjectNode::new("unrelated")]).unwrap();
        assert!(
            manager
                .script_names(sibling_tree.project("unrelated").unwrap())
                .await
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_script_names_fail_closed() {
        let fixture = Fixture::new();
        let tree = scenario_tree();
        fixture.write("app", "app.gradle", "app").await;
        fixture.write("team", "team.gradle", "team").await;
        let manager = GradleScriptsManager::new(Arc::new(FailingStore::new(
            fixture.store.clone(),
            "root",
        )));

        let app = tree.project("app").unwrap();
        assert!(manager.script_names(app).await.is_empty());
        assert_eq!(manager.scripts_count(app).await, 0);
    }

    #[tokio::test]
    async fn test_script_names_partial() {
        let fixture = Fixture::new();
        let tree = scenario_tree();
        fixture.write("app", "app.gradle", "app").await;
        fixture.write("root", "root.gradle", "root").await;
        let manager = GradleScriptsManager::new(Arc::new(FailingStore::new(
            fixture.store.clone(),
            "team",
        )))
        .with_listing_failure(ListingFailure::Partial);

        let names = manager.script_names(tree.project("app").unwrap()).await;
        assert_eq!(ids(names.keys().copied()), vec!["app", "root"]);
    }

    #[tokio::test]
    async fn test_find_script_walks_ancestors() {
        let fixture = Fixture::new();
        let tree = scenario_tree();
        fixture.write("root", "common.gradle", "root common").await;
        fixture.write("team", "team.gradle", "team").await;
        fixture.write("app", "common.gradle", "app common").await;
        let manager = fixture.manager();
        let app = tree.project("app").unwrap();
        let team = tree.project("team").unwrap();

        assert_eq!(
            manager.find_script(app, "common.gradle").await.unwrap().as_deref(),
            Some("app common")
        );
        assert_eq!(
            manager.find_script(team, "common.gradle").await.unwrap().as_deref(),
            Some("root common")
        );
        assert_eq!(
            manager.find_script(app, "team.gradle").await.unwrap().as_deref(),
            Some("team")
        );
        assert!(manager.find_script(team, "missing.gradle").await.unwrap().is_none());
        assert!(manager.find_script(app, "../common.gradle").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_is_scoped_to_project() {
        let fixture = Fixture::new();
        let tree = scenario_tree();
        fixture.write("root", "common.gradle", "root common").await;
        fixture.write("app", "common.gradle", "app common").await;
        let manager = fixture.manager();
        let app = tree.project("app").unwrap();
        let team = tree.project("team").unwrap();

        assert!(!manager.delete_script(team, "common.gradle").await.unwrap());
        assert!(manager.delete_script(app, "common.gradle").await.unwrap());

        assert_eq!(
            manager.find_script(app, "common.gradle").await.unwrap().as_deref(),
            Some("root common")
        );
        let names = manager.script_names(app).await;
        assert_eq!(ids(names.keys().copied()), vec!["root"]);
        assert!(!manager.delete_script(app, "common.gradle").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_script_visible_immediately() {
        let fixture = Fixture::new();
        let tree = scenario_tree();
        let manager = fixture.manager();
        let team = tree.project("team").unwrap();

        manager.save_script(team, "new.gradle", "content").await.unwrap();

        assert_eq!(
            manager
                .find_script(tree.project("app").unwrap(), "new.gradle")
                .await
                .unwrap()
                .as_deref(),
            Some("content")
        );
    }

    #[tokio::test]
    async fn test_map_data_copies_scripts() {
        let fixture = Fixture::new();
        let tree = ProjectTree::new(vec![
            ProjectNode::new("root"),
            ProjectNode::new("app").with_parent("root"),
            ProjectNode::new("app_copy").with_parent("root"),
            ProjectNode::new("empty"),
            ProjectNode::new("empty_copy"),
        ])
        .unwrap();
        fixture.write("app", "a.gradle", "a").await;
        fixture.write("app", "b.gradle", "b").await;
        let manager = fixture.manager();

        let copied = manager
            .map_data(&[
                (tree.project("app").unwrap(), tree.project("app_copy").unwrap()),
                (tree.project("empty").unwrap(), tree.project("empty_copy").unwrap()),
            ])
            .await;

        assert_eq!(copied, 2);
        assert_eq!(
            manager
                .own_script_names(tree.project("app_copy").unwrap())
                .await
                .unwrap(),
            vec!["a.gradle", "b.gradle"]
        );
    }
}

use std::{future::Future, pin::Pin};

use indexmap::IndexMap;
use initscripts_core::{ProjectRef, ScriptUsage, UsageScope};

use crate::{GradleScriptsManager, manager::ScriptNames};

/// Finds the build configurations and templates referencing a project's scripts.
#[derive(Debug, Clone)]
pub struct InitScriptsUsageAnalyzer {
    manager: GradleScriptsManager,
    scope: UsageScope,
}

impl InitScriptsUsageAnalyzer {
    pub fn new(manager: GradleScriptsManager) -> Self {
        Self {
            manager,
            scope: UsageScope::default(),
        }
    }

    #[must_use]
    pub fn with_scope(mut self, scope: UsageScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn scope(&self) -> UsageScope {
        self.scope
    }

    /// Usage of the scripts defined by `project` itself; inherited scripts are not included.
    pub async fn project_scripts_usage(
        &self,
        project: ProjectRef<'_>,
    ) -> IndexMap<String, ScriptUsage> {
        let mut scripts = self.manager.script_names(project).await;
        let own = scripts.shift_remove(&project).unwrap_or_default();
        let mut current = ScriptNames::new();
        current.insert(project, own);
        self.scripts_usage(&current).await
    }

    /// Usage of one of the project's own scripts; empty if `project` does not define it.
    pub async fn script_usage(&self, project: ProjectRef<'_>, name: &str) -> ScriptUsage {
        self.project_scripts_usage(project)
            .await
            .shift_remove(name)
            .unwrap_or_default()
    }

    /// Usage of every (project, script) pair of an already resolved listing.
    ///
    /// Each script gets an entry even when nothing references it. A sub-project defining a
    /// script of the same name is not searched, its references belong to its own script.
    pub async fn scripts_usage(&self, scripts: &ScriptNames<'_>) -> IndexMap<String, ScriptUsage> {
        let mut usage = IndexMap::new();
        for (project, names) in scripts {
            for name in names {
                let found = self.subtree_usage(name, *project).await;
                usage
                    .entry(name.clone())
                    .or_insert_with(ScriptUsage::new)
                    .merge(found);
            }
        }
        usage
    }

    /// Children are folded first, then the project's own configurations and templates.
    fn subtree_usage<'a>(
        &'a self,
        name: &'a str,
        project: ProjectRef<'a>,
    ) -> Pin<Box<dyn Future<Output = ScriptUsage> + Send + 'a>> {
        Box::pin(async move {
            let mut usage = ScriptUsage::new();
            if self.scope == UsageScope::ProjectAndDescendants {
                for child in project.children() {
                    if !self.redefines(child, name).await {
                        usage.merge(self.subtree_usage(name, child).await);
                    }
                }
            }
            usage.merge(own_usage(name, project));
            usage
        })
    }

    async fn redefines(&self, project: ProjectRef<'_>, name: &str) -> bool {
        match self.manager.own_script_names(project).await {
            Ok(names) => names.iter().any(|own| own == name),
            Err(e) => {
                tracing::warn!(
                    project = project.id(),
                    error = %e,
                    "Failed to list init scripts while analysing usage"
                );
                false
            }
        }
    }
}

fn own_usage(name: &str, project: ProjectRef<'_>) -> ScriptUsage {
    let mut usage = ScriptUsage::new();
    for settings in project.own_settings() {
        if settings.references_script(name) {
            usage.add(settings);
        }
    }
    usage
}

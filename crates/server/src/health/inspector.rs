use indexmap::IndexMap;
use initscripts_core::{ProjectRef, SettingsKind, SettingsRef};
use serde::Serialize;

use crate::GradleScriptsManager;

/// Configurations and templates of one project whose selected script cannot be found.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub project_id: String,
    /// Configuration id to the missing script name.
    pub build_types: IndexMap<String, String>,
    pub build_templates: IndexMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct ProjectInspector {
    manager: GradleScriptsManager,
}

impl ProjectInspector {
    pub fn new(manager: GradleScriptsManager) -> Self {
        Self { manager }
    }

    /// Inspects `project` and every sub-project; projects without problems are left out.
    pub async fn report(&self, project: ProjectRef<'_>) -> Vec<ProjectReport> {
        let mut reports = vec![];
        let mut projects = vec![project];
        projects.extend(project.descendants());
        for current in projects {
            if let Some(report) = self.inspect_project(current).await {
                reports.push(report);
            }
        }
        reports
    }

    async fn inspect_project(&self, project: ProjectRef<'_>) -> Option<ProjectReport> {
        let mut report = ProjectReport {
            project_id: project.id().to_string(),
            build_types: IndexMap::new(),
            build_templates: IndexMap::new(),
        };
        for settings in project.own_settings() {
            for feature in settings.settings().init_script_features() {
                let Some(name) = feature.script_name() else {
                    continue;
                };
                if self.is_missing(settings, name).await {
                    let missing = match settings.kind() {
                        SettingsKind::BuildType => &mut report.build_types,
                        SettingsKind::Template => &mut report.build_templates,
                    };
                    missing.insert(settings.id.clone(), name.to_string());
                }
            }
        }
        (!report.build_types.is_empty() || !report.build_templates.is_empty()).then_some(report)
    }

    async fn is_missing(&self, settings: SettingsRef<'_>, name: &str) -> bool {
        match self.manager.find_script(settings.project(), name).await {
            Ok(content) => content.is_none(),
            Err(e) => {
                tracing::warn!(
                    settings = settings.id.as_str(),
                    script = name,
                    error = %e,
                    "Failed to resolve init script"
                );
                false
            }
        }
    }
}

use indexmap::IndexMap;
use initscripts_core::{ProjectRef, ScriptUsage};
use serde::Serialize;

use crate::{GradleScriptsManager, InitScriptsUsageAnalyzer};

const TITLE: &str = "Gradle Init Scripts";

/// Scripts contributed by one project of the listing.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectScripts {
    pub project_id: String,
    pub project_name: String,
    pub scripts: Vec<String>,
}

#[derive(Debug, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_content: Option<String>,
    pub scripts: Vec<ProjectScripts>,
    pub usage: IndexMap<String, ScriptUsage>,
}

/// Configurations and templates using one script of the current project.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsagesReport {
    pub current_project: String,
    pub script_name: String,
    pub build_type_usages: Vec<String>,
    pub template_usages: Vec<String>,
}

/// The project settings tab listing scripts with their usage.
#[derive(Debug, Clone)]
pub struct GradleInitScriptsPage {
    manager: GradleScriptsManager,
    analyzer: InitScriptsUsageAnalyzer,
}

impl GradleInitScriptsPage {
    pub fn new(manager: GradleScriptsManager, analyzer: InitScriptsUsageAnalyzer) -> Self {
        Self { manager, analyzer }
    }

    /// Visible scripts of `project` and their usage, plus the content of `file` if it resolves.
    pub async fn fill_model(&self, project: ProjectRef<'_>, file: Option<&str>) -> PageModel {
        let mut model = PageModel::default();
        if let Some(name) = file {
            match self.manager.find_script(project, name).await {
                Ok(Some(content)) => {
                    model.file_name = Some(name.to_string());
                    model.file_content = Some(content);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(
                    project = project.id(),
                    script = name,
                    error = %e,
                    "Failed to read init script"
                ),
            }
        }

        let scripts = self.manager.script_names(project).await;
        model.usage = self.analyzer.scripts_usage(&scripts).await;
        model.scripts = scripts
            .into_iter()
            .map(|(owner, scripts)| ProjectScripts {
                project_id: owner.id().to_string(),
                project_name: owner.name().to_string(),
                scripts,
            })
            .collect();
        model
    }

    pub async fn tab_title(&self, project: ProjectRef<'_>) -> String {
        match self.manager.scripts_count(project).await {
            0 => TITLE.to_string(),
            count => format!("{TITLE} ({count})"),
        }
    }

    pub async fn usages_report(&self, project: ProjectRef<'_>, script_name: &str) -> UsagesReport {
        let usage = self.analyzer.script_usage(project, script_name).await;
        UsagesReport {
            current_project: project.id().to_string(),
            script_name: script_name.to_string(),
            build_type_usages: usage.build_types().map(str::to_string).collect(),
            template_usages: usage.build_templates().map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fixture, scenario_tree_with};
    use initscripts_core::{BuildFeature, BuildSettings, ProjectNode};

    fn page(fixture: &Fixture) -> GradleInitScriptsPage {
        let manager = fixture.manager();
        GradleInitScriptsPage::new(manager.clone(), InitScriptsUsageAnalyzer::new(manager))
    }

    #[tokio::test]
    async fn test_tab_title_counts_visible_scripts() {
        let fixture = Fixture::new();
        let tree = scenario_tree_with(vec![]);
        let page = page(&fixture);
        let app = tree.project("app").unwrap();

        assert_eq!(page.tab_title(app).await, "Gradle Init Scripts");

        fixture.write("root", "common.gradle", "root").await;
        fixture.write("app", "common.gradle", "app").await;
        fixture.write("app", "app-only.gradle", "app only").await;
        assert_eq!(page.tab_title(app).await, "Gradle Init Scripts (2)");
    }

    #[tokio::test]
    async fn test_fill_model() {
        let fixture = Fixture::new();
        let tree = scenario_tree_with(vec![
            ProjectNode::new("service").with_parent("team").with_build_type(
                BuildSettings::new("C").with_feature(BuildFeature::init_script("root.gradle")),
            ),
        ]);
        fixture.write("root", "root.gradle", "root").await;
        fixture.write("team", "team.gradle", "team").await;
        let page = page(&fixture);
        let team = tree.project("team").unwrap();

        let model = page.fill_model(team, Some("root.gradle")).await;

        assert_eq!(model.file_name.as_deref(), Some("root.gradle"));
        assert_eq!(model.file_content.as_deref(), Some("root"));
        let owners = model
            .scripts
            .iter()
            .map(|p| p.project_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(owners, vec!["team", "root"]);
        assert_eq!(
            model.usage["root.gradle"].build_types().collect::<Vec<_>>(),
            vec!["C"]
        );
        assert!(model.usage["team.gradle"].is_unused());

        let model = page.fill_model(team, Some("missing.gradle")).await;
        assert!(model.file_name.is_none());
        assert!(model.file_content.is_none());
    }

    #[tokio::test]
    async fn test_usages_report() {
        let fixture = Fixture::new();
        let tree = scenario_tree_with(vec![
            ProjectNode::new("service")
                .with_parent("app")
                .with_template(
                    BuildSettings::new("T").with_feature(BuildFeature::init_script("app.gradle")),
                ),
        ]);
        fixture.write("app", "app.gradle", "app").await;
        let page = page(&fixture);

        let report = page
            .usages_report(tree.project("app").unwrap(), "app.gradle")
            .await;

        assert_eq!(report.current_project, "app");
        assert!(report.build_type_usages.is_empty());
        assert_eq!(report.template_usages, vec!["T"]);
    }
}

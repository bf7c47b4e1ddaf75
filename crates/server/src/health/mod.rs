//! Health reports about init scripts configuration.
//!
//! Each report scans a [`HealthStatusScope`] supplied by the host and hands the problems it finds
//! to a [`HealthStatusItemConsumer`]. Reports never modify anything.

mod inspector;
mod invalid;
mod missing;
mod same;
mod unused;

use std::{collections::BTreeMap, fmt::Display};

use async_trait::async_trait;
use initscripts_core::{ProjectRef, ProjectTree, SettingsKind, SettingsRef};
use serde::Serialize;

pub use inspector::{ProjectInspector, ProjectReport};
pub use invalid::InvalidInitScriptsHealthReport;
pub use missing::{MissingInitScriptsHealthReport, StatusType};
pub use same::SameInitScriptsHealthReport;
pub use unused::UnusedInitScriptsHealthReport;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "camelCase")]
pub enum ItemSeverity {
    #[default]
    Info,
    Warn,
}

impl Display for ItemSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Info => "INFO",
                Self::Warn => "WARN",
            }
        )
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ItemCategory {
    pub id: &'static str,
    pub description: &'static str,
    pub severity: ItemSeverity,
}

/// What a [`HealthStatusItem`] is reported against.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum ItemTarget {
    BuildType(String),
    Template(String),
    Project(String),
}

impl Display for ItemTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BuildType(id) => write!(f, "build configuration {id}"),
            Self::Template(id) => write!(f, "template {id}"),
            Self::Project(id) => write!(f, "project {id}"),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct HealthStatusItem {
    pub identity: String,
    pub category: ItemCategory,
    pub target: ItemTarget,
    pub data: BTreeMap<String, String>,
}

impl HealthStatusItem {
    pub fn new(identity: String, category: &ItemCategory, target: ItemTarget) -> Self {
        Self {
            identity,
            category: category.clone(),
            target,
            data: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.data.insert(key.to_string(), value.to_string());
        self
    }

    pub fn script_name(&self) -> Option<&str> {
        self.data.get("scriptName").map(String::as_str)
    }
}

/// Receives the items produced by a report.
pub trait HealthStatusItemConsumer: Send {
    fn consume(&mut self, item: HealthStatusItem);
}

impl HealthStatusItemConsumer for Vec<HealthStatusItem> {
    fn consume(&mut self, item: HealthStatusItem) {
        self.push(item);
    }
}

/// Build configurations, templates and projects a report pass looks at.
#[derive(Debug, Clone, Default)]
pub struct HealthStatusScope<'a> {
    pub build_types: Vec<SettingsRef<'a>>,
    pub templates: Vec<SettingsRef<'a>>,
    pub projects: Vec<ProjectRef<'a>>,
    pub min_severity: ItemSeverity,
}

impl<'a> HealthStatusScope<'a> {
    /// Every project, configuration and template of the tree.
    pub fn for_tree(tree: &'a ProjectTree) -> Self {
        Self {
            build_types: tree.build_types().collect(),
            templates: tree.templates().collect(),
            projects: tree.projects().collect(),
            min_severity: ItemSeverity::Info,
        }
    }

    /// `project` and all of its sub-projects.
    pub fn for_project(project: ProjectRef<'a>) -> Self {
        let mut projects = vec![project];
        projects.extend(project.descendants());
        Self {
            build_types: projects
                .iter()
                .flat_map(|p| p.own_build_types())
                .collect(),
            templates: projects.iter().flat_map(|p| p.own_templates()).collect(),
            projects,
            min_severity: ItemSeverity::Info,
        }
    }

    #[must_use]
    pub fn with_min_severity(mut self, min_severity: ItemSeverity) -> Self {
        self.min_severity = min_severity;
        self
    }

    pub fn is_item_with_severity_accepted(&self, severity: ItemSeverity) -> bool {
        severity >= self.min_severity
    }

    /// Configurations followed by templates.
    pub fn settings(&self) -> impl Iterator<Item = SettingsRef<'a>> + '_ {
        self.build_types
            .iter()
            .chain(self.templates.iter())
            .copied()
    }
}

#[async_trait]
pub trait HealthStatusReport: Send + Sync {
    fn report_type(&self) -> &'static str;

    fn display_name(&self) -> &'static str;

    fn category(&self) -> &'static ItemCategory;

    fn can_report_items_for(&self, scope: &HealthStatusScope<'_>) -> bool {
        scope.is_item_with_severity_accepted(self.category().severity)
    }

    async fn report(
        &self,
        scope: &HealthStatusScope<'_>,
        consumer: &mut dyn HealthStatusItemConsumer,
    );
}

/// Target and data key naming a configuration or template in report items.
fn settings_target(settings: SettingsRef<'_>) -> (ItemTarget, &'static str) {
    match settings.kind() {
        SettingsKind::BuildType => (ItemTarget::BuildType(settings.id.clone()), "buildType"),
        SettingsKind::Template => (ItemTarget::Template(settings.id.clone()), "buildTemplate"),
    }
}

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{project::SettingsRef, settings::SettingsKind};

/// Build configurations and templates referencing one script.
///
/// Ids keep their insertion order so listings follow the traversal that found them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScriptUsage {
    build_types: IndexSet<String>,
    build_templates: IndexSet<String>,
}

impl ScriptUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_build_type(&mut self, id: &str) {
        self.build_types.insert(id.to_string());
    }

    pub fn add_build_template(&mut self, id: &str) {
        self.build_templates.insert(id.to_string());
    }

    /// Records `settings` in the set matching its kind.
    pub fn add(&mut self, settings: SettingsRef<'_>) {
        match settings.kind() {
            SettingsKind::BuildType => self.add_build_type(&settings.id),
            SettingsKind::Template => self.add_build_template(&settings.id),
        }
    }

    pub fn build_types(&self) -> impl Iterator<Item = &str> {
        self.build_types.iter().map(String::as_str)
    }

    pub fn build_templates(&self) -> impl Iterator<Item = &str> {
        self.build_templates.iter().map(String::as_str)
    }

    /// Union of both usages, keeping `self` entries first.
    pub fn merge(&mut self, other: ScriptUsage) {
        self.build_types.extend(other.build_types);
        self.build_templates.extend(other.build_templates);
    }

    pub fn is_unused(&self) -> bool {
        self.build_types.is_empty() && self.build_templates.is_empty()
    }
}

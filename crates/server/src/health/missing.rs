use std::fmt::Display;

use async_trait::async_trait;
use initscripts_core::SettingsRef;

use crate::{
    GradleScriptsManager,
    health::{
        HealthStatusItem, HealthStatusItemConsumer, HealthStatusReport, HealthStatusScope,
        ItemCategory, ItemSeverity, settings_target,
    },
};

static CATEGORY: ItemCategory = ItemCategory {
    id: "missing_init_scripts",
    description: "Missing Gradle init scripts",
    severity: ItemSeverity::Warn,
};

/// Where a missing script was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    BuildRunner,
    BuildFeature,
}

impl Display for StatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::BuildRunner => "BUILD_RUNNER",
                Self::BuildFeature => "BUILD_FEATURE",
            }
        )
    }
}

/// Reports configurations and templates selecting a script that no ancestor project defines.
#[derive(Debug, Clone)]
pub struct MissingInitScriptsHealthReport {
    manager: GradleScriptsManager,
}

impl MissingInitScriptsHealthReport {
    pub fn new(manager: GradleScriptsManager) -> Self {
        Self { manager }
    }

    async fn check(
        &self,
        settings: SettingsRef<'_>,
        name: &str,
        status_type: StatusType,
        consumer: &mut dyn HealthStatusItemConsumer,
    ) {
        match self.manager.find_script(settings.project(), name).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                let (target, key) = settings_target(settings);
                let identity = format!("{}_{}_{}", CATEGORY.id, status_type, settings.id);
                let item = HealthStatusItem::new(identity, &CATEGORY, target)
                    .with_data(key, &settings.id)
                    .with_data("scriptName", name)
                    .with_data("statusType", &status_type.to_string());
                consumer.consume(item);
            }
            Err(e) => tracing::warn!(
                settings = settings.id.as_str(),
                script = name,
                error = %e,
                "Failed to resolve init script"
            ),
        }
    }
}

#[async_trait]
impl HealthStatusReport for MissingInitScriptsHealthReport {
    fn report_type(&self) -> &'static str {
        "MissingInitScriptsReport"
    }

    fn display_name(&self) -> &'static str {
        "Missing Gradle Init Scripts"
    }

    fn category(&self) -> &'static ItemCategory {
        &CATEGORY
    }

    async fn report(
        &self,
        scope: &HealthStatusScope<'_>,
        consumer: &mut dyn HealthStatusItemConsumer,
    ) {
        for settings in scope.settings() {
            for runner in &settings.settings().runners {
                if let Some(name) = runner.script_name() {
                    self.check(settings, name, StatusType::BuildRunner, consumer)
                        .await;
                }
            }
            for feature in settings.settings().init_script_features() {
                if let Some(name) = feature.script_name() {
                    self.check(settings, name, StatusType::BuildFeature, consumer)
                        .await;
                }
            }
        }
    }
}

use async_trait::async_trait;
use initscripts_core::plugin::GRADLE_RUNNER_TYPE;

use crate::health::{
    HealthStatusItem, HealthStatusItemConsumer, HealthStatusReport, HealthStatusScope,
    ItemCategory, ItemSeverity, settings_target,
};

static CATEGORY: ItemCategory = ItemCategory {
    id: "invalid_init_scripts",
    description: "Invalid Gradle init scripts configuration",
    severity: ItemSeverity::Info,
};

/// Reports the init script feature on configurations and templates without a Gradle build step.
#[derive(Debug, Clone)]
pub struct InvalidInitScriptsHealthReport {
    runner_type: String,
}

impl Default for InvalidInitScriptsHealthReport {
    fn default() -> Self {
        Self::new(GRADLE_RUNNER_TYPE)
    }
}

impl InvalidInitScriptsHealthReport {
    pub fn new(runner_type: &str) -> Self {
        Self {
            runner_type: runner_type.to_string(),
        }
    }
}

#[async_trait]
impl HealthStatusReport for InvalidInitScriptsHealthReport {
    fn report_type(&self) -> &'static str {
        "InvalidInitScriptsReport"
    }

    fn display_name(&self) -> &'static str {
        "Invalid Gradle Init Scripts configuration"
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
            if settings.has_runner_of_type(&self.runner_type) {
                continue;
            }
            for feature in settings.settings().init_script_features() {
                let (target, key) = settings_target(settings);
                let mut item = HealthStatusItem::new(
                    format!("{}_{}", CATEGORY.id, settings.id),
                    &CATEGORY,
                    target,
                )
                .with_data(key, &settings.id);
                if let Some(name) = feature.script_name() {
                    item = item.with_data("scriptName", name);
                }
                consumer.consume(item);
            }
        }
    }
}

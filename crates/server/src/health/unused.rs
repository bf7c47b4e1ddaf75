use async_trait::async_trait;

use crate::{
    InitScriptsUsageAnalyzer,
    health::{
        HealthStatusItem, HealthStatusItemConsumer, HealthStatusReport, HealthStatusScope,
        ItemCategory, ItemSeverity, ItemTarget,
    },
};

static CATEGORY: ItemCategory = ItemCategory {
    id: "unused_init_scripts",
    description: "Unused Gradle init scripts",
    severity: ItemSeverity::Info,
};

/// Reports scripts that no configuration or template of the owning project uses.
#[derive(Debug, Clone)]
pub struct UnusedInitScriptsHealthReport {
    analyzer: InitScriptsUsageAnalyzer,
}

impl UnusedInitScriptsHealthReport {
    pub fn new(analyzer: InitScriptsUsageAnalyzer) -> Self {
        Self { analyzer }
    }
}

#[async_trait]
impl HealthStatusReport for UnusedInitScriptsHealthReport {
    fn report_type(&self) -> &'static str {
        "UnusedInitScriptsReport"
    }

    fn display_name(&self) -> &'static str {
        CATEGORY.description
    }

    fn category(&self) -> &'static ItemCategory {
        &CATEGORY
    }

    async fn report(
        &self,
        scope: &HealthStatusScope<'_>,
        consumer: &mut dyn HealthStatusItemConsumer,
    ) {
        for &project in &scope.projects {
            let usage = self.analyzer.project_scripts_usage(project).await;
            for (name, script_usage) in usage {
                if !script_usage.is_unused() {
                    continue;
                }
                let item = HealthStatusItem::new(
                    format!("{}_{}_{}", CATEGORY.id, project.id(), name),
                    &CATEGORY,
                    ItemTarget::Project(project.id().to_string()),
                )
                .with_data("project", project.id())
                .with_data("scriptName", &name);
                consumer.consume(item);
            }
        }
    }
}

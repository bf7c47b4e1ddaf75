use async_trait::async_trait;

use crate::health::{
    HealthStatusItem, HealthStatusItemConsumer, HealthStatusReport, HealthStatusScope,
    ItemCategory, ItemSeverity, settings_target,
};

static CATEGORY: ItemCategory = ItemCategory {
    id: "same_init_scripts",
    description: "Same Gradle init script selected in build step and build feature",
    severity: ItemSeverity::Warn,
};

/// Reports a script selected twice, once by a build step and again by the build feature.
#[derive(Debug, Clone, Default)]
pub struct SameInitScriptsHealthReport;

#[async_trait]
impl HealthStatusReport for SameInitScriptsHealthReport {
    fn report_type(&self) -> &'static str {
        "SameInitScriptsReport"
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
        for settings in scope.settings() {
            for feature in settings.settings().init_script_features() {
                let Some(feature_script) = feature.script_name() else {
                    continue;
                };
                for runner in &settings.settings().runners {
                    if runner.script_name() != Some(feature_script) {
                        continue;
                    }
                    let (target, key) = settings_target(settings);
                    let item = HealthStatusItem::new(
                        format!("{}_{}", CATEGORY.id, settings.id),
                        &CATEGORY,
                        target,
                    )
                    .with_data(key, &settings.id)
                    .with_data("scriptName", feature_script);
                    consumer.consume(item);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::ItemTarget;
    use initscripts_core::{
        BuildFeature, BuildRunner, BuildSettings, ProjectNode, ProjectTree,
        plugin::{GRADLE_RUNNER_TYPE, INIT_SCRIPT_NAME_PARAMETER},
    };
    use rstest::rstest;

    #[rstest]
    #[case(Some("init.gradle"), "init.gradle", true)]
    #[case(Some("other.gradle"), "init.gradle", false)]
    #[case(None, "init.gradle", false)]
    #[tokio::test]
    async fn test_same_script_in_runner_and_feature(
        #[case] runner_script: Option<&str>,
        #[case] feature_script: &str,
        #[case] reported: bool,
    ) {
        let mut runner = BuildRunner::new(GRADLE_RUNNER_TYPE);
        if let Some(name) = runner_script {
            runner = runner.with_parameter(INIT_SCRIPT_NAME_PARAMETER, name);
        }
        let tree = ProjectTree::new(vec![
            ProjectNode::new("root").with_template(
                BuildSettings::new("tpl")
                    .with_runner(runner)
                    .with_feature(BuildFeature::init_script(feature_script)),
            ),
        ])
        .unwrap();
        let mut items = vec![];

        SameInitScriptsHealthReport
            .report(&HealthStatusScope::for_tree(&tree), &mut items)
            .await;

        assert_eq!(items.len(), usize::from(reported));
        if reported {
            assert_eq!(items[0].identity, "same_init_scripts_tpl");
            assert_eq!(items[0].target, ItemTarget::Template("tpl".to_string()));
            assert_eq!(items[0].data["buildTemplate"], "tpl");
        }
    }
}

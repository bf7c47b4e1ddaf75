use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::plugin::{FEATURE_TYPE, INIT_SCRIPT_NAME, INIT_SCRIPT_NAME_PARAMETER};

/// Whether a [`BuildSettings`] is a runnable build configuration or a template.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum SettingsKind {
    BuildType,
    Template,
}

impl Display for SettingsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::BuildType => "build configuration",
                Self::Template => "template",
            }
        )
    }
}

/// A build step of a configuration or template.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BuildRunner {
    #[serde(default)]
    pub id: String,
    pub run_type: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl BuildRunner {
    pub fn new(run_type: &str) -> Self {
        Self {
            run_type: run_type.to_string(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, key: &str, value: &str) -> Self {
        self.parameters.insert(key.to_string(), value.to_string());
        self
    }

    /// Script selected through the legacy runner parameter.
    pub fn script_name(&self) -> Option<&str> {
        self.parameters
            .get(INIT_SCRIPT_NAME_PARAMETER)
            .map(String::as_str)
    }
}

/// A parameterised attachment on a configuration or template.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BuildFeature {
    #[serde(rename = "type")]
    pub feature_type: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl BuildFeature {
    /// An init scripts feature selecting `script_name`.
    pub fn init_script(script_name: &str) -> Self {
        let mut parameters = BTreeMap::new();
        parameters.insert(INIT_SCRIPT_NAME.to_string(), script_name.to_string());
        Self {
            feature_type: FEATURE_TYPE.to_string(),
            parameters,
        }
    }

    pub fn script_name(&self) -> Option<&str> {
        self.parameters.get(INIT_SCRIPT_NAME).map(String::as_str)
    }
}

/// Settings shared by build configurations and templates.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BuildSettings {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub runners: Vec<BuildRunner>,
    #[serde(default)]
    pub features: Vec<BuildFeature>,
}

impl BuildSettings {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_runner(mut self, runner: BuildRunner) -> Self {
        self.runners.push(runner);
        self
    }

    #[must_use]
    pub fn with_feature(mut self, feature: BuildFeature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn features_of_type<'a>(
        &'a self,
        feature_type: &'a str,
    ) -> impl Iterator<Item = &'a BuildFeature> + 'a {
        self.features
            .iter()
            .filter(move |feature| feature.feature_type == feature_type)
    }

    /// Init scripts features attached to these settings.
    pub fn init_script_features(&self) -> impl Iterator<Item = &BuildFeature> {
        self.features_of_type(FEATURE_TYPE)
    }

    pub fn has_runner_of_type(&self, run_type: &str) -> bool {
        self.runners.iter().any(|runner| runner.run_type == run_type)
    }

    /// Whether a build feature or a runner parameter selects `name`.
    pub fn references_script(&self, name: &str) -> bool {
        self.runners
            .iter()
            .any(|runner| runner.script_name() == Some(name))
            || self
                .init_script_features()
                .any(|feature| feature.script_name() == Some(name))
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::GRADLE_RUNNER_TYPE;
    use rstest::rstest;

    #[test]
    fn test_init_script_feature() {
        let feature = BuildFeature::init_script("build-cache.gradle");
        assert_eq!(feature.feature_type, FEATURE_TYPE);
        assert_eq!(feature.script_name(), Some("build-cache.gradle"));
    }

    #[rstest]
    #[case("feature.gradle", true)]
    #[case("runner.gradle", true)]
    #[case("other.gradle", false)]
    fn test_references_script(#[case] name: &str, #[case] expected: bool) {
        let settings = BuildSettings::new("bt1")
            .with_runner(
                BuildRunner::new(GRADLE_RUNNER_TYPE)
                    .with_parameter(INIT_SCRIPT_NAME_PARAMETER, "runner.gradle"),
            )
            .with_feature(BuildFeature::init_script("feature.gradle"));

        assert_eq!(settings.references_script(name), expected);
    }

    #[test]
    fn test_references_script_ignores_other_feature_types() {
        let mut feature = BuildFeature::init_script("init.gradle");
        feature.feature_type = "swabra".to_string();
        let settings = BuildSettings::new("bt1").with_feature(feature);

        assert!(!settings.references_script("init.gradle"));
        assert_eq!(settings.init_script_features().count(), 0);
    }

    #[test]
    fn test_has_runner_of_type() {
        let settings = BuildSettings::new("bt1").with_runner(BuildRunner::new("simpleRunner"));
        assert!(!settings.has_runner_of_type(GRADLE_RUNNER_TYPE));
        assert!(settings.has_runner_of_type("simpleRunner"));
    }

    #[test]
    fn test_deserialize_feature_type_key() {
        let json = r#"{"id":"bt1","features":[{"type":"gradle-init-scripts","parameters":{"initScriptName":"a.gradle"}}]}"#;
        let settings: BuildSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.display_name(), "bt1");
        assert_eq!(
            settings.init_script_features().next().unwrap().script_name(),
            Some("a.gradle")
        );
    }
}

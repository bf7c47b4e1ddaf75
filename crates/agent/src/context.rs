use std::{collections::BTreeMap, path::PathBuf};

use initscripts_core::BuildFeature;

/// A build step about to run on the agent.
#[derive(Debug, Clone, Default)]
pub struct BuildRunnerContext {
    pub parameters: BTreeMap<String, String>,
    /// Features declared by the running build.
    pub build_features: Vec<BuildFeature>,
    /// Temporary directory of the running build.
    pub temp_dir: PathBuf,
}

impl BuildRunnerContext {
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, key: &str, value: &str) -> Self {
        self.add_runner_parameter(key, value);
        self
    }

    #[must_use]
    pub fn with_feature(mut self, feature: BuildFeature) -> Self {
        self.build_features.push(feature);
        self
    }

    pub fn add_runner_parameter(&mut self, key: &str, value: &str) {
        self.parameters.insert(key.to_string(), value.to_string());
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    pub fn features_of_type<'a>(
        &'a self,
        feature_type: &'a str,
    ) -> impl Iterator<Item = &'a BuildFeature> + 'a {
        self.build_features
            .iter()
            .filter(move |feature| feature.feature_type == feature_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildFinishedStatus {
    FinishedSuccess,
    FinishedFailed,
    Interrupted,
}

use std::collections::BTreeMap;

use initscripts_core::plugin::{FEATURE_TYPE, INIT_SCRIPT_NAME};

/// Describes the init script build feature to the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitScriptsBuildFeature;

impl InitScriptsBuildFeature {
    pub fn feature_type(&self) -> &'static str {
        FEATURE_TYPE
    }

    pub fn display_name(&self) -> &'static str {
        "Gradle Init Script"
    }

    pub fn is_multiple_features_per_build_type_allowed(&self) -> bool {
        false
    }

    pub fn describe_parameters(&self, parameters: &BTreeMap<String, String>) -> String {
        let name = parameters
            .get(INIT_SCRIPT_NAME)
            .map_or("null", String::as_str);
        format!("Runs Gradle build steps with the '{name}' initialization script")
    }
}

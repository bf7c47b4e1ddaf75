use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::plugin::GRADLE_RUNNER_TYPE;

/// Which references count when computing the usage of a project's scripts.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum UsageScope {
    /// Only configurations and templates owned by the project itself.
    ProjectOnly,
    /// The project and every sub-project that does not redefine the script.
    #[default]
    ProjectAndDescendants,
}

/// What to do when listing one ancestor's scripts fails.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ListingFailure {
    /// Discard everything gathered so far and return an empty listing.
    #[default]
    FailClosed,
    /// Skip the failing ancestor and keep the others.
    Partial,
}

/// Loaded from `.initscripts/config.json`, controls where scripts and the project tree live
/// and how resolution and usage analysis behave.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Root of the per-project script directories
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// JSON file describing the host project tree
    #[serde(default = "default_projects_file")]
    pub projects_file: PathBuf,

    /// Runner type that receives init scripts (default: "gradle-runner")
    #[serde(default = "default_runner_type")]
    pub runner_type: String,

    #[serde(default)]
    pub usage_scope: UsageScope,

    #[serde(default)]
    pub listing_failure: ListingFailure,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".initscripts/data")
}

fn default_projects_file() -> PathBuf {
    PathBuf::from(".initscripts/projects.json")
}

fn default_runner_type() -> String {
    GRADLE_RUNNER_TYPE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            projects_file: default_projects_file(),
            runner_type: default_runner_type(),
            usage_scope: UsageScope::default(),
            listing_failure: ListingFailure::default(),
        }
    }
}

//! # initscripts-core
//!
//! Core types for the Gradle init scripts plugin.
//!
//! Provides the host project tree and its borrowed handles, build configuration and template
//! settings, the derived [`ScriptUsage`], the shared parameter names and the configuration file
//! model.

pub mod config;
pub mod plugin;
pub mod project;
pub mod script_usage;
pub mod settings;

pub use config::{Config, ListingFailure, UsageScope};
pub use project::{ProjectNode, ProjectRef, ProjectTree, SettingsRef, TreeError};
pub use script_usage::ScriptUsage;
pub use settings::{BuildFeature, BuildRunner, BuildSettings, SettingsKind};

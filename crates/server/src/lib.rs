//! Server side of the Gradle init scripts plugin.
//!
//! [`GradleScriptsManager`] resolves scripts along the project hierarchy; everything else
//! (usage analysis, health reports, build start injection, admin actions and the project
//! page) is built on top of it.

mod actions;
mod build_feature;
pub mod health;
mod manager;
mod page;
mod provider;
mod usage;

#[cfg(test)]
mod test_support;

pub use actions::{ActionError, ScriptActions, UploadRequest};
pub use build_feature::InitScriptsBuildFeature;
pub use manager::{GradleScriptsManager, ScriptNames};
pub use page::{GradleInitScriptsPage, PageModel, ProjectScripts, UsagesReport};
pub use provider::{BuildStartContext, InitScriptsProvider, RunnerContext};
pub use usage::InitScriptsUsageAnalyzer;

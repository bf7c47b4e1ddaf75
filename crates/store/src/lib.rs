//! # initscripts-store
//!
//! Storage of Gradle init scripts, one flat directory per project.
//!
//! The [`ScriptStore`] trait is the seam used by the server side; [`FsScriptStore`] keeps every
//! project's scripts under `<data dir>/<project id>/gradleInitScripts`, one file per script.

mod error;
mod fs_store;
mod script_name;
mod store;

pub use error::StoreError;
pub use fs_store::FsScriptStore;
pub use script_name::validate_script_name;
pub use store::ScriptStore;

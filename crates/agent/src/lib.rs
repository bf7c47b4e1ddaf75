//! Agent side of the Gradle init scripts plugin.
//!
//! Before a Gradle build step runs, the script content sent by the server is written to a
//! temporary file and passed to Gradle with `--init-script`.

mod context;
mod error;
mod feature;

pub use context::{BuildFinishedStatus, BuildRunnerContext};
pub use error::AgentError;
pub use feature::GradleInitScriptsFeature;

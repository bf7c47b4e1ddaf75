//! Names shared between the server and the agent side.

/// Name of the per-project data directory holding the scripts.
pub const PLUGIN_NAME: &str = "gradleInitScripts";

/// Build feature type carrying the selected init script.
pub const FEATURE_TYPE: &str = "gradle-init-scripts";

/// Build feature parameter holding the script name.
pub const INIT_SCRIPT_NAME: &str = "initScriptName";

/// Runner parameter injected at build start with the script content.
pub const INIT_SCRIPT_CONTENT: &str = "initScriptContent";

/// Legacy runner parameter selecting a script directly on a build step.
pub const INIT_SCRIPT_NAME_PARAMETER: &str = "gradle.init.script.name";

/// Content counterpart of [`INIT_SCRIPT_NAME_PARAMETER`].
pub const INIT_SCRIPT_CONTENT_PARAMETER: &str = "gradle.init.script.content";

/// Run type of the Gradle build runner.
pub const GRADLE_RUNNER_TYPE: &str = "gradle-runner";

/// Additional command line parameters passed to Gradle by the runner.
pub const GRADLE_CMD_PARAMS: &str = "ui.gradleRunner.additional.gradle.cmd.params";

use clap::ValueEnum;
use serde::Serialize;

/// CLI output format selection.
///
/// Controls whether commands print human-readable output or JSON for scripting.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum FormatOptions {
    /// JSON output
    #[value(name = "json")]
    Json,
    /// Human-readable colored terminal output
    #[default]
    #[value(name = "stdout")]
    Stdout,
}

impl FormatOptions {
    /// Prints `value` as pretty JSON, or the lines produced by `stdout` otherwise.
    ///
    /// # Errors
    /// Returns error if `value` cannot be serialized.
    pub fn print<T: Serialize>(
        self,
        value: &T,
        stdout: impl FnOnce(&T) -> Vec<String>,
    ) -> anyhow::Result<()> {
        match self {
            Self::Json => println!("{}", serde_json::to_string_pretty(value)?),
            Self::Stdout => {
                for line in stdout(value) {
                    println!("{line}");
                }
            }
        }
        Ok(())
    }
}

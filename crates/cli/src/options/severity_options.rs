use clap::ValueEnum;
use initscripts_server::health::ItemSeverity;

/// Lowest severity of the health items to show.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SeverityOptions {
    Info,
    Warn,
}

impl From<SeverityOptions> for ItemSeverity {
    fn from(value: SeverityOptions) -> Self {
        match value {
            SeverityOptions::Info => Self::Info,
            SeverityOptions::Warn => Self::Warn,
        }
    }
}

mod format_options;
mod severity_options;

pub use format_options::FormatOptions;
pub use severity_options::SeverityOptions;

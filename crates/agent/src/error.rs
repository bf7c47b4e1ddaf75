use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error(
        "Runner is configured to use init script '{0}', but no content was found. Please check runner settings."
    )]
    MissingContent(String),
}

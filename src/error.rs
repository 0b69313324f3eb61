#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Usage(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Failed to load AWS configuration: {0}")]
    AwsConfigError(String),

    #[error("Failed to assume role: {0}")]
    AssumeRoleError(String),

    #[error("Failed to marshal credentials: {0}")]
    MarshalError(#[source] serde_json::Error),

    #[error("Failed to get sign-in token: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Could not get sign-in token. Maybe you are trying to define a session duration while you are using a role-chaining?! HTTP status code: {}", .0.as_u16())]
    SigninTokenStatus(reqwest::StatusCode),

    #[error("Failed to decode token response: {0}")]
    DecodeError(#[source] serde_json::Error),

    #[error("{0} not found in response")]
    MissingField(&'static str),
}

impl Error {
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

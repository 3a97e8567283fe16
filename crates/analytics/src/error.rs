use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid parameter '{0}': {1}")]
    InvalidParameter(&'static str, String),

    #[error("Change point unavailable: {0}")]
    MissingChangePoint(String),
}

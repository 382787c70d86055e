use lambda_http::http;
use lambda_http::Response;
use thiserror::Error;

/// Handler-side error: either a response to short-circuit with, or a runtime
/// error propagated to the Lambda runtime (which reports it as a 500).
#[derive(Debug)]
pub enum Error {
    HttpError(Response<String>),
    LambdaError(lambda_http::Error),
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Error::LambdaError(err.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::LambdaError(err.into())
    }
}

/// Failure from one of the managed-service ports. Carries the rendered SDK
/// error; callers only branch on which backend failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("storage error: {0}")]
    Store(String),
    #[error("queue error: {0}")]
    Queue(String),
    #[error("invocation error: {0}")]
    Invoke(String),
}

#[derive(Debug, PartialEq, Error)]
#[error("missing or empty required fields: {}", fields.join(", "))]
pub struct ValidationError {
    pub fields: Vec<&'static str>,
}

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde::Serialize;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl ErrorStatus {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self(Report::new(KernelError::InvalidArgument(message.into())))
    }
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    #[serde(rename = "Error")]
    error: &'a str,
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        match self.0.current_context() {
            KernelError::InvalidArgument(message) => {
                tracing::debug!("Rejected request: {message}");
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message })).into_response()
            }
            KernelError::NotFound(message) => {
                tracing::debug!("{message}");
                (StatusCode::NOT_FOUND, Json(ErrorBody { error: message })).into_response()
            }
            KernelError::Timeout => {
                tracing::error!("{:?}", self.0);
                StatusCode::SERVICE_UNAVAILABLE.into_response()
            }
            KernelError::Internal => {
                tracing::error!("{:?}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

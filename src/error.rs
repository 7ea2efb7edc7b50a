use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{gateway::GatewayError, response::ErrorResponse};

#[derive(Debug, Error)]
pub enum AppError {
    /// Gateway credentials are not configured.
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    /// The gateway answered, but without a usable transaction.
    #[error("{0}")]
    Gateway(String),

    /// Transport or decoding failure talking to the gateway. Only `message`
    /// reaches the caller.
    #[error("{message}")]
    Upstream {
        message: String,
        #[source]
        source: GatewayError,
    },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Gateway(_) => StatusCode::OK,
            AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(self.to_string());

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_failures_keep_http_ok() {
        assert_eq!(AppError::Gateway("x".into()).status_code(), StatusCode::OK);
        assert_eq!(AppError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Configuration("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let upstream = AppError::Upstream {
            message: "Erro interno do servidor".into(),
            source: GatewayError::InvalidEndpoint("x".into()),
        };
        assert_eq!(upstream.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(upstream.to_string(), "Erro interno do servidor");
    }
}

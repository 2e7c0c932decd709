use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use gemini_client::GeminiError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing 'prompt'")]
    MissingPrompt,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Upstream(#[from] GeminiError),
}

#[derive(Serialize)]
struct JsonError {
    error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingPrompt => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            log::error!("Request failed: {}", self);
        }
        HttpResponse::build(status_code).json(JsonError {
            error: self.to_string(),
        })
    }
}

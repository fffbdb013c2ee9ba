use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};

use crate::api::response;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to fetch page: {0}")]
    FetchError(String),

    #[error("Failed to tokenize text: {0}")]
    TokenizationError(String),

    #[error("Failed to measure load speed: {0}")]
    LoadSpeedError(String),

    #[error("Invalid scan request: {0}")]
    InvalidRequest(String),

    #[error("Pronunciation dictionary error: {0}")]
    DictionaryError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::FetchError(_) | AppError::LoadSpeedError(_) => StatusCode::BAD_GATEWAY,
            AppError::TokenizationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DictionaryError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        response::error::<()>(status, self.to_string()).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::FetchError(format!("request timed out: {}", err))
        } else {
            AppError::FetchError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

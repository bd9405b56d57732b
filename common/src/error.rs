use actix_web::{HttpResponse, http::StatusCode};
use serde_json::json;
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    JWT(#[from] jsonwebtoken::errors::Error),

    // === APPLICATION ERRORS ===
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Provisioning failed: {0}")]
    Provisioning(String),

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            AppError::Database(_)
            | AppError::JWT(_)
            | AppError::Provisioning(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client. Store and library errors stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Unauthorized(_)
            | AppError::NotFound(_)
            | AppError::BadRequest(_)
            | AppError::Upstream { .. } => self.to_string(),
            AppError::Provisioning(_) => "Error creating tenant".to_string(),
            _ => INTERNAL_MESSAGE.to_string(),
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        match self {
            AppError::Database(error) => log::error!("Database error: {}", error),
            AppError::JWT(error) => log::error!("JWT error: {}", error),
            AppError::Provisioning(error) => log::error!("Provisioning error: {}", error),
            AppError::Upstream { status, message } => {
                log::warn!("Upstream error ({}): {}", status, message)
            }
            AppError::Internal(error) => log::error!("Internal error: {}", error),
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(json!({ "message": self.public_message() }))
    }
}

/// Billing requests Stripe answered keep their status and message. Anything
/// else (transport, decoding) is ours to log.
impl From<stripe::StripeError> for AppError {
    fn from(err: stripe::StripeError) -> Self {
        match err {
            stripe::StripeError::Stripe(req_err) => AppError::Upstream {
                status: req_err.http_status,
                message: req_err
                    .message
                    .unwrap_or_else(|| "Billing provider error".to_string()),
            },
            other => AppError::Internal(format!("Stripe error: {}", other)),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

/// Error kinds raised by the service layer and translated to HTTP status
/// codes at the transport boundary. This impl is the only place that
/// translation happens.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for TaskError {
    fn from(err: sqlx::Error) -> Self {
        TaskError::Database(err.to_string())
    }
}

impl ResponseError for TaskError {
    fn status_code(&self) -> StatusCode {
        match self {
            TaskError::NotFound(_) => StatusCode::NOT_FOUND,
            TaskError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            TaskError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // The 404 body stays empty; the message is for internal use only.
            TaskError::NotFound(_) => HttpResponse::NotFound().finish(),
            TaskError::InvalidArgument(msg) => HttpResponse::BadRequest().body(msg.clone()),
            TaskError::Database(msg) => {
                error!("Database error: {}", msg);
                HttpResponse::InternalServerError().body("Internal server error")
            }
        }
    }
}

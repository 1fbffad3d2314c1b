use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog::render::UnknownRegion;
use thiserror::Error;
use tracing::error;

use crate::{contact::ContactReply, mailer::MailError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Missing required fields.")]
    MissingFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Failed to send email.")]
    Mail(#[from] MailError),

    #[error("{0}")]
    UnknownRegion(#[from] UnknownRegion),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MalformedPayload | AppError::MissingFields | AppError::InvalidEmail => {
                StatusCode::BAD_REQUEST
            }
            AppError::Mail(ref e) => {
                error!("Mail error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::UnknownRegion { .. } => StatusCode::NOT_FOUND,
        };

        (status, Json(ContactReply::failure(self.to_string()))).into_response()
    }
}

use actix_web::http::StatusCode;
use actix_web::ResponseError;

use thiserror::Error;

use crate::repo::InsertError;

pub type RestResult<T> = Result<T, RestError>;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("Validation Error: {0}")]
    ValidationError(String),

    #[error("Unauthorized Access: {0}")]
    Unauthorized(String),

    #[error("This email is already registered")]
    DuplicateEmail,

    #[error("Attachment upload failed. Try again, or submit without the file.")]
    UploadFailure,

    #[error("Internal Server Error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<InsertError> for RestError {
    fn from(e: InsertError) -> Self {
        match e {
            InsertError::DuplicateEmail => Self::DuplicateEmail,
            InsertError::Other(error) => {
                tracing::error!("Waitlist insert failed: {:?}", error);
                Self::InternalError("Database error".into())
            }
        }
    }
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::DuplicateEmail => StatusCode::CONFLICT,
            Self::UploadFailure => StatusCode::BAD_GATEWAY,
            Self::InternalError(_) | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

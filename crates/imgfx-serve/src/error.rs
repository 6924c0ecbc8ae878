use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use imgfx_imgproc::preset::UnknownFilterError;
use imgfx_io::{FetchError, IoError};
use serde::{Deserialize, Serialize};

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human readable description of the failure.
    pub detail: String,
}

/// Errors a request can end with. The display string is sent as the `detail`.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The source image could not be downloaded.
    #[error("Could not download the image")]
    Download {
        /// Why the download failed, only logged.
        reason: String,
    },

    /// The downloaded bytes are not an image.
    #[error("Could not decode the image")]
    Decode(#[source] IoError),

    /// A requested filter is not part of the bank.
    #[error(transparent)]
    UnknownFilter(#[from] UnknownFilterError),

    /// An image could not be written to disk.
    #[error("Could not save the image")]
    Persist(#[source] IoError),

    /// Anything else, e.g. a panicked worker task.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// The HTTP status the error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Download { .. } | ApiError::UnknownFilter(_) => StatusCode::BAD_REQUEST,
            ApiError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Persist(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Download { url, reason } => ApiError::Download {
                reason: format!("{url}: {reason}"),
            },
            FetchError::Decode(e) => ApiError::Decode(e),
        }
    }
}

impl From<imgfx_image::ImageError> for ApiError {
    fn from(err: imgfx_image::ImageError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("request failed: {self:?}");
        } else {
            log::warn!("request rejected: {self:?}");
        }

        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

use imgfx_image::Image;

use crate::{error::IoError, functional::decode_image_bgr8};

/// An error type for image downloads.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// The request failed or the server did not answer with a success status.
    #[error("Could not download the image from {url}: {reason}")]
    Download {
        /// The requested url.
        url: String,
        /// What went wrong, for logging.
        reason: String,
    },

    /// The downloaded bytes are not a decodable color image.
    #[error("Could not decode the image. {0}")]
    Decode(#[from] IoError),
}

/// Download the image at `url` and decode it into a three channel (bgr8) image.
///
/// Only a 2xx response counts as a download; its whole body is read before decoding.
///
/// # Arguments
///
/// * `client` - The HTTP client to send the request with.
/// * `url` - The location of the image.
///
/// # Errors
///
/// Returns [`FetchError::Download`] if the request cannot be sent, the status is not
/// a success or the body cannot be read, and [`FetchError::Decode`] if the body is
/// not an image.
pub async fn fetch_image(client: &reqwest::Client, url: &str) -> Result<Image<u8, 3>, FetchError> {
    let download_error = |reason: String| FetchError::Download {
        url: url.to_string(),
        reason,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| download_error(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(download_error(format!("unexpected status {status}")));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| download_error(e.to_string()))?;

    log::debug!("downloaded {} bytes from {url} ({status})", bytes.len());

    let image = decode_image_bgr8(&bytes)?;

    Ok(image)
}

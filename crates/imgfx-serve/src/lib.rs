#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Command line flags and runtime configuration.
pub mod config;

/// Error responses.
pub mod error;

/// The image processing routes.
pub mod process;

use axum::{
    routing::{get, post},
    Router,
};
use imgfx_io::ImageStore;

use crate::config::ServeConfig;

/// State shared by every request. Both members are immutable after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Client used to download source images.
    pub client: reqwest::Client,
    /// Where filtered images are saved.
    pub store: ImageStore,
}

impl AppState {
    /// Build the state from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &ServeConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let store =
            ImageStore::new(config.output_dir.clone()).with_jpeg_quality(config.jpeg_quality);

        Ok(Self::with_client(builder.build()?, store))
    }

    /// Build the state from an existing client and store.
    pub fn with_client(client: reqwest::Client, store: ImageStore) -> Self {
        Self { client, store }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Welcome to imgfx!" }))
        .route("/process-filters/", post(process::process_filters))
        .route("/process-filters", post(process::process_filters))
        .route("/process-image/", post(process::process_image))
        .route("/process-image", post(process::process_image))
        .with_state(state)
}

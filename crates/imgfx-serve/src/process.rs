use std::path::PathBuf;

use axum::{extract::State, Json};
use imgfx_image::Image;
use imgfx_imgproc::preset::PresetFilter;
use imgfx_io::{fetch_image, ImageStore};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, AppState};

/// Key of the unfiltered image in a [`PathMapping`].
pub const ORIGINAL: &str = "original";

/// Message returned by `POST /process-filters/`.
pub const FILTERS_MESSAGE: &str = "Selected filters applied and images processed successfully.";

/// Message returned by `POST /process-image/`.
pub const IMAGE_MESSAGE: &str = "Images processed successfully.";

/// Saved path of every produced image, keyed by `original` or the filter name, in
/// the order the images were first produced.
pub type PathMapping = IndexMap<String, PathBuf>;

/// Body of `POST /process-filters/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRequest {
    /// Location of the source image.
    pub url: String,
    /// Filter names to apply, in order. May be empty or repeat names.
    pub filters: Vec<String>,
}

/// Body of `POST /process-image/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Location of the source image.
    pub url: String,
}

/// Successful response of both processing routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// Human readable summary.
    pub message: String,
    /// Where each image was saved.
    pub paths: PathMapping,
}

/// Directory the images of `key` are saved into.
pub fn category(key: &str) -> String {
    format!("{key}_images")
}

/// File name the image of `key` is saved as.
pub fn file_name(key: &str) -> String {
    format!("{key}.jpg")
}

/// Save the original, then apply and save every filter in `filters`.
///
/// Each filter is applied to `original`, never to the output of a previous one. The
/// first unknown name aborts the loop; images saved before it stay on disk. Output
/// paths depend only on the filter name, so concurrent calls overwrite each other.
pub fn apply_filters<S: AsRef<str>>(
    store: &ImageStore,
    original: &Image<u8, 3>,
    filters: &[S],
) -> Result<PathMapping, ApiError> {
    let mut paths = PathMapping::new();

    let path = store
        .save(original, &category(ORIGINAL), &file_name(ORIGINAL))
        .map_err(ApiError::Persist)?;
    paths.insert(ORIGINAL.to_string(), path);

    for name in filters {
        let filter: PresetFilter = name.as_ref().parse()?;
        let filtered = filter.apply(original)?;

        let key = filter.as_str();
        let path = store
            .save(&filtered, &category(key), &file_name(key))
            .map_err(ApiError::Persist)?;
        log::debug!("{key} image saved to {}", path.display());

        // a repeated name keeps its first position and takes the latest path
        paths.insert(key.to_string(), path);
    }

    Ok(paths)
}

async fn fetch_and_apply(
    state: AppState,
    url: &str,
    filters: Vec<String>,
) -> Result<PathMapping, ApiError> {
    let original = fetch_image(&state.client, url).await?;
    log::debug!("fetched {} image from {url}", original.size());

    // the blur is heavy enough to stall the runtime if run inline
    tokio::task::spawn_blocking(move || apply_filters(&state.store, &original, &filters))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
}

/// `POST /process-filters/`: apply the requested filters to the image at `url`.
pub async fn process_filters(
    State(state): State<AppState>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    log::info!(
        "processing {} with filters {:?}",
        request.url,
        request.filters
    );

    let paths = fetch_and_apply(state, &request.url, request.filters).await?;

    Ok(Json(ProcessResponse {
        message: FILTERS_MESSAGE.to_string(),
        paths,
    }))
}

/// `POST /process-image/`: apply every filter of the bank to the image at `url`.
pub async fn process_image(
    State(state): State<AppState>,
    Json(request): Json<ImageUrl>,
) -> Result<Json<ProcessResponse>, ApiError> {
    log::info!("processing {} with all filters", request.url);

    let filters = PresetFilter::ALL
        .iter()
        .map(|filter| filter.as_str().to_string())
        .collect();
    let paths = fetch_and_apply(state, &request.url, filters).await?;

    Ok(Json(ProcessResponse {
        message: IMAGE_MESSAGE.to_string(),
        paths,
    }))
}

#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`error::IoError`] variants for file access, encoding and decoding failures.
pub mod error;

/// Download images over HTTP.
///
/// See [`fetch::fetch_image`] to download and decode an image in one step.
pub mod fetch;

/// High-level image decoding functions.
pub mod functional;

/// JPEG image encoding.
pub mod jpeg;

/// Save images into per-category directories.
pub mod store;

pub use crate::error::IoError;
pub use crate::fetch::{fetch_image, FetchError};
pub use crate::store::ImageStore;

/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(std::path::PathBuf),

    /// Error to create a directory or write a file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to encode the JPEG image.
    #[error("Error with Jpeg encoding. {0}")]
    JpegEncodingError(#[from] jpeg_encoder::EncodingError),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] imgfx_image::ImageError),

    /// Error to decode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// The decoded image has no pixels.
    #[error("The decoded image is empty")]
    EmptyImage,

    /// The image does not fit the encoder limits.
    #[error("Image of {0}x{1} pixels is too large to encode")]
    ImageTooLarge(usize, usize),
}

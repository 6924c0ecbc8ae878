use crate::error::IoError;
use imgfx_image::Image;
use jpeg_encoder::{ColorType, Encoder};
use std::{fs, path::Path};

/// Encodes the given _(bgr8)_ image as JPEG bytes.
///
/// # Arguments
///
/// - `image` - The image with channels in blue, green, red order.
/// - `quality` - The quality of the JPEG encoding, range from 1 (lowest) to 100 (highest)
pub fn encode_image_jpeg_bgr8(image: &Image<u8, 3>, quality: u8) -> Result<Vec<u8>, IoError> {
    let too_large = || IoError::ImageTooLarge(image.width(), image.height());
    let width = u16::try_from(image.width()).map_err(|_| too_large())?;
    let height = u16::try_from(image.height()).map_err(|_| too_large())?;

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, quality);
    encoder.encode(image.as_slice(), width, height, ColorType::Bgr)?;

    Ok(buffer)
}

/// Writes the given JPEG _(bgr8)_ data to the given file path.
///
/// Any existing file at `file_path` is replaced.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG image.
/// - `image` - The image with channels in blue, green, red order.
/// - `quality` - The quality of the JPEG encoding, range from 1 (lowest) to 100 (highest)
pub fn write_image_jpeg_bgr8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
    quality: u8,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    if !is_jpeg_path(file_path) {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let jpeg_data = encode_image_jpeg_bgr8(image, quality)?;
    fs::write(file_path, jpeg_data)?;

    Ok(())
}

/// Whether the path carries a `.jpg` or `.jpeg` extension, ignoring case.
pub fn is_jpeg_path(file_path: &Path) -> bool {
    file_path.extension().is_some_and(|ext| {
        ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg")
    })
}

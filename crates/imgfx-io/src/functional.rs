use std::io::Cursor;

use image::{DynamicImage, ImageDecoder, ImageReader};
use imgfx_image::{Image, ImageSize};

use crate::error::IoError;

/// Decodes an encoded image into a three channel (bgr8) image.
///
/// The format is guessed from the data. An EXIF orientation tag is applied, so the
/// pixels come out upright. Grayscale sources are expanded to three channels and
/// any alpha channel is dropped.
///
/// # Arguments
///
/// * `src` - Raw bytes of the encoded image.
///
/// # Errors
///
/// Returns [`IoError::ImageDecodeError`] for data that is not a supported image
/// (including an empty buffer) and [`IoError::EmptyImage`] for an image without pixels.
pub fn decode_image_bgr8(src: &[u8]) -> Result<Image<u8, 3>, IoError> {
    let mut decoder = ImageReader::new(Cursor::new(src))
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation()?;

    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    if size.width == 0 || size.height == 0 {
        return Err(IoError::EmptyImage);
    }

    let mut data = img.into_rgb8().into_raw();
    data.chunks_exact_mut(3).for_each(|px| px.swap(0, 2));

    Ok(Image::new(size, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jpeg::encode_image_jpeg_bgr8;

    #[test]
    fn decode_jpeg() -> Result<(), IoError> {
        let image = Image::<u8, 3>::from_size_val([24, 16].into(), 128)?;
        let bytes = encode_image_jpeg_bgr8(&image, 100)?;

        let decoded = decode_image_bgr8(&bytes)?;
        assert_eq!(decoded.cols(), 24);
        assert_eq!(decoded.rows(), 16);
        assert_eq!(decoded.num_channels(), 3);
        Ok(())
    }

    #[test]
    fn decode_png_channel_order() -> Result<(), IoError> {
        // a single red pixel, stored as rgb
        let mut bytes = Vec::new();
        image::RgbImage::from_raw(1, 1, vec![255, 0, 0])
            .ok_or(IoError::EmptyImage)?
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )?;

        let decoded = decode_image_bgr8(&bytes)?;
        assert_eq!(decoded.as_slice(), &[0, 0, 255]);
        Ok(())
    }

    #[test]
    fn decode_gray_png_expands() -> Result<(), IoError> {
        let mut bytes = Vec::new();
        image::GrayImage::from_raw(2, 1, vec![10, 20])
            .ok_or(IoError::EmptyImage)?
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )?;

        let decoded = decode_image_bgr8(&bytes)?;
        assert_eq!(decoded.as_slice(), &[10, 10, 10, 20, 20, 20]);
        Ok(())
    }

    /// Insert an APP1 segment carrying only an EXIF orientation tag right after SOI.
    fn with_exif_orientation(jpeg: &[u8], orientation: u8) -> Vec<u8> {
        #[rustfmt::skip]
        let tiff = [
            b'M', b'M', 0x00, 0x2a, 0x00, 0x00, 0x00, 0x08, // big endian header, IFD at 8
            0x00, 0x01, // one entry
            0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, orientation, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, // no next IFD
        ];
        let payload_len = (2 + 6 + tiff.len()) as u16;

        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xff, 0xe1]);
        out.extend_from_slice(&payload_len.to_be_bytes());
        out.extend_from_slice(b"Exif\0\0");
        out.extend_from_slice(&tiff);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn decode_jpeg_exif_rotated() -> Result<(), IoError> {
        let image = Image::<u8, 3>::from_size_val([4, 2].into(), 128)?;
        let jpeg = encode_image_jpeg_bgr8(&image, 100)?;

        let upright = decode_image_bgr8(&with_exif_orientation(&jpeg, 1))?;
        assert_eq!((upright.cols(), upright.rows()), (4, 2));

        // orientation 6: rotate 90 degrees clockwise to display
        let rotated = decode_image_bgr8(&with_exif_orientation(&jpeg, 6))?;
        assert_eq!((rotated.cols(), rotated.rows()), (2, 4));
        Ok(())
    }

    #[test]
    fn decode_bmp() -> Result<(), IoError> {
        let mut bytes = Vec::new();
        image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 0, 255])
            .ok_or(IoError::EmptyImage)?
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Bmp,
            )?;

        let decoded = decode_image_bgr8(&bytes)?;
        assert_eq!(decoded.as_slice(), &[0, 0, 255, 255, 0, 0]);
        Ok(())
    }

    #[test]
    fn decode_empty_and_garbage() {
        assert!(matches!(
            decode_image_bgr8(&[]),
            Err(IoError::ImageDecodeError(_))
        ));
        assert!(matches!(
            decode_image_bgr8(b"<html>not found</html>"),
            Err(IoError::ImageDecodeError(_))
        ));
    }
}

use crate::parallel;
use imgfx_image::{Image, ImageError};

/// Fixed point weights for the 8-bit grayscale conversion, scaled by `1 << 14`.
const RW: u32 = 4899;
const GW: u32 = 9617;
const BW: u32 = 1868;
const SHIFT: u32 = 14;

/// Convert a BGR8 image to grayscale using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// The weights are applied in 14-bit fixed point with rounding.
///
/// # Arguments
///
/// * `src` - The input BGR8 image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use imgfx_image::Image;
/// use imgfx_imgproc::color::gray_from_bgr8;
///
/// let image = Image::<u8, 3>::new([1, 1].into(), vec![0, 0, 255]).unwrap();
/// let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// gray_from_bgr8(&image, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[76]);
/// ```
pub fn gray_from_bgr8(src: &Image<u8, 3>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let b = src_pixel[0] as u32;
        let g = src_pixel[1] as u32;
        let r = src_pixel[2] as u32;
        dst_pixel[0] = ((b * BW + g * GW + r * RW + (1 << (SHIFT - 1))) >> SHIFT) as u8;
    });

    Ok(())
}

/// Convert a grayscale image to a BGR image by replicating the grayscale value across all three channels.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output BGR image.
///
/// Precondition: the input and output images must have the same size.
pub fn bgr_from_gray<T>(src: &Image<T, 1>, dst: &mut Image<T, 3>) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel.fill(src_pixel[0]);
    });

    Ok(())
}

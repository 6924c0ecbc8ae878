use crate::parallel;
use imgfx_image::{Image, ImageError};

/// Apply a 3x3 channel matrix to every pixel of a BGR8 image.
///
/// Each output channel is `dst[i] = sum_j(m[i][j] * src[j])` with the channel vector
/// in (blue, green, red) order. The result is clamped to `[0, 255]` and truncated
/// towards zero.
///
/// # Arguments
///
/// * `src` - The input BGR8 image.
/// * `dst` - The output BGR8 image.
/// * `m` - The row-major channel matrix.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use imgfx_image::Image;
/// use imgfx_imgproc::color::transform_bgr8;
///
/// let image = Image::<u8, 3>::new([1, 1].into(), vec![10, 20, 250]).unwrap();
/// let mut out = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// let swap_blue_red = [[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]];
/// transform_bgr8(&image, &mut out, &swap_blue_red).unwrap();
/// assert_eq!(out.as_slice(), &[250, 20, 10]);
/// ```
pub fn transform_bgr8(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    m: &[[f64; 3]; 3],
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let x = [
            src_pixel[0] as f64,
            src_pixel[1] as f64,
            src_pixel[2] as f64,
        ];
        for (out, row) in dst_pixel.iter_mut().zip(m.iter()) {
            let v = row[0] * x[0] + row[1] * x[1] + row[2] * x[2];
            *out = v.clamp(0.0, 255.0) as u8;
        }
    });

    Ok(())
}

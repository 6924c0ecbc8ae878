use imgfx_image::{Image, ImageError};

use super::{kernels, separable_filter};
use crate::padding::PaddingMode;

/// Blur an image using a gaussian blur filter
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y), both odd.
/// * `sigma` - The sigma of the gaussian kernel, xy-ordered. A non-positive sigma
///   is derived from the matching kernel size with [`kernels::default_sigma`].
/// * `padding` - How pixels past the image border are read.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
///
/// # Example
///
/// ```
/// use imgfx_image::Image;
/// use imgfx_imgproc::{filter::gaussian_blur, padding::PaddingMode};
///
/// let image = Image::<u8, 3>::from_size_val([8, 8].into(), 42).unwrap();
/// let mut blurred = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// gaussian_blur(&image, &mut blurred, (5, 5), (0.0, 0.0), PaddingMode::Replicate).unwrap();
/// assert!(blurred.as_slice().iter().all(|&v| v == 42));
/// ```
pub fn gaussian_blur<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel_size: (usize, usize),
    sigma: (f32, f32),
    padding: PaddingMode,
) -> Result<(), ImageError> {
    let resolve = |sigma: f32, size: usize| {
        if sigma > 0.0 {
            sigma
        } else {
            kernels::default_sigma(size)
        }
    };

    let kernel_x = kernels::gaussian_kernel_1d(kernel_size.0, resolve(sigma.0, kernel_size.0));
    let kernel_y = kernels::gaussian_kernel_1d(kernel_size.1, resolve(sigma.1, kernel_size.1));
    separable_filter(src, dst, &kernel_x, &kernel_y, padding)?;
    Ok(())
}

use imgfx_image::{Image, ImageError};
use rayon::prelude::*;

use crate::padding::PaddingMode;

/// A separable 2D filter that applies horizontal and vertical 1D convolutions sequentially.
///
/// This struct caches the kernel data and precomputed offsets for efficient filtering.
struct SeparableFilter<'a> {
    kernel_x: &'a [f32],
    kernel_y: &'a [f32],
    offsets_x: Vec<isize>,
    offsets_y: Vec<isize>,
    padding: PaddingMode,
}

impl<'a> SeparableFilter<'a> {
    fn new(
        kernel_x: &'a [f32],
        kernel_y: &'a [f32],
        padding: PaddingMode,
    ) -> Result<Self, ImageError> {
        for kernel in [kernel_x, kernel_y] {
            if kernel.len() % 2 == 0 {
                return Err(ImageError::InvalidKernelLength(kernel.len()));
            }
        }

        let offsets = |len: usize| {
            let half = (len / 2) as isize;
            (0..len as isize).map(|i| i - half).collect::<Vec<_>>()
        };

        Ok(Self {
            kernel_x,
            kernel_y,
            offsets_x: offsets(kernel_x.len()),
            offsets_y: offsets(kernel_y.len()),
            padding,
        })
    }

    /// Horizontal pass into an f32 buffer followed by a vertical pass into `dst`.
    fn apply<const C: usize>(&self, src: &Image<u8, C>, dst: &mut Image<u8, C>) {
        let rows = src.rows();
        let cols = src.cols();
        let row_stride = cols * C;

        let src_data = src.as_slice();
        let mut temp = vec![0.0f32; src_data.len()];

        // Horizontal
        temp.par_chunks_mut(row_stride)
            .zip(src_data.par_chunks(row_stride))
            .for_each(|(row_temp, row_src)| {
                for c in 0..cols {
                    let mut acc = [0.0f32; C];
                    for (&k, &off) in self.kernel_x.iter().zip(self.offsets_x.iter()) {
                        let x = self.padding.map_index(c as isize + off, cols);
                        let px = &row_src[x * C..(x + 1) * C];
                        for (acc_val, &v) in acc.iter_mut().zip(px) {
                            *acc_val += v as f32 * k;
                        }
                    }
                    row_temp[c * C..(c + 1) * C].copy_from_slice(&acc);
                }
            });

        // Vertical
        dst.as_slice_mut()
            .par_chunks_mut(row_stride)
            .enumerate()
            .for_each(|(r, row_dst)| {
                for c in 0..cols {
                    let mut acc = [0.0f32; C];
                    for (&k, &off) in self.kernel_y.iter().zip(self.offsets_y.iter()) {
                        let y = self.padding.map_index(r as isize + off, rows);
                        let idx = y * row_stride + c * C;
                        for (acc_val, &v) in acc.iter_mut().zip(&temp[idx..idx + C]) {
                            *acc_val += v * k;
                        }
                    }
                    for (out, acc_val) in row_dst[c * C..(c + 1) * C].iter_mut().zip(acc) {
                        *out = acc_val.round().clamp(0.0, 255.0) as u8;
                    }
                }
            });
    }
}

/// Apply a separable filter to an image.
///
/// The horizontal kernel is applied first and the vertical one on its result.
/// Pixels outside the image are read according to `padding`, so kernels larger
/// than the image are valid.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel, odd length.
/// * `kernel_y` - The vertical kernel, odd length.
/// * `padding` - The border handling mode.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn separable_filter<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel_x: &[f32],
    kernel_y: &[f32],
    padding: PaddingMode,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let filter = SeparableFilter::new(kernel_x, kernel_y, padding)?;

    if src.is_empty() {
        return Ok(());
    }

    filter.apply(src, dst);

    Ok(())
}

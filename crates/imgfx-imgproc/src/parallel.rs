use rayon::prelude::*;

use imgfx_image::Image;

/// Apply a function to each pixel in the image in parallel.
///
/// The rows of `src` and `dst` are zipped and processed on the global rayon pool;
/// `f` receives the `C1` channels of a source pixel and the `C2` channels of the
/// matching destination pixel.
///
/// PRECONDITION: `src` and `dst` must have the same size.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
{
    // chunking by a zero-length row would panic
    if src.is_empty() {
        return;
    }

    src.as_slice()
        .par_chunks_exact(C1 * src.cols())
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * src.cols()))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

#[cfg(test)]
mod tests {
    use imgfx_image::{Image, ImageError};

    #[test]
    fn test_par_iter_rows() -> Result<(), ImageError> {
        let src = Image::<u8, 3>::new([2, 2].into(), (0..12).collect())?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

        super::par_iter_rows(&src, &mut dst, |src_pixel, dst_pixel| {
            dst_pixel[0] = src_pixel[2];
        });

        assert_eq!(dst.as_slice(), &[2, 5, 8, 11]);
        Ok(())
    }

    #[test]
    fn test_par_iter_rows_empty() -> Result<(), ImageError> {
        let src = Image::<u8, 3>::new([0, 0].into(), vec![])?;
        let mut dst = Image::<u8, 3>::new([0, 0].into(), vec![])?;
        super::par_iter_rows(&src, &mut dst, |_, _| unreachable!());
        Ok(())
    }
}

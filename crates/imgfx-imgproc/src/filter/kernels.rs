/// Derive the gaussian sigma from the kernel size.
///
/// Uses `sigma = 0.3 * ((kernel_size - 1) * 0.5 - 1) + 0.8`, the usual rule for
/// picking a sigma whose bell covers the kernel extent.
pub fn default_sigma(kernel_size: usize) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel, normalized to sum to one.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size as f64 - 1.0) / 2.0;
    let sigma_sq = sigma as f64 * sigma as f64;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f64 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f64>();
    kernel.into_iter().map(|k| (k / norm) as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gaussian_kernel_1d() {
        let kernel = gaussian_kernel_1d(5, 0.5);

        let expected = [
            0.00026386508,
            0.10645077,
            0.78657067,
            0.10645077,
            0.00026386508,
        ];

        for (&k, &e) in kernel.iter().zip(expected.iter()) {
            assert_relative_eq!(k, e, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_gaussian_kernel_1d_normalized() {
        let kernel = gaussian_kernel_1d(35, default_sigma(35));
        assert_eq!(kernel.len(), 35);
        assert_relative_eq!(kernel.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
        // symmetric with the peak in the middle
        assert_relative_eq!(kernel[0], kernel[34]);
        assert!(kernel.iter().all(|&k| k <= kernel[17]));
    }

    #[test]
    fn test_default_sigma() {
        assert_relative_eq!(default_sigma(35), 5.6, epsilon = 1e-5);
        assert_relative_eq!(default_sigma(3), 0.8, epsilon = 1e-6);
    }
}

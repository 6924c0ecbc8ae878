use std::{fmt, str::FromStr};

use imgfx_image::{Image, ImageError};

use crate::{color, filter, padding::PaddingMode};

/// Side of the square kernel used by [`PresetFilter::Blur`].
pub const BLUR_KERNEL_SIZE: usize = 35;

/// Channel matrix of [`PresetFilter::Cool`], (blue, green, red) ordered.
pub const COOL_MATRIX: [[f64; 3]; 3] = [[1.1, 0.0, 0.0], [0.0, 1.1, 0.0], [0.0, 0.0, 0.9]];

/// Channel matrix of [`PresetFilter::Warm`], (blue, green, red) ordered.
pub const WARM_MATRIX: [[f64; 3]; 3] = [[0.9, 0.0, 0.0], [0.0, 0.9, 0.0], [0.0, 0.0, 1.1]];

/// Error returned when parsing a name that is not part of the filter bank.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown filter: {0}")]
pub struct UnknownFilterError(pub String);

/// The named filters the service can apply to a BGR8 image.
///
/// Parse from the request strings with [`str::parse`]; anything outside the
/// fixed set is rejected there, so [`PresetFilter::apply`] never sees an
/// unknown name.
///
/// # Example
///
/// ```
/// use imgfx_imgproc::preset::PresetFilter;
///
/// let filter: PresetFilter = "warm".parse().unwrap();
/// assert_eq!(filter, PresetFilter::Warm);
/// assert!("sepia".parse::<PresetFilter>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetFilter {
    /// Boost blue and green, damp red.
    Cool,
    /// Damp blue and green, boost red.
    Warm,
    /// Luminance grayscale kept as three identical channels.
    Bw,
    /// Wide gaussian blur.
    Blur,
}

impl PresetFilter {
    /// Every filter of the bank.
    pub const ALL: [PresetFilter; 4] = [
        PresetFilter::Cool,
        PresetFilter::Warm,
        PresetFilter::Bw,
        PresetFilter::Blur,
    ];

    /// The identifier used on the wire and in output file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetFilter::Cool => "cool",
            PresetFilter::Warm => "warm",
            PresetFilter::Bw => "bw",
            PresetFilter::Blur => "blur",
        }
    }

    /// Apply the filter to `src` and return the filtered copy.
    ///
    /// The source image is left untouched.
    pub fn apply(&self, src: &Image<u8, 3>) -> Result<Image<u8, 3>, ImageError> {
        let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0)?;

        match self {
            PresetFilter::Cool => color::transform_bgr8(src, &mut dst, &COOL_MATRIX)?,
            PresetFilter::Warm => color::transform_bgr8(src, &mut dst, &WARM_MATRIX)?,
            PresetFilter::Bw => {
                let mut gray = Image::<u8, 1>::from_size_val(src.size(), 0)?;
                color::gray_from_bgr8(src, &mut gray)?;
                color::bgr_from_gray(&gray, &mut dst)?;
            }
            PresetFilter::Blur => filter::gaussian_blur(
                src,
                &mut dst,
                (BLUR_KERNEL_SIZE, BLUR_KERNEL_SIZE),
                (0.0, 0.0),
                PaddingMode::Replicate,
            )?,
        }

        log::debug!("applied {} filter on {}", self, src.size());

        Ok(dst)
    }
}

impl fmt::Display for PresetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetFilter {
    type Err = UnknownFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetFilter::ALL
            .into_iter()
            .find(|filter| filter.as_str() == s)
            .ok_or_else(|| UnknownFilterError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> Result<Image<u8, 3>, ImageError> {
        let size = [16, 8].into();
        let data = (0..16 * 8 * 3).map(|i| (i * 7 % 256) as u8).collect();
        Image::new(size, data)
    }

    #[test]
    fn parse_known_filters() {
        for filter in PresetFilter::ALL {
            assert_eq!(filter.as_str().parse::<PresetFilter>(), Ok(filter));
        }
    }

    #[test]
    fn parse_unknown_filter() {
        let err = "sepia".parse::<PresetFilter>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown filter: sepia");
        // names are case sensitive
        assert!("Cool".parse::<PresetFilter>().is_err());
    }

    #[test]
    fn cool_warm_at_extremes() -> Result<(), ImageError> {
        let src = Image::<u8, 3>::new([2, 1].into(), vec![0, 0, 0, 255, 255, 255])?;

        let cool = PresetFilter::Cool.apply(&src)?;
        assert_eq!(cool.as_slice(), &[0, 0, 0, 255, 255, 229]);

        let warm = PresetFilter::Warm.apply(&src)?;
        assert_eq!(warm.as_slice(), &[0, 0, 0, 229, 229, 255]);
        Ok(())
    }

    #[test]
    fn bw_channels_equal() -> Result<(), ImageError> {
        let bw = PresetFilter::Bw.apply(&gradient()?)?;
        for px in bw.as_slice().chunks_exact(3) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
        Ok(())
    }

    #[test]
    fn apply_keeps_size_and_source() -> Result<(), ImageError> {
        let src = gradient()?;
        let before = src.clone();
        for filter in PresetFilter::ALL {
            let out = filter.apply(&src)?;
            assert_eq!(out.size(), src.size());
        }
        assert_eq!(src, before);
        Ok(())
    }

    #[test]
    fn apply_is_deterministic() -> Result<(), ImageError> {
        let src = gradient()?;
        for filter in PresetFilter::ALL {
            assert_eq!(filter.apply(&src)?, filter.apply(&src)?);
        }
        Ok(())
    }
}

use std::{fs, path::PathBuf};

use imgfx_image::Image;

use crate::{
    error::IoError,
    jpeg::{is_jpeg_path, write_image_jpeg_bgr8},
};

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Saves images under `<root>/<category>/<file_name>`.
///
/// Without a root, categories are created directly under the working directory and
/// the returned paths are relative, e.g. `cool_images/cool.jpg`.
///
/// The store holds no state between calls: saving twice to the same category and
/// file name overwrites the earlier file.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: Option<PathBuf>,
    jpeg_quality: u8,
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ImageStore {
    /// Create a store writing below `root`, or below the working directory if `None`.
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Set the JPEG quality, clamped to `1..=100`.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// The JPEG quality used to encode saved images.
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// The directory images of `category` are saved into.
    pub fn category_dir(&self, category: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(category),
            None => PathBuf::from(category),
        }
    }

    /// Save `image` as `<category>/<file_name>` and return the written path.
    ///
    /// The category directory and any missing parents are created first; a directory
    /// that already exists, or is created concurrently, is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidFileExtension`] for file names that are not `.jpg`
    /// or `.jpeg`, and [`IoError::FileError`] or an encoding error if the directory
    /// or the file cannot be written.
    pub fn save(
        &self,
        image: &Image<u8, 3>,
        category: &str,
        file_name: &str,
    ) -> Result<PathBuf, IoError> {
        let dir = self.category_dir(category);
        let path = dir.join(file_name);

        if !is_jpeg_path(&path) {
            return Err(IoError::InvalidFileExtension(path));
        }

        fs::create_dir_all(&dir)?;
        write_image_jpeg_bgr8(&path, image, self.jpeg_quality)?;

        log::debug!("saved {} image to {}", image.size(), path.display());

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_creates_category_dir() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let store = ImageStore::new(Some(tmp_dir.path().to_path_buf()));

        let image = Image::<u8, 3>::from_size_val([8, 8].into(), 10)?;
        let path = store.save(&image, "cool_images", "cool.jpg")?;

        assert_eq!(path, tmp_dir.path().join("cool_images").join("cool.jpg"));
        assert!(path.is_file());
        Ok(())
    }

    #[test]
    fn save_overwrites() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let store = ImageStore::new(Some(tmp_dir.path().to_path_buf()));

        let small = Image::<u8, 3>::from_size_val([8, 8].into(), 10)?;
        let large = Image::<u8, 3>::from_size_val([64, 64].into(), 10)?;

        let first = store.save(&small, "bw_images", "bw.jpg")?;
        let second = store.save(&large, "bw_images", "bw.jpg")?;
        assert_eq!(first, second);

        let decoded = crate::functional::decode_image_bgr8(&fs::read(&second)?)?;
        assert_eq!(decoded.cols(), 64);
        assert_eq!(fs::read_dir(tmp_dir.path().join("bw_images"))?.count(), 1);
        Ok(())
    }

    #[test]
    fn save_nested_root() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let root = tmp_dir.path().join("a").join("b");
        let store = ImageStore::new(Some(root.clone())).with_jpeg_quality(0);
        assert_eq!(store.jpeg_quality(), 1);

        let image = Image::<u8, 3>::from_size_val([4, 4].into(), 0)?;
        let path = store.save(&image, "original_images", "original.jpg")?;
        assert!(path.starts_with(&root));
        assert!(path.is_file());
        Ok(())
    }

    #[test]
    fn save_rejects_other_extensions() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let store = ImageStore::new(Some(tmp_dir.path().to_path_buf()));

        let image = Image::<u8, 3>::from_size_val([4, 4].into(), 0)?;
        let res = store.save(&image, "raw_images", "raw.bmp");
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        assert!(!tmp_dir.path().join("raw_images").exists());
        Ok(())
    }

    #[test]
    fn save_into_file_fails() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        // a plain file where the category directory should go
        fs::write(tmp_dir.path().join("blur_images"), b"")?;
        let store = ImageStore::new(Some(tmp_dir.path().to_path_buf()));

        let image = Image::<u8, 3>::from_size_val([4, 4].into(), 0)?;
        let res = store.save(&image, "blur_images", "blur.jpg");
        assert!(matches!(res, Err(IoError::FileError(_))));
        Ok(())
    }

    #[test]
    fn relative_paths_without_root() {
        let store = ImageStore::default();
        assert_eq!(store.category_dir("cool_images"), PathBuf::from("cool_images"));
    }
}

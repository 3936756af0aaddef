//! PNG load/save for goal and candidate images.

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};

/// Image file errors, tagged with the path involved.
#[derive(Debug, thiserror::Error)]
pub enum ImageIoError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decode an image file and drop its alpha channel.
pub fn load_goal<P: AsRef<Path>>(path: P) -> Result<RgbImage, ImageIoError> {
    let path = path.as_ref();
    image::open(path)
        .map(|img| img.to_rgb8())
        .map_err(|source| ImageIoError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Encode an image as PNG regardless of the path's extension.
pub fn save_png<P: AsRef<Path>>(img: &RgbImage, path: P) -> Result<(), ImageIoError> {
    let path = path.as_ref();
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| ImageIoError::Write {
            path: path.to_path_buf(),
            source,
        })
}

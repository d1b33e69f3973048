use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Failed to load image: {0}")]
    Load(#[from] ImageError),
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Image has no pixels")]
    Empty,
}

/// Decode the image at `path`, sniffing the format from its contents so
/// uploads saved under a temporary name still decode.
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, ImageLoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImageLoadError::NotFound(path.display().to_string()));
    }
    let img = image::ImageReader::open(path)
        .map_err(ImageError::IoError)?
        .with_guessed_format()
        .map_err(ImageError::IoError)?
        .decode()?;

    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageLoadError::Empty);
    }
    Ok(img)
}

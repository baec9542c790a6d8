use std::path::Path;

use image::{DynamicImage, ImageReader};

use crate::error::Result;

/// Decode a raster file. The format is sniffed from the content first,
/// falling back to the extension.
pub fn load(path: &Path) -> Result<DynamicImage> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "decoded raster"
    );
    Ok(img)
}

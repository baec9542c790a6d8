//! SVG rasterization via resvg. Compiled out without the `svg` feature, in
//! which case [`SvgRasterizer::probe`] always fails.

use std::path::Path;

use image::DynamicImage;

use crate::error::{ConvertError, Result};

#[cfg(feature = "svg")]
use {
    image::{Rgba, RgbaImage},
    resvg::{tiny_skia, usvg},
    std::sync::Arc,
};

/// Largest width or height libwebp will encode
#[cfg(feature = "svg")]
const WEBP_MAX_DIMENSION: f64 = 16383.0;

pub struct SvgRasterizer {
    #[cfg(feature = "svg")]
    fontdb: Arc<usvg::fontdb::Database>,
}

#[cfg(feature = "svg")]
impl SvgRasterizer {
    /// Load the system font database once; every SVG shares it.
    pub fn probe() -> Result<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "svg rasterizer ready");
        Ok(Self {
            fontdb: Arc::new(db),
        })
    }

    /// Render `path` into an RGBA image at `scale` times its intrinsic size
    pub fn rasterize(&self, path: &Path, scale: f32) -> Result<DynamicImage> {
        let data = std::fs::read(path)?;
        let options = usvg::Options {
            resources_dir: path.parent().map(Path::to_path_buf),
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_data(&data, &options)
            .map_err(|e| ConvertError::Rasterization(e.to_string()))?;

        let size = tree.size();
        let (width, height) = raster_size(size.width(), size.height(), scale)?;

        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            ConvertError::Rasterization(format!("cannot allocate {width}x{height} pixmap"))
        })?;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        // tiny-skia stores premultiplied alpha
        let mut rgba = RgbaImage::new(width, height);
        for (dst, src) in rgba.pixels_mut().zip(pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(DynamicImage::ImageRgba8(rgba))
    }
}

/// Pixel size of an `width`x`height` document rendered at `scale`
#[cfg(feature = "svg")]
fn raster_size(width: f32, height: f32, scale: f32) -> Result<(u32, u32)> {
    let w = (f64::from(width) * f64::from(scale)).ceil();
    let h = (f64::from(height) * f64::from(scale)).ceil();
    if !w.is_finite() || !h.is_finite() || w < 1.0 || h < 1.0 {
        return Err(ConvertError::Rasterization(format!(
            "empty raster {w}x{h} at scale {scale}"
        )));
    }
    if w > WEBP_MAX_DIMENSION || h > WEBP_MAX_DIMENSION {
        return Err(ConvertError::Rasterization(format!(
            "raster {w}x{h} at scale {scale} exceeds the WebP limit of {WEBP_MAX_DIMENSION} pixels per side"
        )));
    }
    Ok((w as u32, h as u32))
}

#[cfg(not(feature = "svg"))]
impl SvgRasterizer {
    pub fn probe() -> Result<Self> {
        Err(ConvertError::Rasterization(
            "built without the `svg` feature".to_string(),
        ))
    }

    pub fn rasterize(&self, _path: &Path, _scale: f32) -> Result<DynamicImage> {
        Err(ConvertError::RasterizationUnavailable)
    }
}

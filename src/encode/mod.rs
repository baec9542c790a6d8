//! Decode or rasterize a source file, normalise its colour mode and encode WebP.

pub mod raster;
pub mod svg;

use std::fs;
use std::path::Path;

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::error::{ConvertError, Result};
use crate::formats::SourceKind;
use svg::SvgRasterizer;

/// libwebp's slowest, best-compressing method
pub const WEBP_METHOD: i32 = 6;

/// Pixel buffer after colour-mode normalisation
#[derive(Debug)]
pub enum Pixels {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl Pixels {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Pixels::Rgb(buf) => buf.dimensions(),
            Pixels::Rgba(buf) => buf.dimensions(),
        }
    }

    pub fn channels(&self) -> u8 {
        match self {
            Pixels::Rgb(_) => 3,
            Pixels::Rgba(_) => 4,
        }
    }
}

/// Keep an alpha channel only if the decoded image carries one.
///
/// Palette images with a transparent entry are expanded to RGBA by the
/// decoders, so they land on the alpha branch too.
pub fn normalize(img: DynamicImage) -> Pixels {
    if img.color().has_alpha() {
        Pixels::Rgba(img.into_rgba8())
    } else {
        Pixels::Rgb(img.into_rgb8())
    }
}

/// Lossy WebP at `quality` (1-100) with the highest-effort method
pub fn encode_webp(pixels: &Pixels, quality: u8) -> Result<Vec<u8>> {
    let mut config = webp::WebPConfig::new()
        .map_err(|_| ConvertError::Encode("could not initialise libwebp config".to_string()))?;
    config.lossless = 0;
    config.quality = f32::from(quality);
    config.method = WEBP_METHOD;

    let (width, height) = pixels.dimensions();
    let encoded = match pixels {
        Pixels::Rgb(buf) => webp::Encoder::from_rgb(buf.as_raw(), width, height).encode_advanced(&config),
        Pixels::Rgba(buf) => webp::Encoder::from_rgba(buf.as_raw(), width, height).encode_advanced(&config),
    }
    .map_err(|e| ConvertError::Encode(format!("{e:?}")))?;

    Ok(encoded.to_vec())
}

/// Write the encoded bytes, removing whatever was written if the write fails
fn write_output(output: &Path, bytes: &[u8]) -> Result<u64> {
    if let Err(e) = fs::write(output, bytes) {
        let _ = fs::remove_file(output);
        return Err(e.into());
    }
    Ok(bytes.len() as u64)
}

/// Per-file converter. Holds the optional SVG rasterizer resolved at startup.
pub struct Converter<'a> {
    svg: Option<&'a SvgRasterizer>,
}

impl<'a> Converter<'a> {
    pub fn new(svg: Option<&'a SvgRasterizer>) -> Self {
        Self { svg }
    }

    /// Convert `input` into a WebP file at `output`, returning its size.
    ///
    /// Nothing is written unless decoding and encoding both succeed.
    pub fn convert(
        &self,
        input: &Path,
        output: &Path,
        kind: SourceKind,
        quality: u8,
        scale: f32,
    ) -> Result<u64> {
        let img = match kind {
            SourceKind::Raster => raster::load(input)?,
            SourceKind::Svg => {
                let rasterizer = self.svg.ok_or(ConvertError::RasterizationUnavailable)?;
                rasterizer.rasterize(input, scale)?
            }
        };
        let pixels = normalize(img);
        tracing::debug!(
            input = %input.display(),
            channels = pixels.channels(),
            "encoding webp"
        );
        let bytes = encode_webp(&pixels, quality)?;
        drop(pixels);
        write_output(output, &bytes)
    }
}

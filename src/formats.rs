//! Recognised input formats and the startup capability probe

use std::path::Path;

use crate::encode::svg::SvgRasterizer;

/// Raster extensions decoded by the `image` crate
pub const RASTER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "tif", "ico"];

pub const SVG_EXTENSION: &str = "svg";

/// How a supported source file gets turned into pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Raster,
    Svg,
}

/// Read-only set of extensions accepted for conversion.
///
/// SVG membership depends on whether the rasterizer was available when
/// [`Capabilities::probe`] ran; the registry never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRegistry {
    svg: bool,
}

impl FormatRegistry {
    pub fn new(svg: bool) -> Self {
        Self { svg }
    }

    pub fn svg_enabled(&self) -> bool {
        self.svg
    }

    /// Case-insensitive; a leading dot is accepted (`".PNG"` and `"png"` both match).
    pub fn is_supported(&self, extension: &str) -> bool {
        self.kind_of(extension).is_some()
    }

    pub fn kind_of(&self, extension: &str) -> Option<SourceKind> {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        if RASTER_EXTENSIONS.contains(&ext.as_str()) {
            Some(SourceKind::Raster)
        } else if self.svg && ext == SVG_EXTENSION {
            Some(SourceKind::Svg)
        } else {
            None
        }
    }

    pub fn kind_of_path(&self, path: &Path) -> Option<SourceKind> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| self.kind_of(e))
    }

    /// Sorted, dotted extension list for user-facing messages
    pub fn extensions(&self) -> Vec<String> {
        let mut exts: Vec<String> = RASTER_EXTENSIONS.iter().map(|e| format!(".{e}")).collect();
        if self.svg {
            exts.push(format!(".{SVG_EXTENSION}"));
        }
        exts.sort();
        exts
    }
}

/// Optional collaborators resolved once at process start
pub struct Capabilities {
    svg: Option<SvgRasterizer>,
}

impl Capabilities {
    /// Probe the SVG rasterizer unless `enable_svg` is false.
    ///
    /// Failure is not fatal: it is reported once and narrows the registry.
    pub fn probe(enable_svg: bool) -> Self {
        if !enable_svg {
            tracing::warn!("SVG conversion disabled by --no-svg");
            return Self::without_svg();
        }
        match SvgRasterizer::probe() {
            Ok(rasterizer) => Self {
                svg: Some(rasterizer),
            },
            Err(e) => {
                tracing::warn!("{e}; SVG conversion disabled");
                Self::without_svg()
            }
        }
    }

    pub fn without_svg() -> Self {
        Self { svg: None }
    }

    pub fn registry(&self) -> FormatRegistry {
        FormatRegistry::new(self.svg.is_some())
    }

    pub fn svg(&self) -> Option<&SvgRasterizer> {
        self.svg.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_extensions_case_insensitive() {
        let registry = FormatRegistry::new(false);
        for ext in ["png", "PNG", ".Jpg", "jpeg", "GIF", "bmp", "tiff", ".TIF", "ico"] {
            assert!(registry.is_supported(ext), "{ext} should be supported");
        }
        assert!(!registry.is_supported("txt"));
        assert!(!registry.is_supported("webp"));
        assert!(!registry.is_supported(""));
    }

    #[test]
    fn test_svg_follows_capability() {
        assert!(!FormatRegistry::new(false).is_supported("svg"));
        assert!(FormatRegistry::new(true).is_supported("SVG"));
        assert_eq!(
            FormatRegistry::new(true).kind_of_path(Path::new("logo.svg")),
            Some(SourceKind::Svg)
        );
    }

    #[test]
    fn test_extensions_listing() {
        let exts = FormatRegistry::new(false).extensions();
        assert_eq!(exts.first().map(String::as_str), Some(".bmp"));
        assert!(!exts.contains(&".svg".to_string()));
        assert!(FormatRegistry::new(true).extensions().contains(&".svg".to_string()));
    }

    #[test]
    fn test_without_svg_registry() {
        let caps = Capabilities::without_svg();
        assert!(caps.svg().is_none());
        assert!(!caps.registry().svg_enabled());
    }
}

//! Batch driver: discovery, per-file policy and the run summary

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use filetime::FileTime;
use indicatif::{ProgressBar, ProgressStyle};

use crate::encode::Converter;
use crate::error::ConvertError;
use crate::formats::{Capabilities, FormatRegistry};
use crate::output::resolve_output_path;
use crate::report::{
    GLYPH_ALREADY, GLYPH_CONVERTED, GLYPH_FAILED, GLYPH_SKIPPED, rule, size_annotation,
    summary_line,
};
use crate::walk::find_images;

/// Settings for one run, built once from the command line
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// File or directory to convert
    pub input: PathBuf,
    /// Where outputs go; `None` writes each WebP next to its source
    pub output_dir: Option<PathBuf>,
    /// WebP quality, accepted range 1-100
    pub quality: i64,
    /// SVG scale factor
    pub scale: f32,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Mirror the input tree under `output_dir`
    pub keep_structure: bool,
    /// Remove each source after a successful conversion
    pub delete_on_success: bool,
    /// Zero-argument invocation with fixed input/output folders
    pub default_mode: bool,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl ConversionRequest {
    /// Pre-flight checks; returns the quality narrowed to `u8`
    pub fn validate(&self) -> Result<u8, ConvertError> {
        if !self.input.exists() {
            return Err(if self.default_mode {
                ConvertError::MissingDefaultInput(self.input.clone())
            } else {
                ConvertError::InvalidInput(self.input.clone())
            });
        }
        if !(1..=100).contains(&self.quality) {
            return Err(ConvertError::InvalidQuality(self.quality));
        }
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(ConvertError::InvalidScale(self.scale));
        }
        u8::try_from(self.quality).map_err(|_| ConvertError::InvalidQuality(self.quality))
    }

    /// Root that relative output paths are computed against
    pub fn base_input(&self) -> PathBuf {
        if self.input.is_dir() {
            self.input.clone()
        } else {
            self.input.parent().unwrap_or(Path::new("")).to_path_buf()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRemoval {
    /// Deletion was not requested
    Kept,
    Removed,
    /// Deletion was requested and failed; the conversion still counts
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Converted { removal: SourceRemoval },
    AlreadyConverted,
    SkippedUnsupported,
    Failed,
}

/// What happened to one input file
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub source: PathBuf,
    pub outcome: Outcome,
    /// One-line report, already formatted
    pub message: String,
    pub original_size: u64,
    pub new_size: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Includes files that were already up to date
    pub converted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub removed: usize,
}

impl BatchSummary {
    pub fn record(&mut self, result: &ConversionResult) {
        match &result.outcome {
            Outcome::Converted { removal } => {
                self.converted += 1;
                if *removal == SourceRemoval::Removed {
                    self.removed += 1;
                }
            }
            Outcome::AlreadyConverted => self.converted += 1,
            Outcome::SkippedUnsupported => self.skipped += 1,
            Outcome::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.converted + self.failed + self.skipped
    }
}

/// Validated, run-wide state shared by every file
pub struct BatchContext<'a> {
    pub registry: FormatRegistry,
    converter: Converter<'a>,
    request: &'a ConversionRequest,
    quality: u8,
    base_input: PathBuf,
}

impl<'a> BatchContext<'a> {
    pub fn new(request: &'a ConversionRequest, caps: &'a Capabilities) -> Result<Self, ConvertError> {
        let quality = request.validate()?;
        Ok(Self {
            registry: caps.registry(),
            converter: Converter::new(caps.svg()),
            request,
            quality,
            base_input: request.base_input(),
        })
    }

    /// Convert one file. Errors are folded into the returned result.
    pub fn process_file(&self, path: &Path) -> ConversionResult {
        let name = display_name(path);

        let Some(kind) = self.registry.kind_of_path(path) else {
            tracing::debug!(path = %path.display(), "unsupported extension");
            return ConversionResult {
                source: path.to_path_buf(),
                outcome: Outcome::SkippedUnsupported,
                message: format!("  {GLYPH_SKIPPED} Skipped (unsupported): {name}"),
                original_size: 0,
                new_size: None,
            };
        };

        let output = match resolve_output_path(
            path,
            self.request.output_dir.as_deref(),
            self.request.keep_structure,
            Some(&self.base_input),
        ) {
            Ok(output) => output,
            Err(e) => return failed(path, &name, e),
        };

        match is_up_to_date(path, &output) {
            Ok(true) => {
                return ConversionResult {
                    source: path.to_path_buf(),
                    outcome: Outcome::AlreadyConverted,
                    message: format!("  {GLYPH_ALREADY} Already converted: {name}"),
                    original_size: 0,
                    new_size: None,
                };
            }
            Ok(false) => {}
            Err(e) => return failed(path, &name, e.into()),
        }

        let original_size = match fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) => return failed(path, &name, e.into()),
        };

        tracing::debug!(
            input = %path.display(),
            output = %output.display(),
            ?kind,
            "converting"
        );
        let new_size = match self.converter.convert(
            path,
            &output,
            kind,
            self.quality,
            self.request.scale,
        ) {
            Ok(written) => written,
            Err(e) => return failed(path, &name, e),
        };

        let removal = if self.request.delete_on_success {
            remove_source(path)
        } else {
            SourceRemoval::Kept
        };
        converted(path, &output, original_size, new_size, removal)
    }
}

/// Delete a converted source; failure is reported, not propagated
fn remove_source(path: &Path) -> SourceRemoval {
    match fs::remove_file(path) {
        Ok(()) => SourceRemoval::Removed,
        Err(e) => {
            let err = ConvertError::Deletion(e);
            tracing::warn!(path = %path.display(), "could not remove source: {err}");
            SourceRemoval::Failed(err.to_string())
        }
    }
}

fn converted(
    path: &Path,
    output: &Path,
    original_size: u64,
    new_size: u64,
    removal: SourceRemoval,
) -> ConversionResult {
    let name = display_name(path);
    let out_name = display_name(output);
    let size_info = size_annotation(original_size, new_size);
    let message = match &removal {
        SourceRemoval::Kept => {
            format!("  {GLYPH_CONVERTED} Converted: {name} → {out_name} {size_info}")
        }
        SourceRemoval::Removed => {
            format!("  {GLYPH_CONVERTED} Converted & removed: {name} → {out_name} {size_info}")
        }
        SourceRemoval::Failed(err) => format!(
            "  {GLYPH_CONVERTED} Converted: {name} → {out_name} {size_info} (could not delete: {err})"
        ),
    };
    ConversionResult {
        source: path.to_path_buf(),
        outcome: Outcome::Converted { removal },
        message,
        original_size,
        new_size: Some(new_size),
    }
}

fn failed(path: &Path, name: &str, err: ConvertError) -> ConversionResult {
    tracing::debug!(path = %path.display(), "conversion failed: {err}");
    let message = match err {
        ConvertError::RasterizationUnavailable => {
            format!("  {GLYPH_FAILED} SVG support not available: {name}")
        }
        other => format!("  {GLYPH_FAILED} Failed to convert {name}: {other}"),
    };
    ConversionResult {
        source: path.to_path_buf(),
        outcome: Outcome::Failed,
        message,
        original_size: 0,
        new_size: None,
    }
}

/// An existing output strictly newer than its source counts as done
fn is_up_to_date(input: &Path, output: &Path) -> std::io::Result<bool> {
    let out_meta = match fs::metadata(output) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    let in_meta = fs::metadata(input)?;
    Ok(FileTime::from_last_modification_time(&out_meta)
        > FileTime::from_last_modification_time(&in_meta))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Run a whole batch and print the console report.
///
/// Only pre-flight problems (missing input, bad quality or scale) return an
/// error; per-file failures are reported and tallied.
pub fn run(request: &ConversionRequest, caps: &Capabilities) -> anyhow::Result<BatchSummary> {
    if request.default_mode {
        println!("🔄 Running in default mode");
        println!("   Input:  {}", request.input.display());
        if let Some(out) = &request.output_dir {
            println!("   Output: {}", out.display());
        }
        if request.delete_on_success {
            println!("   ⚠️  Source files will be deleted after successful conversion");
        }
        println!();
    }

    let ctx = BatchContext::new(request, caps)?;

    if let Some(dir) = &request.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    }

    let images = find_images(&request.input, request.recursive, &ctx.registry);
    if images.is_empty() {
        println!("No supported images found.");
        println!("Supported formats: {}", ctx.registry.extensions().join(", "));
        if request.default_mode {
            println!("\nPlace images in: {}", request.input.display());
        }
        return Ok(BatchSummary::default());
    }

    println!("Found {} image(s) to convert", images.len());
    println!("Quality: {}%", request.quality);
    if request.scale != 1.0 {
        println!("SVG Scale: {}x", request.scale);
    }
    println!("{}", rule());
    tracing::info!(
        count = images.len(),
        quality = request.quality,
        scale = request.scale,
        recursive = request.recursive,
        keep_structure = request.keep_structure,
        delete_on_success = request.delete_on_success,
        "starting batch"
    );

    let pb = if request.show_progress {
        let pb = ProgressBar::new(images.len() as u64);
        pb.set_style(ProgressStyle::with_template("{bar:30} {pos}/{len} {wide_msg}")?);
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut summary = BatchSummary::default();
    for image in &images {
        pb.set_message(display_name(image));
        let result = ctx.process_file(image);
        pb.suspend(|| println!("{}", result.message));
        summary.record(&result);
        pb.inc(1);
    }
    pb.finish_and_clear();
    tracing::info!(
        total = summary.total(),
        converted = summary.converted,
        failed = summary.failed,
        skipped = summary.skipped,
        removed = summary.removed,
        "batch finished"
    );

    println!("{}", rule());
    println!("{}", summary_line(summary.converted, summary.failed, summary.skipped));
    if request.default_mode && summary.failed > 0 {
        println!(
            "\n⚠️  {} file(s) remain in input folder (conversion failed)",
            summary.failed
        );
    }

    Ok(summary)
}

//! Error types shared by the conversion pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Input path does not exist: {}", .0.display())]
    InvalidInput(PathBuf),

    #[error(
        "Input path does not exist: {}\n       Create the input directory and add images to convert.",
        .0.display()
    )]
    MissingDefaultInput(PathBuf),

    #[error("Quality must be between 1 and 100 (got {0})")]
    InvalidQuality(i64),

    #[error("SVG scale must be a finite number >= 0 (got {0})")]
    InvalidScale(f32),

    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("encode failed: {0}")]
    Encode(String),

    #[error("rasterization failed: {0}")]
    Rasterization(String),

    #[error("SVG support not available")]
    RasterizationUnavailable,

    #[error("{} is not under base input {}", .path.display(), .base.display())]
    OutputPath { path: PathBuf, base: PathBuf },

    #[error("{0}")]
    Deletion(std::io::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

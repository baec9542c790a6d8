//! webpconv - Batch-convert raster images and SVGs into WebP
//!
//! This library walks an input file or directory, converts every supported
//! image to WebP and reports per-file outcomes plus a run summary.
//!
//! # Features
//!
//! - **Raster**: PNG, JPEG, GIF, BMP, TIFF, ICO via the `image` crate
//! - **SVG**: rasterized with `resvg` at a configurable scale (cargo feature `svg`)
//! - **Output layout**: beside the source, flattened into a directory, or
//!   mirroring the input tree
//! - **Idempotent reruns**: outputs newer than their source are left alone
//! - **Default mode**: fixed `input/` and `output/` folders with source
//!   removal after success
//!
//! # Example
//!
//! ```rust,no_run
//! use webpconv::{run, Capabilities, ConversionRequest};
//!
//! let request = ConversionRequest {
//!     input: "images".into(),
//!     output_dir: Some("webp".into()),
//!     quality: 80,
//!     scale: 1.0,
//!     recursive: true,
//!     keep_structure: true,
//!     delete_on_success: false,
//!     default_mode: false,
//!     show_progress: false,
//! };
//!
//! let caps = Capabilities::probe(true);
//! let summary = run(&request, &caps)?;
//! println!("{} converted", summary.converted);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod batch;
pub mod cli;
pub mod encode;
pub mod error;
pub mod formats;
pub mod output;
pub mod report;
pub mod walk;

// Re-export main types for convenience
pub use batch::{BatchContext, BatchSummary, ConversionRequest, ConversionResult, Outcome, run};
pub use error::ConvertError;
pub use formats::{Capabilities, FormatRegistry};
pub use output::resolve_output_path;
pub use walk::find_images;

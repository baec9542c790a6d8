//! Destination path policy

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

/// Compute where the WebP for `input` goes and make sure its parent exists.
///
/// - no `output_dir`: next to the input, extension swapped for `.webp`
/// - `output_dir` without `keep_structure`: `output_dir/<stem>.webp`
/// - `output_dir` with `keep_structure` and a `base`: the input's directory
///   relative to `base` is mirrored under `output_dir`
///
/// `base` must be an ancestor of `input` when `keep_structure` is set.
/// Without a `base` the output is flattened.
pub fn resolve_output_path(
    input: &Path,
    output_dir: Option<&Path>,
    keep_structure: bool,
    base: Option<&Path>,
) -> Result<PathBuf> {
    let Some(output_dir) = output_dir else {
        return Ok(input.with_extension("webp"));
    };

    let target_dir = match base {
        Some(base) if keep_structure => {
            let parent = input.parent().unwrap_or(Path::new(""));
            let relative = parent
                .strip_prefix(base)
                .map_err(|_| ConvertError::OutputPath {
                    path: input.to_path_buf(),
                    base: base.to_path_buf(),
                })?;
            output_dir.join(relative)
        }
        _ => output_dir.to_path_buf(),
    };
    fs::create_dir_all(&target_dir)?;

    let mut name: OsString = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".webp");
    Ok(target_dir.join(name))
}

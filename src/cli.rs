use clap::Parser;
use std::path::PathBuf;

use crate::batch::ConversionRequest;

/// Base directory for default mode; falls back to the working directory
pub const HOME_ENV: &str = "WEBPCONV_HOME";

const AFTER_HELP: &str = "\
Examples:
  webpconv                          Convert from ./input to ./output (auto-delete on success)
  webpconv image.png                Convert single image
  webpconv logo.svg                 Convert SVG file
  webpconv ./images/                Convert all images in directory
  webpconv ./images/ -r             Convert recursively
  webpconv ./images/ -o ./webp/     Output to specific directory
  webpconv ./images/ -q 90          Set quality to 90%
  webpconv logo.svg --scale 2       Convert SVG at 2x resolution

Default mode (no input argument):
  - Reads from <WEBPCONV_HOME or .>/input
  - Outputs to <WEBPCONV_HOME or .>/output
  - Successfully converted images are removed from the input folder
  - Images remaining in the input folder are failed conversions";

#[derive(Parser, Debug)]
#[command(
    name = "webpconv",
    about = "Convert images and SVGs to WebP format",
    version,
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Input file or directory (default: ./input)
    pub input: Option<PathBuf>,
    /// Output directory (default: same as input, or ./output in default mode)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// WebP quality 1-100
    #[arg(short = 'q', long = "quality", default_value_t = 80, allow_negative_numbers = true)]
    pub quality: i64,
    /// Process directories recursively
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,
    /// Scale factor for SVG conversion
    #[arg(short = 's', long = "scale", default_value_t = 1.0)]
    pub scale: f32,
    /// Maintain directory structure in output
    #[arg(long = "keep-structure")]
    pub keep_structure: bool,
    /// Do not delete source files after successful conversion (default mode only)
    #[arg(long = "no-delete")]
    pub no_delete: bool,
    /// Disable SVG rasterization
    #[arg(long = "no-svg")]
    pub no_svg: bool,
    /// Hide the progress bar
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

impl Cli {
    /// Resolve default mode and build the run settings
    pub fn into_request(self) -> ConversionRequest {
        let default_mode = self.input.is_none();
        let (input, output_dir, delete_on_success) = match self.input {
            Some(input) => (input, self.output, false),
            None => {
                let base = std::env::var_os(HOME_ENV)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("."));
                let output = self.output.unwrap_or_else(|| base.join("output"));
                (base.join("input"), Some(output), !self.no_delete)
            }
        };

        ConversionRequest {
            input,
            output_dir,
            quality: self.quality,
            scale: self.scale,
            recursive: self.recursive,
            keep_structure: self.keep_structure,
            delete_on_success,
            default_mode,
            show_progress: !self.no_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["webpconv", "pics"]).unwrap();
        assert_eq!(cli.quality, 80);
        assert_eq!(cli.scale, 1.0);
        assert!(!cli.recursive && !cli.keep_structure && !cli.no_delete);

        let req = cli.into_request();
        assert!(!req.default_mode);
        assert!(!req.delete_on_success);
        assert_eq!(req.input, PathBuf::from("pics"));
        assert!(req.output_dir.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "webpconv", "pics", "-o", "out", "-q", "90", "-r", "-s", "2.5", "--keep-structure",
        ])
        .unwrap();
        let req = cli.into_request();
        assert_eq!(req.output_dir, Some(PathBuf::from("out")));
        assert_eq!(req.quality, 90);
        assert_eq!(req.scale, 2.5);
        assert!(req.recursive && req.keep_structure);
    }

    #[test]
    fn test_out_of_range_quality_still_parses() {
        let cli = Cli::try_parse_from(["webpconv", "pics", "-q", "-5"]).unwrap();
        assert_eq!(cli.quality, -5);
        let cli = Cli::try_parse_from(["webpconv", "pics", "--quality", "101"]).unwrap();
        assert_eq!(cli.quality, 101);
    }

    #[test]
    fn test_explicit_input_ignores_no_delete() {
        let cli = Cli::try_parse_from(["webpconv", "pics", "--no-delete"]).unwrap();
        assert!(!cli.into_request().delete_on_success);
    }

    #[test]
    fn test_default_mode_output_override() {
        let cli = Cli::try_parse_from(["webpconv", "-o", "elsewhere", "--no-delete"]).unwrap();
        let req = cli.into_request();
        assert!(req.default_mode);
        assert!(!req.delete_on_success);
        assert_eq!(req.output_dir, Some(PathBuf::from("elsewhere")));
        assert!(req.input.ends_with("input"));
    }
}

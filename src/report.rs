//! Console report formatting

pub const RULE_WIDTH: usize = 50;

pub const GLYPH_CONVERTED: &str = "✓";
pub const GLYPH_ALREADY: &str = "○";
pub const GLYPH_SKIPPED: &str = "⊘";
pub const GLYPH_FAILED: &str = "✗";

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-scaled size with one decimal, dividing by 1024 per unit step
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.1}{unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1}TB")
}

/// Percentage saved going from `original` to `new`; 0 for an empty original
pub fn size_reduction_percent(original: u64, new: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - new as f64) / original as f64 * 100.0
}

/// `(97.7KB → 10.2KB, +89.6%)`
pub fn size_annotation(original: u64, new: u64) -> String {
    format!(
        "({} → {}, {:+.1}%)",
        format_size(original),
        format_size(new),
        size_reduction_percent(original, new)
    )
}

pub fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn summary_line(converted: usize, failed: usize, skipped: usize) -> String {
    let mut line = format!("Done! Converted: {converted}, Failed: {failed}");
    if skipped > 0 {
        line.push_str(&format!(", Skipped: {skipped}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(0), "0.0B");
        assert_eq!(format_size(512), "512.0B");
        assert_eq!(format_size(1024), "1.0KB");
        assert_eq!(format_size(100_000), "97.7KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0GB");
        assert_eq!(format_size(2 * 1024u64.pow(4)), "2.0TB");
        assert_eq!(format_size(2048 * 1024u64.pow(4)), "2048.0TB");
    }

    #[test]
    fn test_reduction_of_empty_original_is_zero() {
        assert_eq!(size_reduction_percent(0, 0), 0.0);
        assert_eq!(size_reduction_percent(0, 1234), 0.0);
    }

    #[test]
    fn test_reduction_sign() {
        assert_eq!(size_reduction_percent(200, 50), 75.0);
        assert_eq!(size_reduction_percent(100, 150), -50.0);
        assert_eq!(size_annotation(200, 50), "(200.0B → 50.0B, +75.0%)");
        assert_eq!(size_annotation(100, 150), "(100.0B → 150.0B, -50.0%)");
        assert_eq!(size_annotation(0, 10), "(0.0B → 10.0B, +0.0%)");
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(summary_line(1, 0, 0), "Done! Converted: 1, Failed: 0");
        assert_eq!(summary_line(3, 1, 2), "Done! Converted: 3, Failed: 1, Skipped: 2");
        assert_eq!(rule().len(), 50);
    }
}

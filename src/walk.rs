//! Input discovery

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::formats::FormatRegistry;

/// Find every supported image under `root`.
///
/// A file root yields itself if its extension is supported. A directory
/// root is scanned one level deep, or fully when `recursive` is set.
/// Extension matching is case-insensitive; the result is deduplicated and
/// sorted by path.
pub fn find_images(root: &Path, recursive: bool, registry: &FormatRegistry) -> Vec<PathBuf> {
    if root.is_file() {
        return if registry.kind_of_path(root).is_some() {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        };
    }

    let walker = if recursive {
        WalkDir::new(root).min_depth(1).follow_links(true)
    } else {
        WalkDir::new(root).min_depth(1).max_depth(1)
    };

    let images: BTreeSet<PathBuf> = walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|e| e.path().is_file())
        .filter(|e| registry.kind_of_path(e.path()).is_some())
        .map(|e| e.into_path())
        .collect();

    images.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_top_level_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.png"));
        touch(&dir.path().join("a.JPG"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("sub/c.gif"));

        let found = find_images(dir.path(), false, &FormatRegistry::new(false));
        assert_eq!(
            found,
            vec![dir.path().join("a.JPG"), dir.path().join("b.png")]
        );
    }

    #[test]
    fn test_recursive_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("z.bmp"));
        touch(&dir.path().join("sub/deeper/c.Tif"));
        touch(&dir.path().join("sub/a.ico"));
        touch(&dir.path().join("sub/readme.md"));

        let found = find_images(dir.path(), true, &FormatRegistry::new(false));
        assert_eq!(
            found,
            vec![
                dir.path().join("sub/a.ico"),
                dir.path().join("sub/deeper/c.Tif"),
                dir.path().join("z.bmp"),
            ]
        );
    }

    #[test]
    fn test_svg_needs_capability() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("logo.svg"));

        assert!(find_images(dir.path(), false, &FormatRegistry::new(false)).is_empty());
        assert_eq!(find_images(dir.path(), false, &FormatRegistry::new(true)).len(), 1);
    }

    #[test]
    fn test_single_file_root() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("one.PNG");
        let txt = dir.path().join("one.txt");
        touch(&png);
        touch(&txt);

        let registry = FormatRegistry::new(false);
        assert_eq!(find_images(&png, false, &registry), vec![png.clone()]);
        assert!(find_images(&txt, true, &registry).is_empty());
    }

    #[test]
    fn test_directory_named_like_image_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("folder.png")).unwrap();

        assert!(find_images(dir.path(), false, &FormatRegistry::new(false)).is_empty());
    }
}

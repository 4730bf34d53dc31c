// SPDX-License-Identifier: MIT OR Apache-2.0
//! Input collection: expand directories into texture files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions treated as textures when walking a directory
pub const TEXTURE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "tga", "tif", "tiff", "exr", "hdr", "bmp", "webp", "dds",
];

/// Whether a path carries a texture extension (case-insensitive)
pub fn is_texture(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TEXTURE_EXTENSIONS.iter().any(|t| ext.eq_ignore_ascii_case(t)))
}

/// Expand inputs into a de-duplicated list of texture files.
///
/// Inputs keep the order they were given in, since the last texture for a
/// material input wins. Files named explicitly are kept whatever their
/// extension. Directories are walked recursively, keeping texture files in
/// path order. A file reached twice keeps its first position. Unreadable
/// entries are logged and skipped.
pub fn collect_textures(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            if seen.insert(input.clone()) {
                files.push(input.clone());
            }
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(input).follow_links(true) {
            match entry {
                Ok(entry) if entry.file_type().is_file() && is_texture(entry.path()) => {
                    found.push(entry.into_path());
                }
                Ok(_) => {}
                Err(err) => tracing::warn!("skipping unreadable entry: {err}"),
            }
        }
        found.sort();
        tracing::debug!(dir = %input.display(), found = found.len(), "scanned directory");

        files.extend(found.into_iter().filter(|path| seen.insert(path.clone())));
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn recognizes_texture_extensions() {
        assert!(is_texture(Path::new("rock_albedo.png")));
        assert!(is_texture(Path::new("dir/Rock_Height.EXR")));
        assert!(!is_texture(Path::new("notes.txt")));
        assert!(!is_texture(Path::new("png")));
    }

    #[test]
    fn walks_directories_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("rock").join("2k");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("rock_albedo.png"), b"").unwrap();
        fs::write(nested.join("rock_normal.tif"), b"").unwrap();
        fs::write(nested.join("readme.md"), b"").unwrap();

        let files = collect_textures(&[dir.path().to_path_buf()]);

        assert_eq!(
            files,
            [dir.path().join("rock").join("2k").join("rock_normal.tif"), dir.path().join("rock_albedo.png")]
        );
    }

    #[test]
    fn explicit_files_keep_caller_order() {
        let files = collect_textures(&[PathBuf::from("rock_diffuse.png"), PathBuf::from("rock_albedo.png")]);
        assert_eq!(files, [PathBuf::from("rock_diffuse.png"), PathBuf::from("rock_albedo.png")]);
    }

    #[test]
    fn directory_contents_follow_the_files_named_before_it() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_normal.png"), b"").unwrap();
        fs::write(dir.path().join("a_albedo.png"), b"").unwrap();

        let files = collect_textures(&[PathBuf::from("z_albedo.png"), dir.path().to_path_buf()]);

        assert_eq!(
            files,
            [
                PathBuf::from("z_albedo.png"),
                dir.path().join("a_albedo.png"),
                dir.path().join("b_normal.png"),
            ]
        );
    }

    #[test]
    fn explicit_files_are_kept_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let texture = dir.path().join("rock_ao.png");
        fs::write(&texture, b"").unwrap();

        let files = collect_textures(&[
            texture.clone(),
            dir.path().to_path_buf(),
            PathBuf::from("missing_roughness.jpg"),
        ]);

        assert_eq!(files, [texture, PathBuf::from("missing_roughness.jpg")]);
    }
}

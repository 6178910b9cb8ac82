use crate::constants::SUPPORTED_IMAGE_EXTENSIONS;
use crate::error::{CompressionError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collects image files under `root`, in traversal order.
///
/// Unreadable entries are reported and skipped; the walk itself never fails
/// once the root has been confirmed to be a directory.
pub fn find_images(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(CompressionError::DirectoryNotFound(root.to_path_buf()));
    }

    let mut image_files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                crate::warn!("Skipping unreadable entry: {}", CompressionError::Walk(e));
                continue;
            }
        };

        let path = entry.path();
        // is_file() follows symlinks, so linked images are included
        if path.is_file() && is_image_file(path) {
            image_files.push(path.to_path_buf());
        }
    }

    Ok(image_files)
}

/// Matches on the lowercased file name suffix rather than `Path::extension`,
/// so a bare `.jpg` file name still counts.
pub fn is_image_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            let name = name.to_string_lossy().to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS
                .iter()
                .any(|ext| name.ends_with(ext))
        })
        .unwrap_or(false)
}

/// Maps `input` (somewhere under `root`) to the same relative location under
/// `output_dir`.
pub fn mirror_output_path(input: &Path, root: &Path, output_dir: &Path) -> PathBuf {
    match input.strip_prefix(root) {
        Ok(relative) => output_dir.join(relative),
        Err(_) => output_dir.join(input.file_name().unwrap_or(input.as_os_str())),
    }
}

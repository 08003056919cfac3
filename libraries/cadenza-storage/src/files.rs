//! Picture file storage.
//!
//! Uploaded images are copied into a per-entity directory under the
//! platform pictures folder and named by sequential index:
//!
//! ```text
//! {pictures}/cadenza/ProfilePictures/Listener_{id}/ProfilePicture_{n}.{ext}
//! {pictures}/cadenza/PlaylistCovers/PlaylistCover_{n}.{ext}
//! ```

use crate::error::{Result, StorageError};
use std::fs;
use std::path::{Path, PathBuf};

/// Root directory for stored images: `{pictures}/cadenza`.
///
/// `None` when the platform exposes no pictures folder (headless
/// environments); callers fall back to a configured directory.
pub fn pictures_root() -> Option<PathBuf> {
    dirs::picture_dir().map(|dir| dir.join("cadenza"))
}

/// Copy a listener's uploaded profile picture into place and return the
/// stored path. The source file is left untouched.
pub fn save_profile_picture(root: &Path, source: &Path, listener_id: i64) -> Result<PathBuf> {
    let dir = root
        .join("ProfilePictures")
        .join(format!("Listener_{listener_id}"));
    copy_indexed(&dir, source, "ProfilePicture")
}

/// Copy an uploaded playlist cover into place and return the stored path.
pub fn save_playlist_cover(root: &Path, source: &Path) -> Result<PathBuf> {
    let dir = root.join("PlaylistCovers");
    copy_indexed(&dir, source, "PlaylistCover")
}

fn copy_indexed(dir: &Path, source: &Path, prefix: &str) -> Result<PathBuf> {
    if !source.is_file() {
        return Err(StorageError::not_found("Image", source.display()));
    }

    fs::create_dir_all(dir)?;

    let index = fs::read_dir(dir)?.count();
    let extension = source
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("png");

    let destination = dir.join(format!("{prefix}_{index}.{extension}"));
    fs::copy(source, &destination)?;

    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_pictures_get_sequential_names() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("upload.jpg");
        fs::write(&source, b"jpeg-bytes").unwrap();

        let root = temp.path().join("root");
        let first = save_profile_picture(&root, &source, 7).unwrap();
        let second = save_profile_picture(&root, &source, 7).unwrap();

        assert!(first.ends_with("Listener_7/ProfilePicture_0.jpg"));
        assert!(second.ends_with("Listener_7/ProfilePicture_1.jpg"));
        assert_eq!(fs::read(&second).unwrap(), b"jpeg-bytes");
    }

    #[test]
    fn covers_live_in_a_shared_directory() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("cover.png");
        fs::write(&source, b"png-bytes").unwrap();

        let root = temp.path().join("root");
        let stored = save_playlist_cover(&root, &source).unwrap();
        assert!(stored.ends_with("PlaylistCovers/PlaylistCover_0.png"));
    }

    #[test]
    fn missing_source_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let result = save_playlist_cover(temp.path(), &temp.path().join("absent.png"));
        assert!(result.is_err());
    }
}

//! Avatar image: placeholder until the user picks a picture.
//!
//! Loading performs file I/O and decoding; callers run it off the UI thread
//! (see `app::avatar_runtime`).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

/// Decoded avatars are shrunk to fit this square.
const MAX_AVATAR_PX: u32 = 256;

#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not an image ({mime})", path.display())]
    NotAnImage { path: PathBuf, mime: String },
    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Clone, Default)]
pub enum Avatar {
    #[default]
    Placeholder,
    Loaded {
        path: PathBuf,
        image: Arc<image::RgbaImage>,
    },
}

impl Avatar {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// Only the placeholder opens the picker when activated.
    pub fn wants_upload(&self) -> bool {
        self.is_placeholder()
    }

    /// File the picture was loaded from.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Placeholder => None,
            Self::Loaded { path, .. } => Some(path),
        }
    }

    pub fn image(&self) -> Option<&Arc<image::RgbaImage>> {
        match self {
            Self::Placeholder => None,
            Self::Loaded { image, .. } => Some(image),
        }
    }
}

/// Read, type-check and decode an avatar picture.
pub fn load_avatar(path: &Path) -> Result<Avatar, AvatarError> {
    std::fs::metadata(path).map_err(|source| AvatarError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mime = tree_magic_mini::from_filepath(path).unwrap_or("application/octet-stream");
    if !mime.starts_with("image/") {
        return Err(AvatarError::NotAnImage {
            path: path.to_path_buf(),
            mime: mime.to_string(),
        });
    }

    let decoded = image::open(path).map_err(|source| AvatarError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.thumbnail(MAX_AVATAR_PX, MAX_AVATAR_PX).to_rgba8();
    tracing::debug!(
        path = %path.display(),
        mime,
        w = rgba.width(),
        h = rgba.height(),
        "avatar decoded"
    );

    Ok(Avatar::Loaded {
        path: path.to_path_buf(),
        image: Arc::new(rgba),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_png_and_shrinks_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("me.png");
        image::RgbaImage::from_pixel(512, 300, image::Rgba([255, 107, 157, 255]))
            .save(&path)
            .unwrap();

        let avatar = load_avatar(&path).unwrap();
        assert!(!avatar.wants_upload());
        let img = avatar.image().unwrap();
        assert!(img.width() <= MAX_AVATAR_PX && img.height() <= MAX_AVATAR_PX);
    }

    #[test]
    fn rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "just some text, definitely not pixels\n").unwrap();
        assert!(matches!(load_avatar(&path), Err(AvatarError::NotAnImage { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_avatar(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, AvatarError::Io { .. }));
    }

    #[test]
    fn placeholder_wants_upload() {
        assert!(Avatar::default().wants_upload());
    }
}

//! Upload validation.

use crate::domain::{accounts::records::AccountUuid, photos::PhotoStorageError};

/// Largest accepted photo.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoFormat {
    Jpeg,
    Png,
    Webp,
}

impl PhotoFormat {
    /// Match a `Content-Type` value, ignoring parameters and case.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }
}

/// A checked photo ready for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub format: PhotoFormat,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    /// Validate type and size.
    ///
    /// # Errors
    ///
    /// Returns an error for unsupported types, empty bodies, and bodies over
    /// [`MAX_PHOTO_BYTES`].
    pub fn new(content_type: &str, bytes: Vec<u8>) -> Result<Self, PhotoStorageError> {
        let format = PhotoFormat::from_content_type(content_type)
            .ok_or_else(|| PhotoStorageError::UnsupportedContentType(content_type.to_string()))?;

        if bytes.is_empty() {
            return Err(PhotoStorageError::Empty);
        }

        if bytes.len() > MAX_PHOTO_BYTES {
            return Err(PhotoStorageError::TooLarge {
                actual: bytes.len(),
                limit: MAX_PHOTO_BYTES,
            });
        }

        Ok(Self { format, bytes })
    }

    /// Fresh storage path under the account's prefix.
    #[must_use]
    pub fn path_for(&self, account: AccountUuid) -> String {
        format!(
            "profiles/{account}/{}.{}",
            uuid::Uuid::now_v7().simple(),
            self.format.extension()
        )
    }
}

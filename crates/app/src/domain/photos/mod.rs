//! Profile photos.

mod local;
mod storage;
mod upload;

pub use local::LocalPhotoStorage;
pub use storage::*;
pub use upload::{MAX_PHOTO_BYTES, PhotoFormat, PhotoUpload};

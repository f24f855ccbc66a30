//! Media Assets
//!
//! The widget tree never decodes media itself. It only keeps *references*
//! to images and videos discovered once at initialisation and hands them to
//! materials as [`Texture`] uniform values.
//!
//! - [`MediaItem`] / [`MediaKind`]: a single `{src, kind}` record
//! - [`DataSource`]: the static, ordered list of records
//! - [`TexturePool`]: round-robin access to the pooled records

pub mod pool;

pub use pool::TexturePool;

use serde::{Deserialize, Serialize};

/// Whether a media reference points at a still image or a video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// One entry of the gallery data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub src: String,
    pub kind: MediaKind,
}

impl MediaItem {
    #[must_use]
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            kind: MediaKind::Image,
        }
    }

    #[must_use]
    pub fn video(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            kind: MediaKind::Video,
        }
    }

    /// Builds an item from a raw record carrying either an image `src` or a
    /// `video` reference. The image wins when both are present.
    #[must_use]
    pub fn from_record(src: Option<&str>, video: Option<&str>) -> Option<Self> {
        match (src, video) {
            (Some(src), _) => Some(Self::image(src)),
            (None, Some(video)) => Some(Self::video(video)),
            (None, None) => None,
        }
    }

    /// The texture descriptor a material should sample for this item.
    #[must_use]
    pub fn texture(&self) -> Texture {
        Texture {
            src: self.src.clone(),
            kind: self.kind,
        }
    }
}

/// A texture reference as stored in a uniform map.
///
/// Decoding happens in the external rendering engine; this is only the
/// descriptor it resolves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Texture {
    pub src: String,
    pub kind: MediaKind,
}

/// A static, ordered list of media records. Read once, never re-polled.
pub trait DataSource {
    fn items(&self) -> Vec<MediaItem>;
}

impl DataSource for Vec<MediaItem> {
    fn items(&self) -> Vec<MediaItem> {
        self.clone()
    }
}

impl DataSource for [MediaItem] {
    fn items(&self) -> Vec<MediaItem> {
        self.to_vec()
    }
}

use std::cell::Cell;

use crate::assets::{MediaItem, Texture};

/// Round-robin pool over the media records of a gallery.
///
/// Each call to [`next_texture`](Self::next_texture) returns a different slot
/// until the pool is exhausted, then wraps to the first one.
#[derive(Debug, Default)]
pub struct TexturePool {
    items: Vec<MediaItem>,
    index: Cell<usize>,
}

impl TexturePool {
    #[must_use]
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self {
            items,
            index: Cell::new(0),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Slot the next call will return.
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.index.get()
    }

    /// Returns the texture at the rotating index and advances it.
    ///
    /// `None` only when the pool is empty.
    pub fn next_texture(&self) -> Option<Texture> {
        let index = self.index.get();
        let item = self.items.get(index)?;
        self.index.set((index + 1) % self.items.len());
        Some(item.texture())
    }
}

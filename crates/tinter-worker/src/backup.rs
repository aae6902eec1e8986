//! Caller-owned "last known good image" holder for undo.

use tinter_core::PixelBuffer;

/// Holds at most one previous image. Owned by whoever drives the worker;
/// the filter engine never sees it.
#[derive(Debug, Clone, Default)]
pub struct BackupStore {
    image: Option<PixelBuffer>,
}

impl BackupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the backup with `image`.
    pub fn set(&mut self, image: PixelBuffer) {
        self.image = Some(image);
    }

    /// Replace the backup with a copy of `image`.
    pub fn set_copy(&mut self, image: &PixelBuffer) {
        self.image = Some(image.clone());
    }

    pub fn get(&self) -> Option<&PixelBuffer> {
        self.image.as_ref()
    }

    /// Remove and return the backup.
    pub fn take(&mut self) -> Option<PixelBuffer> {
        self.image.take()
    }

    pub fn clear(&mut self) {
        self.image = None;
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_none()
    }
}

//! An editing session: a current image, the worker that filters it, and one
//! level of undo.

use tinter_core::PixelBuffer;

use crate::backup::BackupStore;
use crate::error::WorkerError;
use crate::messages::FilterRequest;
use crate::worker::FilterWorker;

/// Applies filters to a current image through a [`FilterWorker`].
///
/// Each successful filter replaces the current image and keeps the previous
/// one in a [`BackupStore`]. A failed request leaves both untouched.
pub struct FilterSession<'w> {
    worker: &'w FilterWorker,
    current: PixelBuffer,
    backup: BackupStore,
}

impl<'w> FilterSession<'w> {
    pub fn new(worker: &'w FilterWorker, image: PixelBuffer) -> Self {
        Self {
            worker,
            current: image,
            backup: BackupStore::new(),
        }
    }

    pub fn current(&self) -> &PixelBuffer {
        &self.current
    }

    pub fn backup(&self) -> &BackupStore {
        &self.backup
    }

    /// Filter the current image by name.
    pub async fn apply(&mut self, filter_name: &str) -> Result<&PixelBuffer, WorkerError> {
        let request = FilterRequest::new(self.current.clone(), filter_name);
        let filtered = self.worker.submit(request).await?.into_image()?;
        let previous = std::mem::replace(&mut self.current, filtered);
        self.backup.set(previous);
        tracing::debug!(filter = filter_name, "session image updated");
        Ok(&self.current)
    }

    /// Restore the image from before the last successful filter.
    ///
    /// Returns `false` when there is nothing to restore.
    pub fn undo(&mut self) -> bool {
        match self.backup.take() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    pub fn into_image(self) -> PixelBuffer {
        self.current
    }
}

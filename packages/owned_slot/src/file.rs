use std::fs::File;
use std::path::Path;

use crate::{OwnedSlot, ResourceKind};

/// The buffered file kind: slots of this kind own a [`File`] and close it at
/// scope exit.
///
/// [`File`] closes itself when dropped, so the kind adds no extra teardown
/// logic; what a slot adds on top is the uniform ownership surface - a
/// checkable empty state for failed opens, transfer between slots, and
/// taking the file back out for manual handling.
///
/// # Examples
///
/// ```
/// use owned_slot::FileKind;
///
/// let file = FileKind::open("does/not/exist");
/// assert!(file.is_empty(), "a failed open yields an empty slot");
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub struct FileKind;

impl ResourceKind for FileKind {
    type Handle = File;

    fn release(handle: File) {
        drop(handle);
    }
}

impl FileKind {
    /// Opens an existing file for reading, placing it in a new slot.
    ///
    /// On failure the returned slot is empty; the error itself is not
    /// retained. Callers who need the [`std::io::Error`] should open with
    /// [`File::open`] and wrap the result via [`OwnedSlot::new`].
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> OwnedSlot<Self> {
        File::open(path).map_or_else(|_| OwnedSlot::empty(), OwnedSlot::new)
    }

    /// Creates a file for writing (truncating any existing one), placing it
    /// in a new slot.
    ///
    /// On failure the returned slot is empty, as with
    /// [`open()`](Self::open).
    #[must_use]
    pub fn create(path: impl AsRef<Path>) -> OwnedSlot<Self> {
        File::create(path).map_or_else(|_| OwnedSlot::empty(), OwnedSlot::new)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn failed_open_yields_empty_slot() {
        let slot = FileKind::open("this/path/does/not/exist");
        assert!(slot.is_empty());
        // Scope exit of an empty slot closes nothing.
    }

    #[test]
    fn open_file_is_usable_through_the_slot() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("scratch.txt");

        {
            let mut slot = FileKind::create(&path);
            let file = slot.get_mut().expect("creating a file in a temp dir should succeed");
            file.write_all(b"payload").expect("failed to write to temp file");
            // The file is closed when `slot` drops.
        }

        let contents = std::fs::read(&path).expect("failed to read back temp file");
        assert_eq!(contents, b"payload");
    }

    #[test]
    fn taken_file_outlives_the_slot() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("scratch.txt");

        let mut slot = FileKind::create(&path);
        let file = slot.take().expect("creating a file in a temp dir should succeed");

        drop(slot);

        // Still open and writable after the slot is gone.
        let mut file = file;
        file.write_all(b"late").expect("failed to write to taken file");
    }

    // File slots can move across threads.
    static_assertions::assert_impl_all!(OwnedSlot<FileKind>: Send, Sync);
}

use std::fmt;
use std::mem;

use crate::ResourceKind;

/// A storage location that owns at most one resource handle and releases it
/// exactly once when the slot goes out of scope.
///
/// A slot is either *empty* or *owns a handle* of its kind `K`. When a slot
/// that still owns a handle is dropped - whether by normal fall-through,
/// early return or unwinding - the kind's [`release`](ResourceKind::release)
/// function runs with that handle. An empty slot drops without side effects.
///
/// The slot clears itself in the same step that hands the handle out, so no
/// operation sequence can make the release function observe the same handle
/// twice: transferring, taking or releasing early all leave the slot empty,
/// and a later scope exit is then a no-op.
///
/// Multiple slots declared in one scope release in reverse declaration
/// order, mirroring nested-scope teardown.
///
/// A slot belongs to one execution context; it has no internal
/// synchronization. It is [`Send`] whenever `K::Handle` is.
///
/// # Examples
///
/// ```
/// use owned_slot::FileKind;
///
/// let file = FileKind::open("Cargo.toml");
/// assert!(!file.is_empty());
/// // The file is closed when `file` goes out of scope.
/// ```
///
/// Ownership can be moved between slots; the source slot's scope exit then
/// releases nothing:
///
/// ```
/// use owned_slot::{FileKind, OwnedSlot};
///
/// let mut outer = OwnedSlot::<FileKind>::empty();
///
/// {
///     let mut inner = FileKind::open("Cargo.toml");
///     let previous = outer.transfer_from(&mut inner);
///     assert!(previous.is_none());
///     // `inner` drops here, empty, releasing nothing.
/// }
///
/// assert!(!outer.is_empty());
/// ```
pub struct OwnedSlot<K: ResourceKind> {
    value: Option<K::Handle>,
}

impl<K: ResourceKind> OwnedSlot<K> {
    /// Creates a slot that owns `handle`.
    #[must_use]
    pub const fn new(handle: K::Handle) -> Self {
        Self {
            value: Some(handle),
        }
    }

    /// Creates an empty slot.
    ///
    /// An empty slot releases nothing at scope exit. Ownership can be moved
    /// in later via [`replace()`](Self::replace),
    /// [`transfer_from()`](Self::transfer_from) or
    /// [`adopt()`](Self::adopt).
    #[must_use]
    pub const fn empty() -> Self {
        Self { value: None }
    }

    /// Whether this slot currently owns no handle.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Borrows the owned handle, if any.
    #[must_use]
    pub const fn get(&self) -> Option<&K::Handle> {
        self.value.as_ref()
    }

    /// Mutably borrows the owned handle, if any.
    #[must_use]
    pub const fn get_mut(&mut self) -> Option<&mut K::Handle> {
        self.value.as_mut()
    }

    /// Takes the handle out of the slot, suppressing the automatic release.
    ///
    /// The slot is left empty, so its scope exit becomes a no-op. The caller
    /// is from this point on manually responsible for the returned handle;
    /// [`K::release`](ResourceKind::release) can be called directly once it
    /// is no longer needed, or the handle can be placed into another slot.
    #[must_use = "the returned handle is no longer released automatically"]
    pub fn take(&mut self) -> Option<K::Handle> {
        self.value.take()
    }

    /// Releases the owned handle now instead of at scope exit.
    ///
    /// No-op on an empty slot. The slot is empty afterwards, so calling this
    /// repeatedly - or letting the scope exit afterwards - performs no
    /// further release.
    pub fn release_now(&mut self) {
        if let Some(handle) = self.value.take() {
            K::release(handle);
        }
    }

    /// Stores `handle` in the slot, returning the previously owned handle.
    ///
    /// Releases nothing: a returned handle is the caller's responsibility,
    /// exactly as with [`take()`](Self::take).
    #[must_use = "a previously owned handle is not released automatically"]
    pub fn replace(&mut self, handle: K::Handle) -> Option<K::Handle> {
        self.value.replace(handle)
    }

    /// Moves ownership from `src` into this slot, leaving `src` empty.
    ///
    /// After the transfer, `src`'s scope exit is guaranteed to be a no-op
    /// and this slot carries the release obligation. Releases nothing
    /// itself; if this slot already owned a handle, that handle is returned
    /// and becomes the caller's responsibility.
    #[must_use = "a previously owned handle is not released automatically"]
    pub fn transfer_from(&mut self, src: &mut Self) -> Option<K::Handle> {
        let incoming = src.value.take();
        mem::replace(&mut self.value, incoming)
    }

    /// Takes ownership of a handle held in an untracked variable, clearing
    /// the variable.
    ///
    /// Like [`transfer_from()`](Self::transfer_from), but the source is a
    /// plain `Option` the caller obtained outside any slot. The variable is
    /// set to `None` so the handle cannot be accidentally used or released
    /// through it afterwards.
    #[must_use = "a previously owned handle is not released automatically"]
    pub fn adopt(&mut self, raw: &mut Option<K::Handle>) -> Option<K::Handle> {
        let incoming = raw.take();
        mem::replace(&mut self.value, incoming)
    }
}

impl<K: ResourceKind> Drop for OwnedSlot<K> {
    fn drop(&mut self) {
        // Clearing before releasing is what makes repeated teardown a no-op.
        if let Some(handle) = self.value.take() {
            K::release(handle);
        }
    }
}

impl<K: ResourceKind> Default for OwnedSlot<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: ResourceKind> fmt::Debug for OwnedSlot<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // No `K::Handle: Debug` bound; we only report the ownership state.
        f.debug_struct("OwnedSlot")
            .field("is_empty", &self.is_empty())
            .finish_non_exhaustive()
    }
}

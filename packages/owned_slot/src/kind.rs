/// A category of resource that an [`OwnedSlot`](crate::OwnedSlot) can own.
///
/// A kind binds a handle type to the operation that releases it. The binding
/// is established at definition time: implementing this trait for a marker
/// type is what "registers" the kind, and a kind without an implementation
/// simply does not satisfy the `K: ResourceKind` bound, so using it is a
/// compile error rather than a deferred runtime failure.
///
/// The crate ships implementations for the well-known kinds (heap blocks via
/// [`HeapKind`](crate::HeapKind), buffered files via
/// [`FileKind`](crate::FileKind), and on Unix hosts raw descriptors via
/// `FdKind`/`SocketKind`). Applications add their own kinds by implementing
/// the trait once per resource type.
///
/// # Examples
///
/// ```
/// use owned_slot::{OwnedSlot, ResourceKind};
///
/// /// A handle into some fictional C library.
/// struct WidgetHandle(u64);
///
/// struct WidgetKind;
///
/// impl ResourceKind for WidgetKind {
///     type Handle = WidgetHandle;
///
///     fn release(handle: WidgetHandle) {
///         // Here you would call e.g. `widget_destroy(handle.0)`.
///         let _ = handle;
///     }
/// }
///
/// {
///     let _widget = OwnedSlot::<WidgetKind>::new(WidgetHandle(42));
///     // `WidgetKind::release` runs when `_widget` goes out of scope.
/// }
/// ```
pub trait ResourceKind {
    /// The raw resource handle this kind owns, e.g. a pointer, a file object
    /// or a descriptor.
    type Handle;

    /// Releases one handle of this kind.
    ///
    /// Called at most once per owned handle: the slot clears itself before
    /// any caller-visible code can run again, so a handle that has already
    /// been released (or transferred away) is never passed here a second
    /// time.
    fn release(handle: Self::Handle);
}

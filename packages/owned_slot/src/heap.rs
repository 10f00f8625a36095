use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;
use std::slice;

use crate::{OwnedSlot, ResourceKind};

/// The allocation primitives behind [`HeapKind`] slots.
///
/// This is the configuration point for embedding applications that route
/// heap blocks through something other than the process heap (an arena, an
/// instrumented allocator in tests, ...). The default is [`SystemHeap`].
///
/// All three operations communicate failure by returning `None`; none of
/// them may panic or abort on an ordinary out-of-memory condition.
pub trait BlockAllocator {
    /// Allocates a block for `layout`, or `None` if the allocator cannot
    /// satisfy the request. Zero-sized layouts are never passed in.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Resizes a previously allocated block to `new_size` bytes.
    ///
    /// On failure returns `None` and must leave the original block valid
    /// and untouched; the caller keeps using it.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `ptr` was returned by
    /// [`allocate()`](Self::allocate) or [`reallocate()`](Self::reallocate)
    /// on this same allocator with `old_layout`, and that `new_size` is
    /// non-zero and does not overflow `isize` when rounded up to
    /// `old_layout.align()`.
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>>;

    /// Returns a block to the allocator.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `ptr` was returned by
    /// [`allocate()`](Self::allocate) or [`reallocate()`](Self::reallocate)
    /// on this same allocator and that `layout` describes the block's
    /// current size and alignment.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The process heap, via [`std::alloc`]. The default [`BlockAllocator`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemHeap;

impl BlockAllocator for SystemHeap {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.size() == 0 {
            return None;
        }

        // SAFETY: Zero-sized layouts are rejected above.
        let ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(ptr)
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        // SAFETY: Forwarding our own safety requirements, which match those
        // of `std::alloc::realloc`.
        let ptr = unsafe { alloc::realloc(ptr.as_ptr(), old_layout, new_size) };
        NonNull::new(ptr)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: Forwarding our own safety requirements, which match those
        // of `std::alloc::dealloc`.
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

/// A contiguous uninitialized block of `capacity` elements of `T`, obtained
/// from a [`BlockAllocator`].
///
/// This is the handle type of [`HeapKind`]; it carries the allocator it came
/// from so the owning slot can return it to the right place. The block type
/// itself has no destructor - releasing is the slot's job, and a block
/// extracted with [`OwnedSlot::take()`] is the caller's manual
/// responsibility (it can be handed to [`ResourceKind::release`] directly or
/// placed back into a slot).
///
/// The memory is uninitialized on allocation, so element access goes through
/// [`MaybeUninit`] views.
pub struct HeapBlock<T, A: BlockAllocator = SystemHeap> {
    ptr: NonNull<T>,
    capacity: usize,
    allocator: A,
}

impl<T, A: BlockAllocator> HeapBlock<T, A> {
    /// Pointer to the first element.
    #[must_use]
    pub fn ptr(&self) -> NonNull<T> {
        self.ptr
    }

    /// Number of elements the block has room for.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The block's elements, which may or may not have been initialized yet.
    #[must_use]
    pub fn as_uninit_slice(&self) -> &[MaybeUninit<T>] {
        // SAFETY: The block was allocated for `capacity` elements of `T` and
        // stays valid for the lifetime of `self`; `MaybeUninit<T>` makes no
        // initialization claim.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr().cast::<MaybeUninit<T>>(), self.capacity) }
    }

    /// The block's elements, mutably and without initialization claims.
    ///
    /// # Examples
    ///
    /// ```
    /// use owned_slot::HeapKind;
    ///
    /// let mut slot = HeapKind::<u32>::allocate(4);
    /// let block = slot.get_mut().expect("allocation failed");
    ///
    /// for cell in block.as_uninit_slice_mut() {
    ///     cell.write(0);
    /// }
    /// ```
    #[must_use]
    pub fn as_uninit_slice_mut(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY: As in `as_uninit_slice`, plus we hold the only reference.
        unsafe {
            slice::from_raw_parts_mut(self.ptr.as_ptr().cast::<MaybeUninit<T>>(), self.capacity)
        }
    }
}

// SAFETY: The block exclusively owns its memory; moving it between threads
// moves the (possibly initialized) `T` values and the allocator with it.
unsafe impl<T: Send, A: BlockAllocator + Send> Send for HeapBlock<T, A> {}

// SAFETY: Shared access only exposes `&[MaybeUninit<T>]` reads.
unsafe impl<T: Sync, A: BlockAllocator + Sync> Sync for HeapBlock<T, A> {}

impl<T, A: BlockAllocator> fmt::Debug for HeapBlock<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapBlock")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// The generic heap block kind: slots of this kind own a [`HeapBlock`] and
/// return it to its [`BlockAllocator`] at scope exit.
///
/// # Examples
///
/// ```
/// use owned_slot::HeapKind;
///
/// let mut slot = HeapKind::<u64>::allocate(10);
/// assert!(!slot.is_empty(), "the process heap should satisfy 10 u64s");
///
/// let block = slot.get_mut().expect("checked non-empty above");
/// assert_eq!(block.capacity(), 10);
/// // The block is returned to the heap when `slot` goes out of scope.
/// ```
pub struct HeapKind<T, A: BlockAllocator = SystemHeap> {
    _kind: PhantomData<(T, A)>,
}

impl<T> HeapKind<T> {
    /// Allocates room for `count` elements of `T` from the process heap.
    ///
    /// Shorthand for [`allocate_in()`](Self::allocate_in) with
    /// [`SystemHeap`].
    #[must_use]
    pub fn allocate(count: usize) -> OwnedSlot<Self> {
        Self::allocate_in(count, SystemHeap)
    }
}

impl<T, A: BlockAllocator> HeapKind<T, A> {
    /// Allocates room for `count` elements of `T` from `allocator`, placing
    /// the block in a new slot.
    ///
    /// On failure the returned slot is empty - callers must check with
    /// [`OwnedSlot::is_empty()`] or [`OwnedSlot::get()`]. Failure covers
    /// allocator refusal (out of memory), a `count` whose byte size
    /// overflows, and zero-sized requests (`count == 0` or `T` zero-sized),
    /// none of which allocate anything.
    #[must_use]
    pub fn allocate_in(count: usize, allocator: A) -> OwnedSlot<Self> {
        let Ok(layout) = Layout::array::<T>(count) else {
            return OwnedSlot::empty();
        };

        if layout.size() == 0 {
            return OwnedSlot::empty();
        }

        match allocator.allocate(layout) {
            Some(ptr) => OwnedSlot::new(HeapBlock {
                ptr: ptr.cast(),
                capacity: count,
                allocator,
            }),
            None => OwnedSlot::empty(),
        }
    }
}

impl<T, A: BlockAllocator> ResourceKind for HeapKind<T, A> {
    type Handle = HeapBlock<T, A>;

    fn release(handle: HeapBlock<T, A>) {
        // Blocks are only created by `allocate_in`, so this layout is the
        // one the allocation was made with.
        let Ok(layout) = Layout::array::<T>(handle.capacity) else {
            return;
        };

        // SAFETY: `handle.ptr` came from `handle.allocator` with `layout`.
        unsafe {
            handle.allocator.release(handle.ptr.cast(), layout);
        }
    }
}

impl<T, A: BlockAllocator> fmt::Debug for HeapKind<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HeapKind")
    }
}

impl<T, A: BlockAllocator> OwnedSlot<HeapKind<T, A>> {
    /// Resizes the owned block to `new_count` elements in place (from the
    /// block's point of view; the underlying memory may move).
    ///
    /// On success the slot tracks the resized block and `true` is returned.
    /// On failure - empty slot, byte size overflow, zero-sized request, or
    /// allocator refusal - the slot and its block are left exactly as they
    /// were, the prior handle remains valid and owned, and `false` is
    /// returned. Failure is never reported by panicking or by releasing
    /// anything.
    #[must_use = "on failure the block keeps its old size, which callers must account for"]
    pub fn reallocate(&mut self, new_count: usize) -> bool {
        let Some(block) = self.get_mut() else {
            return false;
        };

        let Ok(new_layout) = Layout::array::<T>(new_count) else {
            return false;
        };

        if new_layout.size() == 0 {
            return false;
        }

        let Ok(old_layout) = Layout::array::<T>(block.capacity) else {
            return false;
        };

        // SAFETY: `block.ptr` came from `block.allocator` with `old_layout`,
        // and the new size is non-zero with the same alignment.
        let reallocated = unsafe {
            block
                .allocator
                .reallocate(block.ptr.cast(), old_layout, new_layout.size())
        };

        match reallocated {
            Some(ptr) => {
                block.ptr = ptr.cast();
                block.capacity = new_count;
                true
            }
            None => false,
        }
    }
}

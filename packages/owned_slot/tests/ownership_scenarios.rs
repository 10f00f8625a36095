//! End-to-end ownership scenarios for `owned_slot`.
//!
//! These tests exercise whole usage flows - allocate, use, let the scope
//! end - rather than individual slot operations, which are covered by the
//! unit tests next to each module.

use std::alloc::Layout;
use std::ptr::NonNull;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use owned_slot::{BlockAllocator, FileKind, HeapKind, OwnedSlot, ResourceKind, SystemHeap};

/// System heap wrapper that counts outstanding blocks and remembers the
/// address of the most recently released one.
#[derive(Debug, Default)]
struct InstrumentedHeap {
    active: AtomicUsize,
    last_released: Mutex<Option<usize>>,
}

impl BlockAllocator for &InstrumentedHeap {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        let ptr = SystemHeap.allocate(layout)?;
        self.active.fetch_add(1, Ordering::Relaxed);
        Some(ptr)
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        // SAFETY: Forwarding our own safety requirements.
        unsafe { SystemHeap.reallocate(ptr, old_layout, new_size) }
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.active.fetch_sub(1, Ordering::Relaxed);
        *self.last_released.lock().expect("lock poisoned") = Some(ptr.as_ptr() as usize);

        // SAFETY: Forwarding our own safety requirements.
        unsafe { SystemHeap.release(ptr, layout) }
    }
}

#[test]
fn ten_element_block_is_released_exactly_once() {
    let heap = InstrumentedHeap::default();
    let allocated_address;

    {
        let mut slot = HeapKind::<i32, _>::allocate_in(10, &heap);
        let block = slot.get_mut().expect("10 i32s should be within reach of any heap");

        allocated_address = block.ptr().as_ptr() as usize;
        block.as_uninit_slice_mut()[0].write(7);

        assert_eq!(heap.active.load(Ordering::Relaxed), 1);
    }

    assert_eq!(heap.active.load(Ordering::Relaxed), 0);
    assert_eq!(
        *heap.last_released.lock().expect("lock poisoned"),
        Some(allocated_address),
        "the released block must be the one originally allocated"
    );
}

#[test]
fn failed_open_causes_no_release() {
    // An open that fails yields an empty slot; its scope exit must be a
    // no-op rather than a close of some garbage handle.
    let slot = FileKind::open("no/such/file/anywhere");
    assert!(slot.is_empty());
}

#[test]
fn transfer_out_of_an_inner_scope() {
    let heap = InstrumentedHeap::default();

    {
        let mut survivor = OwnedSlot::empty();

        {
            let mut local = HeapKind::<u8, _>::allocate_in(32, &heap);
            assert_eq!(heap.active.load(Ordering::Relaxed), 1);

            let previous = survivor.transfer_from(&mut local);
            assert!(previous.is_none());
            // `local` drops here, already empty.
        }

        assert_eq!(
            heap.active.load(Ordering::Relaxed),
            1,
            "the transferred block must survive its original scope"
        );
        // `survivor` drops here and performs the one release.
    }

    assert_eq!(heap.active.load(Ordering::Relaxed), 0);
}

#[test]
fn early_return_still_releases() {
    fn use_block(heap: &InstrumentedHeap, fail_early: bool) -> Option<u32> {
        let mut slot = HeapKind::<u32, _>::allocate_in(4, heap);
        let block = slot.get_mut()?;

        block.as_uninit_slice_mut()[0].write(99);

        if fail_early {
            // The early exit path; `slot` must still release.
            return None;
        }

        // SAFETY: Written just above.
        Some(unsafe { block.as_uninit_slice()[0].assume_init_read() })
    }

    let heap = InstrumentedHeap::default();

    assert_eq!(use_block(&heap, false), Some(99));
    assert_eq!(heap.active.load(Ordering::Relaxed), 0);

    assert_eq!(use_block(&heap, true), None);
    assert_eq!(heap.active.load(Ordering::Relaxed), 0);
}

#[test]
fn grown_block_is_released_through_the_same_allocator() {
    let heap = InstrumentedHeap::default();

    {
        let mut slot = HeapKind::<u64, _>::allocate_in(4, &heap);
        assert!(slot.reallocate(16), "growing a small block should succeed");

        let block = slot.get().expect("slot still owns the block after a resize");
        assert_eq!(block.capacity(), 16);
        assert_eq!(heap.active.load(Ordering::Relaxed), 1);
    }

    assert_eq!(heap.active.load(Ordering::Relaxed), 0);
}

#[test]
fn manual_release_with_kind_function() {
    let heap = InstrumentedHeap::default();

    let mut slot = HeapKind::<u8, _>::allocate_in(8, &heap);
    let block = slot.take().expect("8 bytes should be within reach of any heap");

    drop(slot);
    assert_eq!(
        heap.active.load(Ordering::Relaxed),
        1,
        "a taken block must outlive its slot"
    );

    <HeapKind<u8, _> as ResourceKind>::release(block);
    assert_eq!(heap.active.load(Ordering::Relaxed), 0);
}

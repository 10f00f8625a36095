//! Example demonstrating basic usage of `owned_slot`.
//!
//! Shows scoped heap allocation, checking for allocation failure, resizing,
//! and moving ownership out of a scope before it ends.

use owned_slot::{HeapKind, OwnedSlot};

fn main() {
    println!("=== Owned Slot Example ===\n");

    println!("1. Allocating and releasing at scope exit:");
    scoped_allocation();

    println!("\n2. Resizing an owned block:");
    resizing();

    println!("\n3. Transferring ownership out of a scope:");
    transfer();

    println!("\nDone!");
}

fn scoped_allocation() {
    let mut slot = HeapKind::<u64>::allocate(10);

    match slot.get_mut() {
        Some(block) => {
            block.as_uninit_slice_mut()[0].write(42);
            println!("  Allocated {} u64s at {:?}", block.capacity(), block.ptr());
        }
        None => println!("  Allocation failed; the slot is empty and nothing will be released"),
    }

    // The block is returned to the heap when `slot` goes out of scope.
}

fn resizing() {
    let mut slot = HeapKind::<u8>::allocate(64);

    if slot.reallocate(256) {
        let capacity = slot.get().map_or(0, |block| block.capacity());
        println!("  Grew the block to {capacity} bytes");
    } else {
        // On failure the original 64-byte block is untouched and still owned.
        println!("  Resize failed; the original block remains valid");
    }
}

fn transfer() {
    let mut survivor = OwnedSlot::empty();

    {
        let mut local = HeapKind::<u8>::allocate(32);
        let previous = survivor.transfer_from(&mut local);
        assert!(previous.is_none(), "the outer slot started empty");
        println!("  Inner scope ends; the emptied local slot releases nothing");
    }

    println!(
        "  The block now lives in the outer slot (empty: {})",
        survivor.is_empty()
    );
    // Released when `survivor` drops, at the end of this function.
}

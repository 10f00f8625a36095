//! Scope-bound resource ownership with exactly-once release.
//!
//! This crate provides [`OwnedSlot<K>`], a storage location that owns at most
//! one resource handle - a heap block, a file, a descriptor, or any
//! application-defined resource - and releases it exactly once when the slot
//! goes out of scope, on every exit path including unwinding. It is the Rust
//! counterpart of the C `__attribute__((cleanup))` idiom: the resource kinds
//! and their release functions are bound at definition time, not looked up at
//! runtime.
//!
//! # Key Features
//!
//! - **Exactly-once release**: a slot that still owns its handle at scope
//!   exit releases it once; a slot emptied by transfer, take-out or early
//!   release releases nothing.
//! - **Definition-time kind binding**: a resource kind is a type
//!   implementing [`ResourceKind`]; an unknown kind is a compile error, not
//!   a runtime failure.
//! - **Ownership transfer**: [`OwnedSlot::transfer_from()`] and
//!   [`OwnedSlot::adopt()`] move the release obligation between locations,
//!   always leaving the source cleared.
//! - **Non-failing surface**: allocation and open helpers report failure as
//!   an empty slot, resizing as a `false` flag; the facility itself never
//!   panics on resource exhaustion.
//! - **Built-in kinds**: heap blocks ([`HeapKind`], with a pluggable
//!   [`BlockAllocator`]), buffered files ([`FileKind`]), and on Unix hosts
//!   raw and socket descriptors ([`FdKind`], [`SocketKind`]).
//! - **Deterministic teardown order**: slots sharing a scope release in
//!   reverse declaration order.
//!
//! # Examples
//!
//! ## Scoped heap allocation
//!
//! ```rust
//! use owned_slot::HeapKind;
//!
//! let mut slot = HeapKind::<u64>::allocate(10);
//!
//! // A failed allocation yields an empty slot instead of panicking.
//! if let Some(block) = slot.get_mut() {
//!     block.as_uninit_slice_mut()[0].write(42);
//! }
//!
//! // The block is returned to the heap when `slot` goes out of scope.
//! ```
//!
//! ## Custom resource kinds
//!
//! ```rust
//! use owned_slot::{OwnedSlot, ResourceKind};
//!
//! struct Connection {
//!     // ...
//! }
//!
//! impl Connection {
//!     fn hang_up(self) { /* ... */ }
//! }
//!
//! // Implementing the trait is what "registers" the kind.
//! struct ConnectionKind;
//!
//! impl ResourceKind for ConnectionKind {
//!     type Handle = Connection;
//!
//!     fn release(handle: Connection) {
//!         handle.hang_up();
//!     }
//! }
//!
//! {
//!     let _conn = OwnedSlot::<ConnectionKind>::new(Connection {});
//!     // `hang_up` runs here, even if the scope is left by `?` or a panic.
//! }
//! ```
//!
//! ## Moving ownership out before scope exit
//!
//! ```rust
//! use owned_slot::{HeapKind, OwnedSlot};
//!
//! fn produce() -> OwnedSlot<HeapKind<u8>> {
//!     let mut local = HeapKind::<u8>::allocate(64);
//!     let mut result = OwnedSlot::empty();
//!     let previous = result.transfer_from(&mut local);
//!     assert!(previous.is_none(), "the result slot started empty");
//!     // `local` is now empty; its scope exit releases nothing.
//!     result
//! }
//!
//! let slot = produce();
//! assert!(!slot.is_empty());
//! ```
//!
//! # What this crate is not
//!
//! A slot arbitrates nothing across threads: it is single-owner state that
//! is [`Send`] when its handle is, and two live slots must never claim the
//! same raw handle - the crate cannot see through aliased raw pointers or
//! descriptors, so that part stays a caller obligation, exactly as in C.

mod file;
mod heap;
mod kind;
mod slot;

#[cfg(unix)]
mod fd;

#[cfg(unix)]
pub use fd::{FdKind, SocketKind};
pub use file::FileKind;
pub use heap::{BlockAllocator, HeapBlock, HeapKind, SystemHeap};
pub use kind::ResourceKind;
pub use slot::OwnedSlot;

//! Example demonstrating an application-defined resource kind.
//!
//! Any resource with a teardown function can be managed by a slot: implement
//! `ResourceKind` once for the resource type and the release function is
//! bound at compile time.

use owned_slot::{OwnedSlot, ResourceKind};

/// Stand-in for a handle from some foreign library.
struct Session {
    id: u32,
}

fn close_session(session: Session) {
    println!("  [library] session {} closed", session.id);
}

/// The kind declaration; this is the whole registration step.
struct SessionKind;

impl ResourceKind for SessionKind {
    type Handle = Session;

    fn release(handle: Session) {
        close_session(handle);
    }
}

fn main() {
    println!("=== Custom Resource Kind Example ===\n");

    println!("Opening session 1 in an inner scope:");
    {
        let _session = OwnedSlot::<SessionKind>::new(Session { id: 1 });
        println!("  session 1 is live");
        // Closed automatically here.
    }

    println!("\nOpening session 2, then closing it early:");
    let mut slot = OwnedSlot::<SessionKind>::new(Session { id: 2 });
    slot.release_now();
    println!("  scope exit after release_now() is a no-op");

    println!("\nDone!");
}

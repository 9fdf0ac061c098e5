//! # Hybrid Vec
//!
//! A contiguous vector with a fixed inline buffer that promotes to the heap
//! when it grows past a compile-time capacity `N` — and, unlike a grow-only
//! small vector, demotes back to the inline buffer when shrunk, releasing the
//! heap allocation.
//!
//! The intended use is sequences whose common-case length is small and known
//! at the call site (index tuples, dimension lists, small work queues): pick
//! `N` to cover the common case and the container never touches the allocator
//! for it, while still handling arbitrarily large sequences correctly.
//!
//! ## Key Features
//!
//! * **Inline Storage:** Up to `N` elements live inside the container itself
//!   (no heap allocation), backed by `heapless::Vec`.
//! * **Two-Way Migration:** Growing past `N` moves the contents to a
//!   `std::vec::Vec`; shrinking back to `N` or below moves them into the
//!   inline buffer and frees the heap storage.
//! * **Single Active Store:** The heap store is non-empty exactly when the
//!   length exceeds `N`. All access resolves the active store at the moment
//!   of the call; no cached pointer can go stale across a reallocation.
//! * **Checked and Unchecked Access:** `at`/`front`/`back` return
//!   [`AccessError`] on violation; `get_unchecked` is a documented `unsafe`
//!   fast path whose bounds check runs in debug builds only.
//! * **Compile-Time Safety:** Enforces a strict inline size limit (max 16KB)
//!   during the build process to prevent accidental stack overflows.
//!
//! ## Examples
//!
//! ```rust
//! use hybrid_vec::HybridVec;
//!
//! // Inline capacity 4. No heap allocation yet.
//! let mut v: HybridVec<i32, 4> = HybridVec::new();
//! for x in [1, 2, 3, 4] {
//!     v.push(x);
//! }
//! assert!(v.is_on_stack());
//! assert_eq!(v.heap_len(), 0);
//!
//! // The fifth push crosses the boundary and promotes to the heap.
//! v.push(5);
//! assert!(!v.is_on_stack());
//! assert_eq!(v.heap_len(), 5);
//! assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5]);
//!
//! // Shrinking back demotes to the inline buffer and frees the heap store.
//! v.resize(2);
//! assert!(v.is_on_stack());
//! assert_eq!(v.as_slice(), &[1, 2]);
//! ```
//!
//! Checked access reports failures instead of panicking:
//!
//! ```rust
//! use hybrid_vec::{AccessError, HybridVec};
//!
//! let v: HybridVec<i32, 4> = HybridVec::from([10, 20]);
//! assert_eq!(v.at(1), Ok(&20));
//! assert_eq!(v.at(2), Err(AccessError::OutOfRange { index: 2, len: 2 }));
//!
//! let empty: HybridVec<i32, 4> = HybridVec::new();
//! assert_eq!(empty.front(), Err(AccessError::Empty));
//! ```

// --- Module Declarations ---

pub mod error;
pub mod vec;

// --- Re-exports ---

pub use error::AccessError;
pub use vec::{HybridVec, HybridVecIntoIter};

//! Contiguous vector that lives on the stack and promotes to the heap on demand.
//!
//! Provides [`HybridVec`] — stores up to `N` elements in a `heapless::Vec<T, N>`
//! inline buffer and transparently migrates to a `std::vec::Vec` once the logical
//! length exceeds `N`.  Unlike a grow-only small vector, [`HybridVec::resize`] and
//! [`HybridVec::clear`] migrate *back* to the inline buffer when the new length
//! fits, releasing the heap allocation.  Because it `Deref`s to `[T]`, all
//! standard slice methods are available without conversion.
//!
//! Exactly one backing store is authoritative at any time, tracked by a tag next
//! to the storage union.  Every access resolves the active store through
//! [`HybridVec::as_slice`]/[`HybridVec::as_mut_slice`]; no pointer into either
//! buffer is ever cached, so a heap reallocation cannot leave a stale cursor
//! behind.
//!
//! # Storage rule
//!
//! `heap_len() > 0` **iff** `len() > N`.  The boundary length `N` itself is
//! inline: a vector holding exactly `N` elements has not allocated.  Storage
//! transitions happen only inside [`resize`](HybridVec::resize) (directly) and
//! [`push`](HybridVec::push) (via promotion when crossing the boundary);
//! [`clear`](HybridVec::clear) resets to the inline store.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::{self, ManuallyDrop};
use core::ops::{Deref, DerefMut};
use core::ptr;
use core::slice;

use crate::error::{AccessError, Result};

/// The internal storage for `HybridVec`.
///
/// We use `ManuallyDrop` because the compiler cannot know which field is active
/// and therefore cannot automatically drop the correct one.
union VecData<T, const N: usize> {
    inline: ManuallyDrop<heapless::Vec<T, N>>,
    heap: ManuallyDrop<std::vec::Vec<T>>,
}

/// A vector that stores up to `N` elements inline and spills to the heap past
/// that, returning to the inline buffer when shrunk back.
///
/// # Overview
/// This collection uses a `heapless::Vec` for inline storage and a
/// `std::vec::Vec` for heap storage.  The inline buffer is part of the struct
/// itself, so a `HybridVec` whose length never exceeds `N` performs no heap
/// allocation at all.
///
/// # Safety
/// * The `on_stack` tag determines which side of the `VecData` union is active.
/// * The heap side is non-empty exactly when the logical length exceeds `N`;
///   demoting operations (`resize` to a small length, `clear`) drop the heap
///   allocation entirely rather than leaving it empty-but-allocated.
pub struct HybridVec<T, const N: usize> {
    on_stack: bool,
    data: VecData<T, N>,
}

impl<T, const N: usize> HybridVec<T, N> {
    /// The maximum allowed inline size in bytes (16 KB).
    pub const MAX_STACK_SIZE: usize = 16 * 1024;

    /// Creates a new empty `HybridVec`, inline-active.
    ///
    /// # Compile-Time Safety
    /// **Size Limit:** Enforces a limit of 16 KB. Exceeding this fails the build,
    /// as does an inline capacity of zero.
    ///
    /// ## Test: Valid (Compiles)
    /// ```rust
    /// use hybrid_vec::HybridVec;
    /// let v: HybridVec<u8, 64> = HybridVec::new();
    /// ```
    ///
    /// ## Test: Invalid Size (Fails Compilation)
    /// ```rust,compile_fail
    /// use hybrid_vec::HybridVec;
    /// // 32 KB of inline u64s -> too big for the stack guard
    /// let v: HybridVec<u64, 4096> = HybridVec::new();
    /// ```
    pub fn new() -> Self {
        // COMPILER GUARD
        const {
            assert!(N > 0, "HybridVec requires a positive inline capacity");
            assert!(
                std::mem::size_of::<Self>() <= Self::MAX_STACK_SIZE,
                "HybridVec is too large! The struct size exceeds the 16KB limit. Reduce N."
            );
        }

        Self {
            on_stack: true,
            data: VecData {
                inline: ManuallyDrop::new(heapless::Vec::new()),
            },
        }
    }

    /// Creates a `HybridVec` of length `len` with default-initialized elements.
    ///
    /// Inline-active iff `len <= N`.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut v = Self::new();
        v.resize(len);
        v
    }

    /// Creates a `HybridVec` of length `len` with every element set to `value`.
    pub fn from_elem(len: usize, value: T) -> Self
    where
        T: Default + Clone,
    {
        let mut v = Self::new();
        v.assign(len, value);
        v
    }

    /// Returns `true` if the logical contents currently live in the inline buffer.
    #[inline(always)]
    pub fn is_on_stack(&self) -> bool {
        self.on_stack
    }

    /// Returns the number of elements in the vector.
    #[inline(always)]
    pub fn len(&self) -> usize {
        unsafe {
            if self.on_stack {
                (*self.data.inline).len()
            } else {
                (*self.data.heap).len()
            }
        }
    }

    /// Returns `true` if the vector contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fixed inline capacity `N`.
    #[inline(always)]
    pub const fn inline_capacity(&self) -> usize {
        N
    }

    /// Returns the current length of the heap store: `0` while inline-active,
    /// equal to `len()` while heap-active.
    #[inline(always)]
    pub fn heap_len(&self) -> usize {
        if self.on_stack {
            0
        } else {
            unsafe { (*self.data.heap).len() }
        }
    }

    /// Returns the capacity of the active store.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        if self.on_stack {
            N
        } else {
            unsafe { (*self.data.heap).capacity() }
        }
    }

    /// Returns the contents as a slice of the active store.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe {
            if self.on_stack {
                (*self.data.inline).as_slice()
            } else {
                (*self.data.heap).as_slice()
            }
        }
    }

    /// Returns the contents as a mutable slice of the active store.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe {
            if self.on_stack {
                (*self.data.inline).as_mut_slice()
            } else {
                (*self.data.heap).as_mut_slice()
            }
        }
    }

    /// Returns a raw pointer to the first element of the active store.
    ///
    /// The pointer is invalidated by any operation that changes the active
    /// store or reallocates the heap store.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.as_slice().as_ptr()
    }

    /// Returns a raw mutable pointer to the first element of the active store.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.as_mut_slice().as_mut_ptr()
    }

    /// Returns a reference to the element at `index`, or `None` if out of bounds.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns a mutable reference to the element at `index`, or `None` if out
    /// of bounds.
    #[inline(always)]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// [`AccessError::OutOfRange`] when `index >= len()`.  The container is
    /// unchanged and remains usable after a failed access.
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.len();
        self.as_slice()
            .get(index)
            .ok_or(AccessError::OutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// [`AccessError::OutOfRange`] when `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(AccessError::OutOfRange { index, len })
    }

    /// Returns a reference to the first element.
    ///
    /// # Errors
    /// [`AccessError::Empty`] when the vector is empty.
    pub fn front(&self) -> Result<&T> {
        self.as_slice().first().ok_or(AccessError::Empty)
    }

    /// Returns a mutable reference to the first element.
    ///
    /// # Errors
    /// [`AccessError::Empty`] when the vector is empty.
    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.as_mut_slice().first_mut().ok_or(AccessError::Empty)
    }

    /// Returns a reference to the last element.
    ///
    /// # Errors
    /// [`AccessError::Empty`] when the vector is empty.
    pub fn back(&self) -> Result<&T> {
        self.as_slice().last().ok_or(AccessError::Empty)
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Errors
    /// [`AccessError::Empty`] when the vector is empty.
    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.as_mut_slice().last_mut().ok_or(AccessError::Empty)
    }

    /// Returns a reference to the element at `index` without any bounds check
    /// in release builds.
    ///
    /// This is the unchecked fast path; prefer [`at`](Self::at) or indexing
    /// unless the access is on a measured hot path.  The bounds check runs
    /// only when `debug_assertions` are enabled.
    ///
    /// # Safety
    /// `index` must be less than `len()`.  Violating this in a release build
    /// is undefined behavior.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(
            index < self.len(),
            "index {} out of range for length {}",
            index,
            self.len()
        );
        unsafe { self.as_slice().get_unchecked(index) }
    }

    /// Mutable variant of [`get_unchecked`](Self::get_unchecked).
    ///
    /// # Safety
    /// `index` must be less than `len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(
            index < self.len(),
            "index {} out of range for length {}",
            index,
            self.len()
        );
        unsafe { self.as_mut_slice().get_unchecked_mut(index) }
    }

    // --- Mutation ---

    /// Appends an element to the back of the vector.
    ///
    /// Appending to a full inline buffer (`len() == N`) promotes the contents
    /// to the heap with doubled capacity, so appends stay amortized O(1).
    #[inline(always)]
    pub fn push(&mut self, value: T) {
        if !self.on_stack {
            unsafe { (*self.data.heap).push(value) };
            return;
        }
        if self.len() == N {
            self.promote_and_push(value);
        } else {
            unsafe { Self::inline_push(&mut self.data.inline, value) };
        }
    }

    #[inline(never)]
    fn promote_and_push(&mut self, value: T) {
        unsafe {
            let inline = ManuallyDrop::take(&mut self.data.inline);
            let mut heap = std::vec::Vec::with_capacity(N * 2);
            heap.extend(inline);
            heap.push(value);
            self.data.heap = ManuallyDrop::new(heap);
            self.on_stack = false;
        }
    }

    /// Resizes the vector to `new_len`, default-initializing any new elements.
    ///
    /// This is the only operation that migrates storage in both directions:
    /// * `new_len > N`: the heap store becomes active.  If the vector was
    ///   inline, the inline elements are moved to the front of the heap store
    ///   before it is exposed.
    /// * `new_len <= N`: the inline store becomes active.  If the vector was
    ///   heap-active, the first `new_len` heap elements are moved into the
    ///   inline buffer and the heap allocation is released.
    ///
    /// The boundary `new_len == N` is inline.  The migration is atomic from
    /// the caller's point of view: no intermediate state is observable.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        if new_len > N {
            if self.on_stack {
                unsafe {
                    let inline = ManuallyDrop::take(&mut self.data.inline);
                    let mut heap = std::vec::Vec::with_capacity(new_len);
                    heap.extend(inline);
                    heap.resize_with(new_len, T::default);
                    self.data.heap = ManuallyDrop::new(heap);
                    self.on_stack = false;
                }
            } else {
                unsafe { (*self.data.heap).resize_with(new_len, T::default) };
            }
        } else if self.on_stack {
            unsafe {
                let inline = &mut *self.data.inline;
                if new_len <= inline.len() {
                    inline.truncate(new_len);
                } else {
                    while inline.len() < new_len {
                        Self::inline_push(inline, T::default());
                    }
                }
            }
        } else {
            // Heap-active implies len() > N >= new_len, so demotion only
            // ever truncates; it never needs to default-fill.
            unsafe {
                let mut heap = ManuallyDrop::take(&mut self.data.heap);
                heap.truncate(new_len);
                let mut inline: heapless::Vec<T, N> = heapless::Vec::new();
                for item in heap {
                    Self::inline_push(&mut inline, item);
                }
                self.data.inline = ManuallyDrop::new(inline);
                self.on_stack = true;
            }
        }
    }

    /// Resizes to `count` elements and sets every one of them to `value`.
    pub fn assign(&mut self, count: usize, value: T)
    where
        T: Default + Clone,
    {
        self.resize(count);
        self.fill(value);
    }

    /// Overwrites every element in `[0, len())` with `value`.  Does not resize.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.as_mut_slice().fill(value);
    }

    /// Removes all elements, unconditionally releasing the heap allocation and
    /// making the inline store active.  Never fails.
    pub fn clear(&mut self) {
        if self.on_stack {
            unsafe { (*self.data.inline).clear() };
        } else {
            unsafe {
                ManuallyDrop::drop(&mut self.data.heap);
                self.data.inline = ManuallyDrop::new(heapless::Vec::new());
            }
            self.on_stack = true;
        }
    }

    /// Exchanges the complete state of `self` and `other`: contents, logical
    /// length, and active-store designation.
    ///
    /// O(1) apart from the byte copy of the two inline buffers.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns an iterator over the elements.
    #[inline(always)]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns a mutable iterator over the elements.
    #[inline(always)]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    // Push into the inline store when room is already established.
    #[inline(always)]
    fn inline_push(inline: &mut heapless::Vec<T, N>, value: T) {
        match inline.push(value) {
            Ok(()) => {}
            Err(_) => unreachable!("inline capacity check failed in push"),
        }
    }
}

impl<T, const N: usize> Drop for HybridVec<T, N> {
    fn drop(&mut self) {
        unsafe {
            if self.on_stack {
                ManuallyDrop::drop(&mut self.data.inline);
            } else {
                ManuallyDrop::drop(&mut self.data.heap);
            }
        }
    }
}

impl<T: Clone, const N: usize> Clone for HybridVec<T, N> {
    fn clone(&self) -> Self {
        if self.on_stack {
            let inline = unsafe { (*self.data.inline).clone() };
            Self {
                on_stack: true,
                data: VecData {
                    inline: ManuallyDrop::new(inline),
                },
            }
        } else {
            let heap = unsafe { (*self.data.heap).clone() };
            Self {
                on_stack: false,
                data: VecData {
                    heap: ManuallyDrop::new(heap),
                },
            }
        }
    }
}

impl<T, const N: usize> Default for HybridVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Deref for HybridVec<T, N> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, const N: usize> DerefMut for HybridVec<T, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for HybridVec<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: PartialEq, const N: usize> PartialEq for HybridVec<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}
impl<T: Eq, const N: usize> Eq for HybridVec<T, N> {}

impl<T: PartialOrd, const N: usize> PartialOrd for HybridVec<T, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, const N: usize> Ord for HybridVec<T, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, const N: usize> Hash for HybridVec<T, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, const N: usize> AsRef<[T]> for HybridVec<T, N> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> AsMut<[T]> for HybridVec<T, N> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const N: usize> std::borrow::Borrow<[T]> for HybridVec<T, N> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> std::borrow::BorrowMut<[T]> for HybridVec<T, N> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: slice::SliceIndex<[T]>, const N: usize> core::ops::Index<I> for HybridVec<T, N> {
    type Output = I::Output;
    #[inline(always)]
    fn index(&self, index: I) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T, I: slice::SliceIndex<[T]>, const N: usize> core::ops::IndexMut<I> for HybridVec<T, N> {
    #[inline(always)]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T, const N: usize> Extend<T> for HybridVec<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T, const N: usize> FromIterator<T> for HybridVec<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = HybridVec::new();
        vec.extend(iter);
        vec
    }
}

impl<T, const M: usize, const N: usize> From<[T; M]> for HybridVec<T, N> {
    fn from(arr: [T; M]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T: Clone, const N: usize> From<&[T]> for HybridVec<T, N> {
    fn from(slice: &[T]) -> Self {
        slice.iter().cloned().collect()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a HybridVec<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut HybridVec<T, N> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Owning iterator over the elements of a [`HybridVec`].
pub struct HybridVecIntoIter<T, const N: usize> {
    iter: HybridVecIterEnum<T, N>,
}

enum HybridVecIterEnum<T, const N: usize> {
    // The buffer is never dropped as a vector; elements in [pos, len) are
    // read out by `next` or dropped in place by the iterator's Drop impl.
    Inline {
        buf: ManuallyDrop<heapless::Vec<T, N>>,
        pos: usize,
    },
    Heap(std::vec::IntoIter<T>),
}

impl<T, const N: usize> IntoIterator for HybridVec<T, N> {
    type Item = T;
    type IntoIter = HybridVecIntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        let this = ManuallyDrop::new(self);
        unsafe {
            if this.on_stack {
                HybridVecIntoIter {
                    iter: HybridVecIterEnum::Inline {
                        buf: ptr::read(&this.data.inline),
                        pos: 0,
                    },
                }
            } else {
                let heap = ManuallyDrop::into_inner(ptr::read(&this.data.heap));
                HybridVecIntoIter {
                    iter: HybridVecIterEnum::Heap(heap.into_iter()),
                }
            }
        }
    }
}

impl<T, const N: usize> Iterator for HybridVecIntoIter<T, N> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.iter {
            HybridVecIterEnum::Inline { buf, pos } => {
                if *pos < buf.len() {
                    let val = unsafe { ptr::read(buf.as_slice().as_ptr().add(*pos)) };
                    *pos += 1;
                    Some(val)
                } else {
                    None
                }
            }
            HybridVecIterEnum::Heap(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.iter {
            HybridVecIterEnum::Inline { buf, pos } => {
                let remaining = buf.len() - pos;
                (remaining, Some(remaining))
            }
            HybridVecIterEnum::Heap(iter) => iter.size_hint(),
        }
    }
}

impl<T, const N: usize> ExactSizeIterator for HybridVecIntoIter<T, N> {}

impl<T, const N: usize> Drop for HybridVecIntoIter<T, N> {
    fn drop(&mut self) {
        if let HybridVecIterEnum::Inline { buf, pos } = &mut self.iter {
            unsafe {
                let base = buf.as_mut_slice().as_mut_ptr();
                for i in *pos..buf.len() {
                    ptr::drop_in_place(base.add(i));
                }
            }
        }
    }
}

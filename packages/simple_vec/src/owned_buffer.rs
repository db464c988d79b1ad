use std::alloc::{Layout, alloc, dealloc};
use std::any::type_name;
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ptr::NonNull;
use std::{fmt, slice};

use crate::Error;

/// Exclusive owner of a single heap allocation holding a fixed number of `T` slots.
///
/// The buffer knows how many slots it owns but not which of them hold a value. Slots are handed
/// out as [`MaybeUninit<T>`] and the owner of the buffer (typically a [`SimpleVec`][1]) is
/// responsible for tracking which slots are initialized and for dropping those values before the
/// buffer goes away. Dropping the buffer only releases the memory.
///
/// A buffer with zero slots owns no allocation. Zero-sized element types never allocate either,
/// although the buffer still reports the requested slot count.
///
/// The buffer cannot be cloned. Ownership moves with ordinary Rust moves, via
/// [`mem::take()`][2] (the [`Default`] buffer is empty) or via [`swap()`][3].
///
/// [1]: crate::SimpleVec
/// [2]: std::mem::take
/// [3]: Self::swap
pub struct OwnedBuffer<T> {
    /// Start of the slot array. Dangling (but aligned) if the buffer owns no allocation.
    ptr: NonNull<T>,

    /// Number of slots in the allocation. Zero if the buffer owns no allocation.
    len: usize,

    _owns_slots: PhantomData<T>,
}

impl<T> OwnedBuffer<T> {
    /// Creates a buffer that owns no allocation.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            _owns_slots: PhantomData,
        }
    }

    /// Allocates a buffer with `len` uninitialized slots.
    ///
    /// No allocation is made if `len` is zero or if `T` is zero-sized.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the size of the slot array in bytes does not fit into
    /// the address space or if the memory allocator cannot satisfy the request.
    ///
    /// # Example
    ///
    /// ```rust
    /// use simple_vec::OwnedBuffer;
    ///
    /// let mut buffer = OwnedBuffer::<String>::new(4)?;
    /// assert_eq!(buffer.len(), 4);
    /// assert!(buffer.is_allocated());
    ///
    /// // The buffer does not track initialization, so we drop what we write ourselves.
    /// let slot = &mut buffer.slots_mut()[0];
    /// slot.write("hello".to_string());
    ///
    /// // SAFETY: We just initialized this slot.
    /// unsafe { slot.assume_init_drop() };
    /// # Ok::<(), simple_vec::Error>(())
    /// ```
    pub fn new(len: usize) -> crate::Result<Self> {
        if len == 0 {
            return Ok(Self::empty());
        }

        let layout = Self::layout(len)?;

        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                len,
                _owns_slots: PhantomData,
            });
        }

        // SAFETY: The layout is valid for an array of `len` elements of `T` and is not
        // zero-sized (guarded above).
        let raw = unsafe { alloc(layout) };

        let ptr = NonNull::new(raw.cast::<T>()).ok_or_else(|| Error::allocation::<T>(len))?;

        Ok(Self {
            ptr,
            len,
            _owns_slots: PhantomData,
        })
    }

    /// Takes ownership of an existing slot array.
    ///
    /// This is the counterpart of [`release()`][Self::release].
    ///
    /// # Safety
    ///
    /// If `len` is non-zero and `T` is not zero-sized, `ptr` must point to memory allocated by
    /// the global allocator with the layout of a `[T; len]` array, and the caller must give up
    /// all ownership of that memory. Otherwise, `ptr` must be aligned for `T`.
    #[must_use]
    pub unsafe fn from_raw_parts(ptr: NonNull<T>, len: usize) -> Self {
        Self {
            ptr,
            len,
            _owns_slots: PhantomData,
        }
    }

    /// Gives up ownership of the slot array without releasing it, leaving this buffer empty.
    ///
    /// Returns the start of the slot array and the number of slots, or `None` if the buffer
    /// owned no slots. The caller becomes responsible for the memory, typically by passing it
    /// back into [`from_raw_parts()`][Self::from_raw_parts].
    #[must_use = "the released memory is leaked unless it is adopted by another buffer"]
    pub fn release(&mut self) -> Option<(NonNull<T>, usize)> {
        if self.len == 0 {
            return None;
        }

        let released = mem::take(self);
        let parts = (released.ptr, released.len);

        // The memory now belongs to the caller.
        mem::forget(released);

        Some(parts)
    }

    /// The number of slots in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer has zero slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the buffer owns a heap allocation.
    ///
    /// Always `false` for zero-sized element types, which never allocate even when the buffer
    /// has slots. Use [`is_empty()`][Self::is_empty] to ask about the slot count instead.
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.len != 0 && size_of::<T>() != 0
    }

    /// Returns a reference to the slot at `index`, without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len()`][Self::len].
    #[must_use]
    pub unsafe fn slot_unchecked(&self, index: usize) -> &MaybeUninit<T> {
        debug_assert!(
            index < self.len,
            "slot {index} out of bounds in buffer of {} slots of {}",
            self.len,
            type_name::<T>()
        );

        // SAFETY: Forwarding the guarantee from the caller that the index is in bounds.
        unsafe { self.slots().get_unchecked(index) }
    }

    /// Returns an exclusive reference to the slot at `index`, without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len()`][Self::len].
    #[must_use]
    pub unsafe fn slot_unchecked_mut(&mut self, index: usize) -> &mut MaybeUninit<T> {
        debug_assert!(
            index < self.len,
            "slot {index} out of bounds in buffer of {} slots of {}",
            self.len,
            type_name::<T>()
        );

        // SAFETY: Forwarding the guarantee from the caller that the index is in bounds.
        unsafe { self.slots_mut().get_unchecked_mut(index) }
    }

    /// All the slots of the buffer, initialized or not.
    #[must_use]
    pub fn slots(&self) -> &[MaybeUninit<T>] {
        // SAFETY: We own `len` slots starting at `ptr` (or a dangling aligned pointer if there
        // is nothing to own) and `MaybeUninit` places no requirements on the slot contents.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr().cast::<MaybeUninit<T>>(), self.len) }
    }

    /// All the slots of the buffer, initialized or not, for writing.
    #[must_use]
    pub fn slots_mut(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY: As in `slots()`; the exclusive borrow of `self` makes the access exclusive.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr().cast::<MaybeUninit<T>>(), self.len) }
    }

    /// Pointer to the first slot. Never null, even for an empty buffer.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable pointer to the first slot. Never null, even for an empty buffer.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Exchanges the slot arrays owned by the two buffers. No slots are touched.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.len, &mut other.len);
    }

    fn layout(len: usize) -> crate::Result<Layout> {
        let Ok(layout) = Layout::array::<T>(len) else {
            return Err(Error::allocation::<T>(len));
        };

        Ok(layout)
    }
}

impl<T> Default for OwnedBuffer<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Drop for OwnedBuffer<T> {
    fn drop(&mut self) {
        if self.len == 0 {
            return;
        }

        let layout = Layout::array::<T>(self.len)
            .expect("layout was already validated when the buffer was allocated");

        if layout.size() == 0 {
            return;
        }

        // SAFETY: The memory was allocated by the global allocator with this exact layout
        // (either by `new()` or as promised by the caller of `from_raw_parts()`), and ownership
        // has not been given away, as `release()` leaves the buffer empty.
        unsafe {
            dealloc(self.ptr.as_ptr().cast(), layout);
        }
    }
}

impl<T> fmt::Debug for OwnedBuffer<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedBuffer")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

// SAFETY: The buffer is the only owner of its memory, so it can move between threads
// as long as the values that may be stored in it can.
unsafe impl<T: Send> Send for OwnedBuffer<T> {}

// SAFETY: Shared access only hands out shared references to slots, so sharing the buffer
// is as safe as sharing the values stored in it.
unsafe impl<T: Sync> Sync for OwnedBuffer<T> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    assert_impl_all!(OwnedBuffer<u32>: Send, Sync, Default, fmt::Debug);
    assert_not_impl_any!(OwnedBuffer<u32>: Clone, Copy);
    assert_not_impl_any!(OwnedBuffer<Rc<u32>>: Send, Sync);
    assert_not_impl_any!(OwnedBuffer<Cell<u32>>: Sync);

    #[test]
    fn zero_slots_does_not_allocate() {
        let buffer = OwnedBuffer::<u64>::new(0).unwrap();

        assert_eq!(buffer.len(), 0);
        assert!(buffer.is_empty());
        assert!(!buffer.is_allocated());
        assert!(buffer.slots().is_empty());
        assert!(!buffer.as_ptr().is_null());
    }

    #[test]
    fn slots_are_writable_and_readable() {
        let mut buffer = OwnedBuffer::<u64>::new(3).unwrap();

        assert_eq!(buffer.len(), 3);
        assert!(buffer.is_allocated());

        for (index, slot) in buffer.slots_mut().iter_mut().enumerate() {
            slot.write(u64::try_from(index).unwrap() * 10);
        }

        // SAFETY: All slots were initialized above and 0..3 is in bounds.
        let values: Vec<u64> = (0..3)
            .map(|index| unsafe { buffer.slot_unchecked(index).assume_init() })
            .collect();

        assert_eq!(values, vec![0, 10, 20]);
    }

    #[test]
    fn slot_unchecked_mut_overwrites_slot() {
        let mut buffer = OwnedBuffer::<u32>::new(2).unwrap();

        // SAFETY: Index 1 is in bounds.
        unsafe { buffer.slot_unchecked_mut(1) }.write(99);

        // SAFETY: Index 1 is in bounds and was initialized above.
        let value = unsafe { buffer.slot_unchecked(1).assume_init() };
        assert_eq!(value, 99);
    }

    #[test]
    fn zero_sized_type_reports_slots_without_allocating() {
        let buffer = OwnedBuffer::<()>::new(1000).unwrap();

        assert_eq!(buffer.len(), 1000);
        assert!(!buffer.is_empty());
        assert!(!buffer.is_allocated());
        assert_eq!(buffer.slots().len(), 1000);
    }

    #[test]
    fn oversized_request_is_allocation_error() {
        let result = OwnedBuffer::<u64>::new(usize::MAX);

        assert_eq!(result.unwrap_err(), Error::allocation::<u64>(usize::MAX));
    }

    #[test]
    #[cfg_attr(miri, ignore)] // Miri reports a huge allocation as an error instead of failing it.
    fn allocator_refusal_is_allocation_error() {
        // The largest layout that is still valid; no allocator can satisfy it.
        let slots = usize::try_from(isize::MAX).unwrap();

        let result = OwnedBuffer::<u8>::new(slots);

        assert!(matches!(result, Err(Error::Allocation { .. })));
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut source = OwnedBuffer::<u16>::new(8).unwrap();
        let source_ptr = source.as_ptr();

        let target = mem::take(&mut source);

        assert_eq!(target.len(), 8);
        assert_eq!(target.as_ptr(), source_ptr);
        assert_eq!(source.len(), 0);
        assert!(!source.is_allocated());
    }

    #[test]
    fn swap_exchanges_allocations() {
        let mut a = OwnedBuffer::<u32>::new(2).unwrap();
        let mut b = OwnedBuffer::<u32>::new(5).unwrap();
        let a_ptr = a.as_ptr();
        let b_ptr = b.as_ptr();

        a.swap(&mut b);

        assert_eq!(a.len(), 5);
        assert_eq!(b.len(), 2);
        assert_eq!(a.as_ptr(), b_ptr);
        assert_eq!(b.as_ptr(), a_ptr);
    }

    #[test]
    fn release_then_adopt_transfers_ownership() {
        let mut original = OwnedBuffer::<u64>::new(4).unwrap();
        original.slots_mut()[2].write(42);

        let (ptr, len) = original.release().unwrap();

        assert!(!original.is_allocated());
        assert!(original.release().is_none());

        // SAFETY: The parts came from `release()` and nobody else owns them.
        let adopted = unsafe { OwnedBuffer::from_raw_parts(ptr, len) };

        assert_eq!(adopted.len(), 4);

        // SAFETY: Slot 2 was initialized before the transfer.
        let value = unsafe { adopted.slot_unchecked(2).assume_init() };
        assert_eq!(value, 42);
    }

    #[test]
    fn dropping_buffer_does_not_drop_slot_values() {
        struct CountsDrops(Rc<Cell<usize>>);

        impl Drop for CountsDrops {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));

        let mut buffer = OwnedBuffer::<CountsDrops>::new(1).unwrap();
        buffer.slots_mut()[0].write(CountsDrops(Rc::clone(&drops)));

        // SAFETY: Slot 0 is initialized; reading moves the value out of the buffer.
        let value = unsafe { buffer.slot_unchecked(0).assume_init_read() };
        drop(buffer);

        assert_eq!(drops.get(), 0);

        drop(value);
        assert_eq!(drops.get(), 1);
    }
}

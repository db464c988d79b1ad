use std::borrow::Borrow;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::slice::{self, SliceIndex};
use std::{fmt, mem, ptr};

use crate::{Error, IntoIter, OwnedBuffer};

/// A growable, contiguous array of `T` built on an [`OwnedBuffer`].
///
/// The first [`len()`][Self::len] slots of the buffer hold live values, the remaining slots up to
/// [`capacity()`][Self::capacity] are uninitialized and are never observed through the public API.
///
/// # Growth
///
/// When an element is appended or inserted into a full vector, the capacity doubles (an empty
/// vector grows to a capacity of 1). The sequence of capacities observed while pushing is therefore
/// always 0, 1, 2, 4, 8 and so on, which keeps appending amortized O(1). Explicit growth via
/// [`reserve()`][Self::reserve], [`resize()`][Self::resize] or
/// [`with_capacity()`][Self::with_capacity] allocates exactly the requested capacity.
///
/// Capacity is never released by removing elements; only dropping the vector
/// (or moving its storage elsewhere) does that.
///
/// # Fallible allocation
///
/// Every operation that may allocate returns a [`Result`] and reports [`Error::Allocation`]
/// instead of aborting. A failed operation leaves the vector exactly as it was. Trait-based entry
/// points that cannot return an error ([`Clone`], [`From`], [`FromIterator`], [`Extend`]) panic
/// instead.
///
/// # Example
///
/// ```rust
/// use simple_vec::SimpleVec;
///
/// let mut numbers = SimpleVec::new();
/// numbers.push(1)?;
/// numbers.push(3)?;
/// numbers.insert(1, 2)?;
///
/// assert_eq!(numbers, [1, 2, 3]);
/// assert_eq!(numbers.capacity(), 4);
///
/// let next = numbers.erase(0);
/// assert_eq!(numbers[next], 2);
/// # Ok::<(), simple_vec::Error>(())
/// ```
pub struct SimpleVec<T> {
    buffer: OwnedBuffer<T>,

    /// Number of live values, stored in slots `0..len` of the buffer.
    /// Never greater than the number of slots in the buffer.
    len: usize,
}

impl<T> SimpleVec<T> {
    /// Creates an empty vector. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: OwnedBuffer::empty(),
            len: 0,
        }
    }

    /// Creates an empty vector with room for exactly `capacity` elements.
    ///
    /// Pushing up to `capacity` elements into the returned vector does not reallocate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the storage cannot be allocated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use simple_vec::SimpleVec;
    ///
    /// let mut vec = SimpleVec::with_capacity(10)?;
    /// assert_eq!(vec.len(), 0);
    ///
    /// for i in 0..10 {
    ///     vec.push(i)?;
    /// }
    ///
    /// assert_eq!(vec.capacity(), 10);
    /// # Ok::<(), simple_vec::Error>(())
    /// ```
    pub fn with_capacity(capacity: usize) -> crate::Result<Self> {
        Ok(Self {
            buffer: OwnedBuffer::new(capacity)?,
            len: 0,
        })
    }

    /// Creates a vector of `len` elements produced by `f`, with a capacity of exactly `len`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the storage cannot be allocated.
    pub fn repeat_with(len: usize, f: impl FnMut() -> T) -> crate::Result<Self> {
        let mut vec = Self::with_capacity(len)?;
        vec.fill_to(len, f);
        Ok(vec)
    }

    /// The number of elements in the vector.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of elements the vector can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the vector contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Grows the capacity to exactly `new_capacity` if it is currently smaller.
    ///
    /// Unlike [`Vec::reserve()`], the argument is the desired total capacity, not the number of
    /// additional elements. The capacity is never reduced.
    ///
    /// Existing elements are moved (never cloned) into the new storage in index order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the new storage cannot be allocated.
    /// The vector is left unchanged in that case.
    #[cfg_attr(test, mutants::skip)] // Can be mutated to infinitely growing memory use.
    pub fn reserve(&mut self, new_capacity: usize) -> crate::Result<()> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }

        // The old storage stays untouched until the new one is fully ready.
        let mut new_buffer = OwnedBuffer::new(new_capacity)?;

        // SAFETY: The first `len` slots of the old buffer are initialized, the new buffer has
        // room for more than `len` elements and the two allocations are distinct. The values are
        // moved bitwise; the old slots are treated as uninitialized from here on.
        unsafe {
            ptr::copy_nonoverlapping(self.buffer.as_ptr(), new_buffer.as_mut_ptr(), self.len);
        }

        self.buffer.swap(&mut new_buffer);

        // `new_buffer` now owns the old allocation, which holds no live values.
        // Dropping it only releases the memory.
        drop(new_buffer);

        Ok(())
    }

    /// Returns a reference to the element at `index`, without bounds checking.
    ///
    /// For a checked alternative see [`at()`][Self::at] or [`get()`][slice::get].
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len()`][Self::len].
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(
            index < self.len,
            "index {index} out of bounds for vector of length {}",
            self.len
        );

        // SAFETY: Forwarding the guarantee from the caller that the index is in bounds.
        unsafe { self.as_slice().get_unchecked(index) }
    }

    /// Returns an exclusive reference to the element at `index`, without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len()`][Self::len].
    #[must_use]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(
            index < self.len,
            "index {index} out of bounds for vector of length {}",
            self.len
        );

        // SAFETY: Forwarding the guarantee from the caller that the index is in bounds.
        unsafe { self.as_mut_slice().get_unchecked_mut(index) }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is not less than [`len()`][Self::len].
    ///
    /// # Example
    ///
    /// ```rust
    /// use simple_vec::{Error, simple_vec};
    ///
    /// let vec = simple_vec![10, 20];
    ///
    /// assert_eq!(vec.at(1), Ok(&20));
    /// assert_eq!(vec.at(2), Err(Error::OutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn at(&self, index: usize) -> crate::Result<&T> {
        let len = self.len;

        self.as_slice()
            .get(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Returns an exclusive reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is not less than [`len()`][Self::len].
    pub fn at_mut(&mut self, index: usize) -> crate::Result<&mut T> {
        let len = self.len;

        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// The live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: The first `len` slots are initialized and the pointer is non-null and aligned
        // even when the buffer owns no allocation.
        unsafe { slice::from_raw_parts(self.buffer.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: As in `as_slice()`; the exclusive borrow of `self` makes the access exclusive.
        unsafe { slice::from_raw_parts_mut(self.buffer.as_mut_ptr(), self.len) }
    }

    /// Removes all elements, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Shortens the vector to `new_len` elements, dropping the rest. The capacity is unchanged.
    ///
    /// Has no effect if `new_len` is not less than the current length.
    pub fn truncate(&mut self, new_len: usize) {
        let Some(tail_len) = self.len.checked_sub(new_len) else {
            return;
        };

        // Shrink first, so a panic in a destructor below cannot cause a double drop.
        self.len = new_len;

        // SAFETY: `new_len` is less than or equal to the old length, so the result is in bounds.
        let tail_start = unsafe { self.buffer.as_mut_ptr().add(new_len) };
        let tail = ptr::slice_from_raw_parts_mut(tail_start, tail_len);

        // SAFETY: The tail slots were live until we shortened the vector above and nothing else
        // refers to them, so they are dropped exactly once.
        unsafe {
            ptr::drop_in_place(tail);
        }
    }

    /// Resizes the vector to `new_len`, filling new slots with values produced by `f`.
    ///
    /// Growing beyond the capacity first reserves exactly `new_len` slots. Shrinking drops the
    /// surplus elements and keeps the capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if growing requires storage that cannot be allocated.
    /// The vector is left unchanged in that case.
    pub fn resize_with(&mut self, new_len: usize, f: impl FnMut() -> T) -> crate::Result<()> {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        self.reserve(new_len)?;
        self.fill_to(new_len, f);

        Ok(())
    }

    /// Appends an element to the back of the vector.
    ///
    /// If the vector is full, the capacity doubles first (or becomes 1 for an empty vector).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if growing the vector fails. The vector is left unchanged
    /// and `value` is dropped.
    pub fn push(&mut self, value: T) -> crate::Result<()> {
        self.grow_if_full()?;
        self.push_within_capacity(value);

        Ok(())
    }

    /// Inserts an element at `index`, shifting all elements after it one position to the right.
    ///
    /// If the vector is full, the capacity doubles first, exactly as in [`push()`][Self::push].
    /// Returns `index`, which is where the inserted element now lives.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if growing the vector fails. The vector is left unchanged
    /// and `value` is dropped.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than [`len()`][Self::len].
    ///
    /// # Example
    ///
    /// ```rust
    /// use simple_vec::simple_vec;
    ///
    /// let mut vec = simple_vec!['a', 'c'];
    /// let position = vec.insert(1, 'b')?;
    ///
    /// assert_eq!(vec[position], 'b');
    /// assert_eq!(vec, ['a', 'b', 'c']);
    /// # Ok::<(), simple_vec::Error>(())
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> crate::Result<usize> {
        assert!(
            index <= self.len,
            "insertion index {index} is out of bounds for vector of length {}",
            self.len
        );

        // The position is an index, not a pointer, so it survives the reallocation.
        self.grow_if_full()?;

        // Cannot underflow, guarded by the assertion above.
        let shifted = self.len.wrapping_sub(index);

        // SAFETY: `index <= len < capacity`, so the result is in bounds.
        let hole = unsafe { self.buffer.as_mut_ptr().add(index) };

        // SAFETY: `index + 1 <= len < capacity`, so the result is in bounds.
        let after_hole = unsafe { hole.add(1) };

        // SAFETY: Moves the live elements `index..len` to `index + 1..len + 1`, which is within
        // capacity. `ptr::copy` tolerates the overlap between source and destination.
        unsafe {
            ptr::copy(hole, after_hole, shifted);
        }

        // SAFETY: The slot at `index` was vacated above, so writing does not leak a live value.
        unsafe {
            hole.write(value);
        }

        // Cannot overflow because `len < capacity` before the insertion.
        self.len = self.len.wrapping_add(1);

        Ok(index)
    }

    /// Removes and returns the last element, or `None` if the vector is empty.
    pub fn pop(&mut self) -> Option<T> {
        let new_len = self.len.checked_sub(1)?;
        self.len = new_len;

        // SAFETY: `new_len` is less than the old length, so it is within capacity.
        let slot = unsafe { self.buffer.slot_unchecked(new_len) };

        // SAFETY: The slot held the last live element, which we now take ownership of. The vector
        // no longer considers the slot live, so the value is not dropped twice.
        Some(unsafe { slot.assume_init_read() })
    }

    /// Drops the last element. Does nothing if the vector is empty.
    pub fn pop_back(&mut self) {
        drop(self.pop());
    }

    /// Removes and returns the element at `index`, shifting all elements after it one position
    /// to the left.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`len()`][Self::len].
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "removal index {index} is out of bounds for vector of length {}",
            self.len
        );

        // Cannot underflow, guarded by the assertion above.
        let new_len = self.len.wrapping_sub(1);
        let shifted = new_len.wrapping_sub(index);

        // SAFETY: `index < len`, so the result is in bounds.
        let hole = unsafe { self.buffer.as_mut_ptr().add(index) };

        // SAFETY: `index + 1 <= len`, so the result is in bounds or one past the live range.
        let after_hole = unsafe { hole.add(1) };

        // SAFETY: The slot at `index` is live; we take ownership of the value, leaving the slot
        // vacant to be overwritten by the shift below.
        let value = unsafe { hole.read() };

        // SAFETY: Moves the live elements `index + 1..len` to `index..len - 1`.
        // `ptr::copy` tolerates the overlap between source and destination.
        unsafe {
            ptr::copy(after_hole, hole, shifted);
        }

        self.len = new_len;

        value
    }

    /// Drops the element at `index`, shifting all elements after it one position to the left.
    ///
    /// Returns the index of the element that followed the erased one, which is equal to the new
    /// [`len()`][Self::len] if the erased element was the last one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`len()`][Self::len].
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Exchanges the contents of two vectors, including their capacities, without touching
    /// any elements.
    pub fn swap_with(&mut self, other: &mut Self) {
        self.buffer.swap(&mut other.buffer);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator that allows modifying each element.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Grows the capacity by the doubling policy if there is no vacant slot.
    fn grow_if_full(&mut self) -> crate::Result<()> {
        if self.len < self.capacity() {
            return Ok(());
        }

        let new_capacity = grown_capacity(self.capacity())
            .ok_or_else(|| Error::allocation::<T>(usize::MAX))?;

        self.reserve(new_capacity)
    }

    /// Writes `value` into the first vacant slot.
    ///
    /// # Panics
    ///
    /// Panics if the vector is full. Callers are expected to have grown it already.
    fn push_within_capacity(&mut self, value: T) {
        assert!(
            self.len < self.capacity(),
            "no vacant slot for a new element in vector of capacity {}",
            self.capacity()
        );

        // SAFETY: Guarded by the assertion above.
        let slot = unsafe { self.buffer.slot_unchecked_mut(self.len) };
        slot.write(value);

        // Cannot overflow because `len < capacity` before the write.
        self.len = self.len.wrapping_add(1);
    }

    /// Appends values produced by `f` until the vector has `new_len` elements.
    ///
    /// The capacity must already be sufficient. If `f` panics, the values produced so far
    /// remain in the vector and are dropped with it.
    fn fill_to(&mut self, new_len: usize, mut f: impl FnMut() -> T) {
        while self.len < new_len {
            self.push_within_capacity(f());
        }
    }

    /// Appends clones of `values`. The capacity must already be sufficient.
    fn extend_from_slice_within_capacity(&mut self, values: &[T])
    where
        T: Clone,
    {
        for value in values {
            self.push_within_capacity(value.clone());
        }
    }

    /// Hands the storage over to an owning iterator, leaving this vector empty.
    fn take_storage(&mut self) -> (OwnedBuffer<T>, usize) {
        let len = mem::replace(&mut self.len, 0);
        (mem::take(&mut self.buffer), len)
    }
}

impl<T: Default> SimpleVec<T> {
    /// Creates a vector of `len` default-valued elements, with a capacity of exactly `len`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the storage cannot be allocated.
    pub fn with_len(len: usize) -> crate::Result<Self> {
        Self::repeat_with(len, T::default)
    }

    /// Resizes the vector to `new_len`, filling new slots with default values.
    ///
    /// Growing beyond the capacity first reserves exactly `new_len` slots. Shrinking drops the
    /// surplus elements and keeps the capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if growing requires storage that cannot be allocated.
    /// The vector is left unchanged in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use simple_vec::simple_vec;
    ///
    /// let mut vec = simple_vec![1, 2, 3];
    ///
    /// vec.resize(5)?;
    /// assert_eq!(vec, [1, 2, 3, 0, 0]);
    ///
    /// vec.resize(1)?;
    /// assert_eq!(vec, [1]);
    /// assert_eq!(vec.capacity(), 5);
    /// # Ok::<(), simple_vec::Error>(())
    /// ```
    pub fn resize(&mut self, new_len: usize) -> crate::Result<()> {
        self.resize_with(new_len, T::default)
    }
}

impl<T: Clone> SimpleVec<T> {
    /// Creates a vector of `len` clones of `value`, with a capacity of exactly `len`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the storage cannot be allocated.
    pub fn from_elem(len: usize, value: T) -> crate::Result<Self> {
        Self::repeat_with(len, || value.clone())
    }

    /// Creates a deep copy of the vector, with a capacity equal to its length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the storage for the copy cannot be allocated.
    pub fn try_clone(&self) -> crate::Result<Self> {
        let mut copy = Self::with_capacity(self.len)?;
        copy.extend_from_slice_within_capacity(self.as_slice());
        Ok(copy)
    }

    /// Replaces the contents of this vector with a deep copy of `source`.
    ///
    /// The copy is completed before anything in `self` is touched, so if copying fails (or an
    /// element's `clone()` panics) this vector keeps its previous contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the storage for the copy cannot be allocated.
    pub fn try_clone_from(&mut self, source: &Self) -> crate::Result<()> {
        let mut copy = source.try_clone()?;
        self.swap_with(&mut copy);
        Ok(())
    }
}

/// The capacity after one step of the doubling growth policy, or `None` on overflow.
fn grown_capacity(capacity: usize) -> Option<usize> {
    capacity.checked_mul(2).map(|doubled| doubled.max(1))
}

impl<T> Default for SimpleVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for SimpleVec<T> {
    fn drop(&mut self) {
        // The buffer releases the memory when it is dropped after us.
        self.clear();
    }
}

impl<T: Clone> Clone for SimpleVec<T> {
    fn clone(&self) -> Self {
        self.try_clone()
            .expect("allocation failure when cloning a vector is not recoverable")
    }

    fn clone_from(&mut self, source: &Self) {
        self.try_clone_from(source)
            .expect("allocation failure when cloning a vector is not recoverable");
    }
}

impl<T> Deref for SimpleVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for SimpleVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for SimpleVec<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for SimpleVec<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for SimpleVec<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for SimpleVec<T> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for SimpleVec<T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: fmt::Debug> fmt::Debug for SimpleVec<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, U> PartialEq<SimpleVec<U>> for SimpleVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &SimpleVec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U> PartialEq<[U]> for SimpleVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U> PartialEq<&[U]> for SimpleVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for SimpleVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SimpleVec<T> {}

impl<T: PartialOrd> PartialOrd for SimpleVec<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        PartialOrd::partial_cmp(self.as_slice(), other.as_slice())
    }
}

impl<T: Ord> Ord for SimpleVec<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(self.as_slice(), other.as_slice())
    }
}

impl<T: Hash> Hash for SimpleVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(self.as_slice(), state);
    }
}

impl<T> Extend<T> for SimpleVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();

        let (lower, _) = iter.size_hint();
        let required = self.len.saturating_add(lower);

        if required > self.capacity() {
            // At least one doubling step, as in `push()`.
            let doubled = grown_capacity(self.capacity()).unwrap_or(required);

            // The lower bound is only a hint. If it cannot be satisfied, `push` below reports
            // a genuine shortage.
            self.reserve(required.max(doubled)).unwrap_or_default();
        }

        for value in iter {
            self.push(value)
                .expect("allocation failure when extending a vector is not recoverable");
        }
    }
}

impl<T> FromIterator<T> for SimpleVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T, const N: usize> From<[T; N]> for SimpleVec<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Clone> From<&[T]> for SimpleVec<T> {
    fn from(values: &[T]) -> Self {
        let mut vec = Self::with_capacity(values.len())
            .expect("allocation failure when copying a slice is not recoverable");
        vec.extend_from_slice_within_capacity(values);
        vec
    }
}

impl<T> IntoIterator for SimpleVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let (buffer, len) = self.take_storage();
        IntoIter::new(buffer, len)
    }
}

impl<'a, T> IntoIterator for &'a SimpleVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SimpleVec<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

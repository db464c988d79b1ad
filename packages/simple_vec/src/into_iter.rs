use std::iter::FusedIterator;
use std::{fmt, ptr, slice};

use crate::OwnedBuffer;

/// An iterator that moves elements out of a [`SimpleVec`][crate::SimpleVec].
///
/// The iterator takes over the storage of the vector. Elements that are not consumed are
/// dropped together with the iterator.
pub struct IntoIter<T> {
    buffer: OwnedBuffer<T>,

    /// Slots `start..end` hold the elements that have not been yielded yet.
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// Takes over a buffer whose first `len` slots are initialized.
    pub(crate) fn new(buffer: OwnedBuffer<T>, len: usize) -> Self {
        debug_assert!(len <= buffer.len());

        Self {
            buffer,
            start: 0,
            end: len,
        }
    }

    /// The elements that have not been yielded yet.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `start <= end <= capacity`, so the result is in bounds.
        let first = unsafe { self.buffer.as_ptr().add(self.start) };

        // SAFETY: Slots `start..end` are initialized and owned by the iterator.
        unsafe { slice::from_raw_parts(first, self.remaining()) }
    }

    fn remaining(&self) -> usize {
        // Cannot underflow, `start` never passes `end`.
        self.end.wrapping_sub(self.start)
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        let index = self.start;

        // Cannot overflow, `start < end` here.
        self.start = self.start.wrapping_add(1);

        // SAFETY: `index < end <= capacity`, and the slot is no longer counted as remaining,
        // so the value is moved out exactly once.
        let slot = unsafe { self.buffer.slot_unchecked(index) };

        // SAFETY: Slots below `end` that have not been yielded are initialized.
        Some(unsafe { slot.assume_init_read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        // Cannot underflow, `end > start >= 0` here.
        self.end = self.end.wrapping_sub(1);

        // SAFETY: `end` is below the old `end`, so it is within capacity. The slot is no longer
        // counted as remaining, so the value is moved out exactly once.
        let slot = unsafe { self.buffer.slot_unchecked(self.end) };

        // SAFETY: Slots below the old `end` that have not been yielded are initialized.
        Some(unsafe { slot.assume_init_read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.remaining();

        // SAFETY: `start <= capacity`, so the result is in bounds.
        let first = unsafe { self.buffer.as_mut_ptr().add(self.start) };
        let unconsumed = ptr::slice_from_raw_parts_mut(first, remaining);

        // Nothing is left to yield, even if a destructor below panics.
        self.start = self.end;

        // SAFETY: The unconsumed slots are initialized and were never yielded.
        unsafe {
            ptr::drop_in_place(unconsumed);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use crate::{SimpleVec, simple_vec};

    use super::*;

    assert_impl_all!(IntoIter<u32>: Send, Sync, ExactSizeIterator, DoubleEndedIterator);
    assert_not_impl_any!(IntoIter<Rc<u32>>: Send, Sync);

    struct CountsDrops(Rc<Cell<usize>>);

    impl Drop for CountsDrops {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn yields_in_order() {
        let vec = simple_vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let collected: Vec<String> = vec.into_iter().collect();

        assert_eq!(collected, vec!["a", "b", "c"]);
    }

    #[test]
    fn yields_from_both_ends() {
        let mut iter = simple_vec![1, 2, 3, 4].into_iter();

        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.as_slice(), &[2, 3]);
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn empty_vector_yields_nothing() {
        let mut iter = SimpleVec::<u8>::new().into_iter();

        assert_eq!(iter.size_hint(), (0, Some(0)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn drops_unconsumed_elements() {
        let drops = Rc::new(Cell::new(0));
        let mut vec = SimpleVec::new();

        for _ in 0..5 {
            vec.push(CountsDrops(Rc::clone(&drops))).unwrap();
        }

        let mut iter = vec.into_iter();
        drop(iter.next());
        drop(iter.next_back());
        assert_eq!(drops.get(), 2);

        drop(iter);
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn debug_shows_remaining_elements() {
        let mut iter = simple_vec![1, 2, 3].into_iter();
        _ = iter.next();

        assert_eq!(format!("{iter:?}"), "IntoIter([2, 3])");
    }
}

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A growable, contiguous array built from scratch on top of an exclusively owned raw buffer.
//!
//! This package provides two layered types:
//!
//! * [`OwnedBuffer<T>`] is the sole owner of a single heap allocation of `T` slots. It allocates
//!   and releases memory and transfers ownership without copying, but has no idea which of its
//!   slots hold values.
//! * [`SimpleVec<T>`] owns one such buffer and tracks how many of its slots are live. It
//!   implements growth, positional insertion and removal, capacity reservation and value
//!   semantics (deep [`Clone`], lexicographic comparison, hashing).
//!
//! Allocation is fallible: every operation that may allocate returns a [`Result`] with
//! [`Error::Allocation`] when memory cannot be obtained, leaving the vector unchanged.
//!
//! # Example
//!
//! ```rust
//! use simple_vec::{SimpleVec, simple_vec};
//!
//! // Capacity grows by doubling: 0, 1, 2, 4, 8, ...
//! let mut squares = SimpleVec::new();
//! for i in 1..=5_u32 {
//!     squares.push(i * i)?;
//! }
//! assert_eq!(squares, [1, 4, 9, 16, 25]);
//! assert_eq!(squares.capacity(), 8);
//!
//! // Positional mutation shifts the elements that follow.
//! squares.insert(0, 0)?;
//! let next = squares.erase(3);
//! assert_eq!(squares[next], 16);
//! assert_eq!(squares, [0, 1, 4, 16, 25]);
//!
//! // Checked access reports an error instead of panicking.
//! assert!(squares.at(5).is_err());
//!
//! // Vectors compare lexicographically.
//! assert!(simple_vec![1, 2] < simple_vec![1, 3]);
//! assert!(simple_vec![1, 2] < simple_vec![1, 2, 3]);
//! # Ok::<(), simple_vec::Error>(())
//! ```
//!
//! # Reserving capacity up front
//!
//! ```rust
//! use simple_vec::SimpleVec;
//!
//! let mut vec = SimpleVec::with_capacity(10)?;
//! for i in 0..10 {
//!     vec.push(i)?;
//! }
//!
//! // No reallocation was needed.
//! assert_eq!(vec.capacity(), 10);
//! # Ok::<(), simple_vec::Error>(())
//! ```

mod error;
mod into_iter;
mod owned_buffer;
mod simple_vec;

pub use error::Error;
pub(crate) use error::Result;
pub use into_iter::IntoIter;
pub use owned_buffer::OwnedBuffer;
pub use simple_vec::SimpleVec;

/// Creates a [`SimpleVec`] from a list of elements or from a value and a length.
///
/// * `simple_vec![a, b, c]` creates a vector holding the listed elements, in order.
/// * `simple_vec![value; n]` creates a vector of `n` clones of `value`.
///
/// The capacity of the result equals its length.
///
/// # Panics
///
/// Panics if the storage cannot be allocated. Use [`SimpleVec::from_elem()`] or
/// [`SimpleVec::with_capacity()`] to handle allocation failure.
///
/// # Example
///
/// ```rust
/// use simple_vec::simple_vec;
///
/// let letters = simple_vec!['a', 'b', 'c'];
/// assert_eq!(letters.len(), 3);
///
/// let zeros = simple_vec![0_u8; 4];
/// assert_eq!(zeros, [0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! simple_vec {
    () => {
        $crate::SimpleVec::new()
    };
    ($value:expr; $len:expr) => {
        $crate::SimpleVec::from_elem($len, $value)
            .expect("allocation failure in simple_vec! is not recoverable")
    };
    ($($element:expr),+ $(,)?) => {
        $crate::SimpleVec::from([$($element),+])
    };
}

use thiserror::Error;

/// Errors that can occur when operating on a [`SimpleVec`][crate::SimpleVec] or an
/// [`OwnedBuffer`][crate::OwnedBuffer].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Storage for the requested number of slots could not be obtained, either because the
    /// memory allocator refused the request or because the total size in bytes does not fit
    /// into the address space.
    ///
    /// The container that reported this error is left unchanged.
    #[error(
        "cannot allocate storage for {slots} slots of {slot_size} bytes each (alignment {slot_align})"
    )]
    Allocation {
        /// The number of slots that were requested.
        slots: usize,

        /// The size in bytes of a single slot.
        slot_size: usize,

        /// The alignment in bytes of a single slot.
        slot_align: usize,
    },

    /// Checked access was attempted at an index that does not hold a live element.
    #[error("index {index} is out of range for a vector of length {len}")]
    OutOfRange {
        /// The index that was requested.
        index: usize,

        /// The number of live elements at the time of the request.
        len: usize,
    },
}

impl Error {
    pub(crate) fn allocation<T>(slots: usize) -> Self {
        Self::Allocation {
            slots,
            slot_size: size_of::<T>(),
            slot_align: align_of::<T>(),
        }
    }
}

/// A specialized `Result` type for `simple_vec` operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug, Clone);

    #[test]
    fn allocation_error_describes_slot_layout() {
        let error = Error::allocation::<u64>(3);

        assert_eq!(
            error,
            Error::Allocation {
                slots: 3,
                slot_size: 8,
                slot_align: align_of::<u64>(),
            }
        );

        let message = error.to_string();
        assert!(message.contains("3 slots"));
        assert!(message.contains("8 bytes"));
    }

    #[test]
    fn out_of_range_message_names_index_and_len() {
        let error = Error::OutOfRange { index: 5, len: 5 };

        assert_eq!(
            error.to_string(),
            "index 5 is out of range for a vector of length 5"
        );

        let result: Result<()> = Err(error);
        assert!(result.is_err());
    }
}

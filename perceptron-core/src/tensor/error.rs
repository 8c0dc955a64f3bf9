/// Represents the errors that can occur while allocating a layer's buffers,
/// sampling parameters, or running a forward/backward pass.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Device is out of memory
    OutOfMemory,
    /// A layer dimension was zero.
    ZeroDimension { operand: &'static str },
    /// A slice handed to a layer did not have the length the layer was built with.
    DimensionMismatch {
        operand: &'static str,
        expected: usize,
        found: usize,
    },
    /// A uniform range with `min >= max`, or with a non-finite bound.
    InvalidRange,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfMemory => f.write_str("out of memory"),
            Self::ZeroDimension { operand } => write!(f, "`{operand}` must be non-zero"),
            Self::DimensionMismatch {
                operand,
                expected,
                found,
            } => write!(
                f,
                "length mismatch for `{operand}`: expected {expected} elements, found {found}"
            ),
            Self::InvalidRange => f.write_str("uniform range requires finite bounds with min < max"),
        }
    }
}

impl std::error::Error for Error {}

/// Fails with [Error::DimensionMismatch] unless `found == expected`.
#[inline]
pub(crate) fn check_len(operand: &'static str, expected: usize, found: usize) -> Result<(), Error> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            operand,
            expected,
            found,
        })
    }
}

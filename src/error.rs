//! Crate-wide error taxonomy.
//!
//! Every fallible operation in `simcore` returns one of these variants.
//! Absence (a missing key, an unreachable node) is modelled as `Option`,
//! not as an error — see module docs on each container for which methods
//! use which convention.

/// Errors produced by the containers and algorithms in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A key passed to a keyed container was `>= max_key`.
    #[error("key {0} is out of range")]
    KeyOutOfRange(u64),
    /// A container's element count would exceed its representable capacity.
    #[error("capacity exceeded")]
    CapacityExceeded,
    /// An item expected to be present in a container was not found.
    #[error("item not found")]
    ItemNotFound,
    /// No path exists between the requested endpoints.
    #[error("no path exists")]
    PathNotFound,
    /// A size computation would overflow its representable range.
    #[error("size overflow")]
    SizeOverflow,
    /// An allocation failed.
    #[error("out of memory")]
    OutOfMemory,
}

/// Convenience alias used throughout the crate.
pub type CoreResult<T> = Result<T, CoreError>;

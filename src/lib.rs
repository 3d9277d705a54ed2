//! Bitsets for marking which positions of a large, initially unknown sized index space have
//! been visited.
//!
//! - [`Bitset`] grows on demand and is meant for single-threaded use.
//! - [`SyncBitset`] is the same bitset behind a single lock, for sharing between threads.
//! - [`FixedBitset`] has a capacity fixed at compile time and also tracks how many bits are set
//!   and the highest set bit.
//!
//! All three pack bit `i` into bit `i % 32` of the 32 bit word `i / 32`.
//!
//! ### Allocation failure
//! None of the types return allocation errors. If storage can't be allocated the error is
//! logged via `tracing`, the optional failure message is written to stderr, and the process
//! exits with status 1.

pub use bitset::Bitset;
pub use fixed::FixedBitset;
pub use sync::SyncBitset;

mod bitset;
mod fixed;
mod sync;
mod words;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub(crate) enum AllocError {
    #[error("bitset capacity overflows usize")]
    CapacityOverflow,
    #[error("failed to allocate {words} words of bitset storage")]
    OutOfMemory { words: usize },
}

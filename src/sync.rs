use parking_lot::Mutex;

use crate::Bitset;

/// ## A growable bitset that can be shared between threads.
///
/// Marks which indices of a large index space, whose size isn't known up front, have been
/// visited. Storage grows by 50% whenever a bit beyond the current capacity is set.
///
/// ### Concurrency
/// All state sits behind a single [`parking_lot::Mutex`]. Every shared method (`&self`) holds
/// the lock for its whole duration, including any growth it triggers, so calls from different
/// threads are linearized. There is no finer grained locking.
///
/// [`SyncBitset::test_unsync`] reads without taking the lock. It requires `&mut self`, which
/// means the caller already has exclusive access, e.g. after all worker threads were joined.
///
/// ### Allocation failure
/// Allocation failures are not recoverable: the process exits after printing the message passed
/// to [`SyncBitset::with_failure_message`].
pub struct SyncBitset {
    inner: Mutex<Bitset>,
}

impl std::fmt::Debug for SyncBitset {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SyncBitset {{ capacity: {} }}", self.capacity())
    }
}

impl From<Bitset> for SyncBitset {
    fn from(bits: Bitset) -> Self {
        Self {
            inner: Mutex::new(bits),
        }
    }
}

impl SyncBitset {
    pub fn new(requested_bits: usize) -> Self {
        Bitset::new(requested_bits).into()
    }

    /// Like [`SyncBitset::new`], but `message` is written to stderr before the process exits on
    /// an allocation failure, either now or when a later `set` grows the storage.
    ///
    /// The message is kept for the bitset's whole lifetime, so it has to be `'static`.
    pub fn with_failure_message(requested_bits: usize, message: &'static str) -> Self {
        Bitset::with_failure_message(requested_bits, message).into()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn test(&self, bit: usize) -> bool {
        self.inner.lock().test(bit)
    }

    /// Test without locking.
    ///
    /// Only usable with exclusive access (`&mut self`), e.g. once all threads sharing the bitset
    /// have been joined. While other threads may still write, use [`SyncBitset::test`]: there is
    /// no racy, best-effort read.
    pub fn test_unsync(&mut self, bit: usize) -> bool {
        self.inner.get_mut().test(bit)
    }

    /// Sets a bit that hasn't been set before.
    ///
    /// ### Panics
    /// In debug builds, if the bit was already set.
    pub fn set(&self, bit: usize) {
        self.inner.lock().set(bit)
    }

    /// Returns true if the bit was NOT previously already set.
    pub fn set_over(&self, bit: usize) -> bool {
        self.inner.lock().set_over(bit)
    }

    pub fn into_inner(self) -> Bitset {
        self.inner.into_inner()
    }
}

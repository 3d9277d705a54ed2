use crate::words::{self, BITS_PER_WORD, OrExit, Word};

/// A growable, unsynchronized bitset.
///
/// Bits are packed into 32 bit words. Setting a bit beyond the current capacity grows the
/// storage by 50% (rounded up to a whole word) as many times as needed. Reading a bit beyond
/// the capacity returns `false`.
///
/// If an allocation fails the process exits, printing the failure message given to
/// [`Bitset::with_failure_message`] to stderr first.
pub struct Bitset {
    words: Vec<Word>,
    failure_message: Option<&'static str>,
}

impl std::fmt::Debug for Bitset {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Bitset {{ capacity: {} }}", self.capacity())
    }
}

impl Bitset {
    /// Allocates enough words for `requested_bits` bits.
    pub fn new(requested_bits: usize) -> Self {
        Self::build(requested_bits, None)
    }

    /// Like [`Bitset::new`], but `message` is written to stderr before the process exits on an
    /// allocation failure, either now or when a later `set` grows the storage.
    ///
    /// The message is kept for the bitset's whole lifetime, so it has to be `'static`
    /// (usually a string literal).
    pub fn with_failure_message(requested_bits: usize, message: &'static str) -> Self {
        Self::build(requested_bits, Some(message))
    }

    fn build(requested_bits: usize, failure_message: Option<&'static str>) -> Self {
        let words = words::alloc(words::words_for(requested_bits)).or_exit(failure_message);
        Self {
            words,
            failure_message,
        }
    }

    /// Number of addressable bits. Always a multiple of 32 and never shrinks.
    pub fn capacity(&self) -> usize {
        self.words.len() * BITS_PER_WORD
    }

    pub fn test(&self, bit: usize) -> bool {
        words::get(&self.words, bit)
    }

    /// Sets a bit that hasn't been set before.
    ///
    /// Setting an already set bit is a bug in the caller and trips a debug assertion.
    pub fn set(&mut self, bit: usize) {
        self.reserve(bit);
        let newly_set = words::set(&mut self.words, bit);
        debug_assert!(newly_set, "bit {bit} was already set");
    }

    /// Sets a bit that might already be set.
    /// Returns true if the bit was NOT previously already set.
    pub fn set_over(&mut self, bit: usize) -> bool {
        self.reserve(bit);
        words::set(&mut self.words, bit)
    }

    fn reserve(&mut self, bit: usize) {
        if bit >= self.capacity() {
            words::grow(&mut self.words, bit).or_exit(self.failure_message);
        }
    }
}

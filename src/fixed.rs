use std::fmt::{self, Write as _};

use crate::words::{self, OrExit, Word};

/// A bitset with a fixed capacity of `N` bits.
///
/// Besides the bits themselves it tracks how many bits are set ([`FixedBitset::count`]) and
/// one past the highest set bit ([`FixedBitset::size`]). It never grows: every index must be
/// less than `N`.
#[derive(Clone)]
pub struct FixedBitset<const N: usize> {
    words: Box<[Word]>,
    count: usize,
    size: usize,
}

impl<const N: usize> FixedBitset<N> {
    const WORDS: usize = words::words_for(N);

    /// Allocates the storage for `N` bits. Exits the process if that allocation fails.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Like [`FixedBitset::new`], but `message` is written to stderr before the process exits
    /// on an allocation failure. The storage never grows, so the message is only needed here.
    pub fn with_failure_message(message: &str) -> Self {
        Self::build(Some(message))
    }

    fn build(failure_message: Option<&str>) -> Self {
        Self {
            words: words::alloc(Self::WORDS)
                .or_exit(failure_message)
                .into_boxed_slice(),
            count: 0,
            size: 0,
        }
    }

    /// Unsets all bits and resets [`count`](Self::count) and [`size`](Self::size) to 0.
    pub fn clear(&mut self) {
        self.words.fill(0);
        self.count = 0;
        self.size = 0;
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// ### Panics
    /// `bit >= N`
    pub fn test(&self, bit: usize) -> bool {
        assert!(bit < N, "bit {bit} out of range for FixedBitset<{N}>");
        words::get(&self.words, bit)
    }

    /// Sets a bit that hasn't been set before.
    ///
    /// ### Panics
    /// `bit >= N`, or in debug builds, if the bit was already set.
    pub fn set(&mut self, bit: usize) {
        let newly_set = self.set_bit(bit);
        debug_assert!(newly_set, "bit {bit} was already set");
    }

    /// Sets a bit that might already be set. Only a newly set bit is added to the count.
    /// Returns true if the bit was NOT previously already set.
    ///
    /// ### Panics
    /// `bit >= N`
    pub fn set_over(&mut self, bit: usize) -> bool {
        self.set_bit(bit)
    }

    fn set_bit(&mut self, bit: usize) -> bool {
        assert!(bit < N, "bit {bit} out of range for FixedBitset<{N}>");
        let newly_set = words::set(&mut self.words, bit);
        if newly_set {
            self.count += 1;
        }
        self.size = self.size.max(bit + 1);
        newly_set
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.count
    }

    /// One past the highest set bit, 0 if no bit is set.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Bits from `size() - 1` down to 0 as `'1'`s and `'0'`s.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl<const N: usize> Default for FixedBitset<N> {
    fn default() -> Self {
        Self::new()
    }
}

// Only the words are compared, count and size follow from them.
impl<const N: usize> PartialEq for FixedBitset<N> {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl<const N: usize> Eq for FixedBitset<N> {}

impl<const N: usize> fmt::Display for FixedBitset<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in (0..self.size).rev() {
            f.write_char(if words::get(&self.words, bit) { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for FixedBitset<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FixedBitset<{N}> {{ count: {}, size: {}, bits: \"{self}\" }}",
            self.count, self.size
        )
    }
}

//! Word-packed bit storage shared by every bitset in this crate.
//!
//! Bit `i` lives in word `i / 32` at offset `i % 32`, least significant bit first.
//! All allocation goes through [`alloc`] and [`grow`], whose errors are turned into
//! a process exit by [`OrExit::or_exit`].

use tracing::{error, trace};

use crate::AllocError;

pub(crate) type Word = u32;

pub(crate) const BITS_PER_WORD: usize = Word::BITS as usize;

#[inline]
fn word_and_mask(bit: usize) -> (usize, Word) {
    (bit / BITS_PER_WORD, 1 << (bit % BITS_PER_WORD))
}

/// Number of words allocated for a requested size. Always at least one.
#[inline]
pub(crate) const fn words_for(requested_bits: usize) -> usize {
    requested_bits / BITS_PER_WORD + 1
}

/// Bits past the end of `words` read as unset.
#[inline]
pub(crate) fn get(words: &[Word], bit: usize) -> bool {
    let (word, mask) = word_and_mask(bit);
    words.get(word).is_some_and(|w| w & mask != 0)
}

/// Returns true if the bit was NOT previously already set.
///
/// ### Panics
/// `bit` is not backed by `words`.
#[inline]
pub(crate) fn set(words: &mut [Word], bit: usize) -> bool {
    let (word, mask) = word_and_mask(bit);
    let before = words[word];
    words[word] |= mask;
    before & mask == 0
}

/// Allocates `len` zeroed words.
pub(crate) fn alloc(len: usize) -> Result<Vec<Word>, AllocError> {
    let mut words = Vec::new();
    words
        .try_reserve_exact(len)
        .map_err(|_| AllocError::OutOfMemory { words: len })?;
    words.resize(len, 0);
    Ok(words)
}

/// Capacity in bits after a single growth step: 50% more, rounded up to a whole word.
pub(crate) fn expanded(capacity: usize) -> Result<usize, AllocError> {
    capacity
        .checked_add(capacity / 2)
        .and_then(|bits| bits.checked_next_multiple_of(BITS_PER_WORD))
        .ok_or(AllocError::CapacityOverflow)
}

/// Grows `words` until `bit` is addressable.
///
/// Growth steps are applied repeatedly, but the storage is only reallocated once for the
/// final capacity. Existing words are kept as they are and the new tail is zeroed.
pub(crate) fn grow(words: &mut Vec<Word>, bit: usize) -> Result<(), AllocError> {
    debug_assert!(!words.is_empty());

    let old = words.len() * BITS_PER_WORD;
    let mut capacity = old;
    while bit >= capacity {
        let next = expanded(capacity)?;
        debug_assert!(next > capacity);
        capacity = next;
    }
    if capacity == old {
        return Ok(());
    }

    trace!(from = old, to = capacity, bit, "expanding bitset");

    let len = capacity / BITS_PER_WORD;
    words
        .try_reserve_exact(len - words.len())
        .map_err(|_| AllocError::OutOfMemory { words: len })?;
    words.resize(len, 0);
    Ok(())
}

/// The single place an allocation error ends up. There is no way to make progress without
/// the storage, so the process exits after printing the caller supplied message.
#[cold]
pub(crate) fn fatal(err: AllocError, message: Option<&str>) -> ! {
    error!(%err, "bitset allocation failed");
    if let Some(message) = message {
        eprint!("{message}");
    }
    std::process::exit(1)
}

pub(crate) trait OrExit<T> {
    fn or_exit(self, message: Option<&str>) -> T;
}

impl<T> OrExit<T> for Result<T, AllocError> {
    #[inline]
    fn or_exit(self, message: Option<&str>) -> T {
        match self {
            Ok(value) => value,
            Err(err) => fatal(err, message),
        }
    }
}

/// Set in the child process started by [`run_child`].
#[cfg(test)]
pub(crate) const CHILD_ENV: &str = "GROWBITS_EXIT_CHILD";

/// Runs the single test `test` (full path, e.g. `bitset::tests::name`) of the current test
/// binary in a child process with [`CHILD_ENV`] set.
///
/// Used for the fatal allocation path, which exits the process instead of panicking.
#[cfg(test)]
pub(crate) fn run_child(test: &str) -> std::process::Output {
    std::process::Command::new(std::env::current_exe().unwrap())
        .args([test, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .unwrap()
}

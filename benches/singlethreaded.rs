use divan::{Bencher, black_box};
use growbits::{Bitset, FixedBitset, SyncBitset};
use rand::seq::SliceRandom;

const LENS: &[usize] = &[1_000, 10_000, 20_000];
const MAX_LEN: usize = 20_000;

fn main() {
    divan::main();
}

#[divan::bench(types = [Vec<bool>, Bitset, SyncBitset, FixedBitset<MAX_LEN>], args = LENS)]
fn set_sequential<B: Bits>(bencher: Bencher, len: usize) {
    bencher.with_inputs(B::new).bench_values(|mut bits| {
        for bit in 0..len {
            bits.set_over(black_box(bit));
        }
        bits
    })
}

#[divan::bench(types = [Vec<bool>, Bitset, SyncBitset, FixedBitset<MAX_LEN>], args = LENS)]
fn set_random<B: Bits>(bencher: Bencher, len: usize) {
    let mut order: Vec<_> = (0..len).collect();
    order.shuffle(&mut rand::rng());

    bencher.with_inputs(B::new).bench_values(|mut bits| {
        for bit in order.iter() {
            bits.set_over(black_box(*bit));
        }
        bits
    })
}

#[divan::bench(types = [Vec<bool>, Bitset, SyncBitset, FixedBitset<MAX_LEN>], args = LENS)]
fn test_random<B: Bits>(bencher: Bencher, len: usize) {
    let mut bits = B::new();
    for bit in (0..len).step_by(3) {
        bits.set_over(bit);
    }
    let mut order: Vec<_> = (0..len).collect();
    order.shuffle(&mut rand::rng());

    bencher.bench(|| {
        for bit in order.iter() {
            black_box(bits.test(black_box(*bit)));
        }
    })
}

trait Bits: Send + Sync {
    /// Starts small so growable implementations have to grow.
    fn new() -> Self;
    fn set_over(&mut self, bit: usize);
    fn test(&self, bit: usize) -> bool;
}

impl Bits for Bitset {
    fn new() -> Self {
        Bitset::new(0)
    }

    fn set_over(&mut self, bit: usize) {
        self.set_over(bit);
    }

    fn test(&self, bit: usize) -> bool {
        self.test(bit)
    }
}

impl Bits for SyncBitset {
    fn new() -> Self {
        SyncBitset::new(0)
    }

    fn set_over(&mut self, bit: usize) {
        SyncBitset::set_over(self, bit);
    }

    fn test(&self, bit: usize) -> bool {
        SyncBitset::test(self, bit)
    }
}

impl<const N: usize> Bits for FixedBitset<N> {
    fn new() -> Self {
        FixedBitset::new()
    }

    fn set_over(&mut self, bit: usize) {
        FixedBitset::set_over(self, bit);
    }

    fn test(&self, bit: usize) -> bool {
        FixedBitset::test(self, bit)
    }
}

impl Bits for Vec<bool> {
    fn new() -> Self {
        Vec::new()
    }

    fn set_over(&mut self, bit: usize) {
        if bit >= self.len() {
            self.resize(bit + 1, false);
        }
        self[bit] = true;
    }

    fn test(&self, bit: usize) -> bool {
        self.get(bit).copied().unwrap_or(false)
    }
}

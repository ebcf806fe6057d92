use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

/// Integer source used by the deck shuffle.
pub trait RangeRng {
    /// Returns a value in `min..max`.
    fn range(&mut self, min: usize, max: usize) -> usize;
}

/// Maps a raw 32-bit draw into a range with a plain modulo.
///
/// The modulo is biased for ranges that do not divide 2^32. For 52 cards the
/// bias is below one part in 80 million and is kept as is.
#[derive(Debug, Clone)]
pub struct ModuloRng<R> {
    source: R,
}

impl ModuloRng<OsRng> {
    pub fn from_os() -> Self {
        Self { source: OsRng }
    }
}

impl ModuloRng<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self {
            source: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: RngCore> ModuloRng<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: RngCore> RangeRng for ModuloRng<R> {
    fn range(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(max > min, "empty range {min}..{max}");
        let span = (max - min) as u64;
        (u64::from(self.source.next_u32()) % span) as usize + min
    }
}

impl<T: RangeRng + ?Sized> RangeRng for &mut T {
    fn range(&mut self, min: usize, max: usize) -> usize {
        (**self).range(min, max)
    }
}

//! Deterministic simulation RNG wrapper.
//!
//! # Determinism strategy
//!
//! Each engine owns exactly one `SimRng`.  There is no global generator and
//! no per-agent stream: every draw is taken from the engine's single stream
//! in a fixed order, so the same seed and the same call sequence reproduce
//! the same state bit for bit.
//!
//! The draw order that callers rely on is documented on the engine
//! operations that consume randomness.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG, owned by one engine instance.
///
/// `SimRng` is `Send` but not meant to be shared: the engine that owns it
/// takes `&mut self` for every operation that draws from it.
pub struct SimRng(SmallRng);

impl SimRng {
    /// Seed deterministically.
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from operating-system entropy.  Runs are not reproducible.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Seed from `Some(seed)`, or from entropy for `None`.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => SimRng::new(s),
            None    => SimRng::from_entropy(),
        }
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform index into a collection of `len` elements.
    /// Returns `None` (and draws nothing) if `len == 0`.
    #[inline]
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.gen_range(0..len))
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        self.choose_index(slice.len()).map(|i| &slice[i])
    }
}

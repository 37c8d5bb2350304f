//! Randomness consumed by the turn engine.
//!
//! The engine only ever asks for two primitives, expressed by
//! [`RandomSource`]:
//!
//! - `uniform_int(low, high)`: dice faces, collision survivor, swap target
//! - `uniform_float()`: roulette rotation, random_big direction
//!
//! ## Determinism
//!
//! [`GameRng`] is the default source. The same seed replays the same game.
//!
//! ```
//! use sugoroku::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.uniform_int(1, 6), b.uniform_int(1, 6));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniform random values.
pub trait RandomSource {
    /// Uniform integer in `low..=high`.
    fn uniform_int(&mut self, low: i32, high: i32) -> i32;

    /// Uniform float in `[0, 1)`.
    fn uniform_float(&mut self) -> f64;

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    fn uniform_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "cannot pick from an empty collection");
        self.uniform_int(0, len.saturating_sub(1) as i32) as usize
    }
}

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn uniform_int(&mut self, low: i32, high: i32) -> i32 {
        self.inner.gen_range(low..=high)
    }

    fn uniform_float(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform_int(&mut self, low: i32, high: i32) -> i32 {
        (**self).uniform_int(low, high)
    }

    fn uniform_float(&mut self) -> f64 {
        (**self).uniform_float()
    }
}

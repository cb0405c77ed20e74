use sha2::{Digest as _, Sha256};

/// A stream of uniform doubles in `[0, 1)`.
///
/// Every higher-level random operation is derived from repeated [`next_f64`] draws, so
/// two sources that yield the same doubles produce the same definitions.
///
/// [`next_f64`]: RandomSource::next_f64
pub trait RandomSource {
    /// Draw the next double in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}

/// Mints one [`RandomSource`] per tree position.
pub trait Seeder: Send + Sync {
    /// Build the generator for `path` (keys from `$root` to the node, inclusive).
    fn rng_for(&self, base_seed: &str, path: &[&str]) -> Box<dyn RandomSource>;
}

/// Small deterministic generator (SplitMix64).
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Generator starting from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Next double in `[0, 1)`.
    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

impl RandomSource for Rng64 {
    fn next_f64(&mut self) -> f64 {
        self.next_f64_01()
    }
}

/// Default seeder: SHA-256 of `"<base>::<k0>.<k1>..."` folded into a [`Rng64`].
#[derive(Clone, Copy, Debug, Default)]
pub struct HashSeeder;

impl HashSeeder {
    /// The 64-bit seed for a position.
    pub fn seed_u64(base_seed: &str, path: &[&str]) -> u64 {
        let mut h = Sha256::new();
        h.update(base_seed.as_bytes());
        h.update(b"::");
        for (i, key) in path.iter().enumerate() {
            if i > 0 {
                h.update(b".");
            }
            h.update(key.as_bytes());
        }
        let digest = h.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(bytes)
    }
}

impl Seeder for HashSeeder {
    fn rng_for(&self, base_seed: &str, path: &[&str]) -> Box<dyn RandomSource> {
        Box::new(Rng64::new(Self::seed_u64(base_seed, path)))
    }
}

/// `floor(draw * (max_excl - min)) + min`, one draw.
///
/// The arithmetic runs in `f64`, so any pair of `i64` bounds is accepted; results past
/// the `i64` range saturate.
pub fn random_int(rng: &mut dyn RandomSource, min: i64, max_excl: i64) -> i64 {
    let span = max_excl as f64 - min as f64;
    ((rng.next_f64() * span).floor() + min as f64) as i64
}

/// Fisher–Yates from the back: for `i` in `len-1..=1` draw `random_int(0, i + 1)`.
pub fn shuffle_in_place<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = random_int(rng, 0, i as i64 + 1) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;

//! Deterministic randomness for launch impulses and cosmetic sound cues.
//!
//! Every random roll is derived from a seed built with [`compute_seed`], so a
//! replay of the same world seed and tick sequence makes the same choices.

/// Stateless seeded random source.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform float in `[0, 1)`.
    fn next_f32(&self, seed: u64) -> f32 {
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }

    /// `true` with probability `1 / n`. `n == 0` never succeeds.
    fn one_in(&self, seed: u64, n: u32) -> bool {
        n != 0 && self.next_u32(seed) % n == 0
    }

    /// Random sign, `-1.0` or `1.0`.
    fn sign(&self, seed: u64) -> f32 {
        if self.next_u32(seed) & 1 == 0 { -1.0 } else { 1.0 }
    }
}

/// PCG-XSH-RR generator evaluated on a single step from the seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Roll identifiers so two rolls in the same tick never share a seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    LaunchSpeedX = 0,
    LaunchSpeedY = 1,
    LaunchSignX = 2,
    LaunchSignY = 3,
    NudgeChime = 4,
    Sparkle = 5,
    /// Host-side spawn roll for a new helper.
    SpawnRoll = 6,
}

/// Combines the world seed, tick, entity and roll into one seed.
pub fn compute_seed(world_seed: u64, tick: u64, entity: u32, context: RollContext) -> u64 {
    let mut hash = world_seed;
    hash ^= tick.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (entity as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u32 as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

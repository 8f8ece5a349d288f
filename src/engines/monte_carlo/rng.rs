//! Deterministic per-request pseudo-random source.
//!
//! The engine uses PCG XSL-RR 128/64 ("PCG64") with SplitMix64 seed
//! expansion. The generator implements [`rand::RngCore`], so the
//! `rand_distr` distributions drive it directly. Identical seeds produce
//! identical streams on every platform; this, together with the fixed
//! draw order in the sampler, is the determinism contract of the engine.
//!
//! Reference: O'Neill, *PCG: A Family of Simple Fast Space-Efficient
//! Statistically Good Algorithms for Random Number Generation* (2014).

use rand::RngCore;

/// PCG XSL-RR 128/64 generator.
#[derive(Debug, Clone)]
pub struct Pcg64 {
    state: u128,
    inc: u128,
}

impl Pcg64 {
    const MULTIPLIER: u128 = 47026247687942121848144207491837523525;

    /// Seeds state and stream selector through a SplitMix64 expansion, so
    /// small integer seeds still start from well-mixed state.
    pub fn seed_from_u64(seed: u64) -> Self {
        let mut sm = SplitMix64::new(seed);
        let state_hi = sm.next_u64() as u128;
        let state_lo = sm.next_u64() as u128;
        let stream = sm.next_u64() as u128;

        let mut rng = Self {
            state: 0,
            inc: (stream << 1) | 1,
        };

        rng.state = (state_hi << 64) | state_lo;
        let _ = rng.next_raw();
        rng
    }

    #[inline]
    fn next_raw(&mut self) -> u64 {
        let oldstate = self.state;
        self.state = oldstate
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(self.inc);

        // XSL-RR output permutation.
        let xorshifted = ((oldstate >> 64) ^ oldstate) as u64;
        let rot = (oldstate >> 122) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngCore for Pcg64 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_raw() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.next_raw()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let mut chunks = dst.chunks_exact_mut(8);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.next_raw().to_le_bytes());
        }
        let rest = chunks.into_remainder();
        if !rest.is_empty() {
            let bytes = self.next_raw().to_le_bytes();
            rest.copy_from_slice(&bytes[..rest.len()]);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    #[inline]
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

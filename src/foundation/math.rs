/// Deterministic SplitMix64 generator. All stroke randomness is drawn from one of these so the
/// same (region, segment, seed) always produces the same geometry.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    pub(crate) fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform in `[-0.5, 0.5)`.
    pub(crate) fn centered(&mut self) -> f64 {
        self.next_f64_01() - 0.5
    }

    /// Uniform in `[lo, hi)`.
    pub(crate) fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64_01()
    }

    pub(crate) fn coin(&mut self) -> bool {
        self.next_f64_01() > 0.5
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Seed for one segment's geometry. Stable across runs and generations.
pub(crate) fn segment_seed(region: &str, index: usize, seed: u64) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(region.as_bytes());
    h.write_u64(index as u64);
    h.write_u64(seed);
    h.finish()
}

/// Linearly remap `value` from `[low1, high1]` to `[low2, high2]`.
///
/// A degenerate source range maps everything to `low2`.
pub(crate) fn map_range(value: f64, low1: f64, high1: f64, low2: f64, high2: f64) -> f64 {
    let span = high1 - low1;
    if span == 0.0 {
        return low2;
    }
    low2 + (high2 - low2) * (value - low1) / span
}

/// Point on a 1-D quadratic Bezier at `t`.
pub(crate) fn quad_bezier(t: f64, p0: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    u * u * p0 + 2.0 * u * t * p1 + t * t * p2
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

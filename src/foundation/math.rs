#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
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

/// Seeded FNV-1a 64 over a string key.
pub(crate) fn stable_hash64(seed: u64, s: &str) -> u64 {
    let mut h = Fnv1a64::new(Fnv1a64::OFFSET_BASIS ^ seed);
    h.write_bytes(s.as_bytes());
    h.finish()
}

/// Deterministic pseudo-random value in `[0, 1)` for `(seed, index, salt)`.
pub(crate) fn unit_hash(seed: u64, index: u64, salt: u8) -> f64 {
    let mut h = Fnv1a64::new(Fnv1a64::OFFSET_BASIS ^ seed);
    h.write_u64(index);
    h.write_u8(salt);
    // Fold the low bits up; FNV mixes them weakly.
    let v = h.finish();
    let mixed = v ^ (v >> 29) ^ (v << 17);
    (mixed >> 11) as f64 / (1u64 << 53) as f64
}

/// Unclamped linear interpolation.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamp scalar value to normalized range `[0, 1]`.
#[inline]
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Position of `x` within `[a, b]`; `0` when the interval is degenerate.
#[inline]
pub fn inverse_lerp(a: f64, b: f64, x: f64) -> f64 {
    let span = b - a;
    if span == 0.0 { 0.0 } else { (x - a) / span }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

use crate::foundation::error::{FukuwaraiError, FukuwaraiResult};

pub use kurbo::{Affine, Point};

/// Hue angle in whole degrees, always within `[0, 360)`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct Hue(u16);

impl Hue {
    /// Wrap an arbitrary degree value into `[0, 360)`.
    pub fn new(deg: i64) -> Self {
        Self(deg.rem_euclid(360) as u16)
    }

    /// Draw a hue uniformly from the full rotation.
    pub fn random(rng: &mut Rng64) -> Self {
        Self(rng.below(360) as u16)
    }

    /// Degrees in `[0, 360)`.
    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Rotate by `deg` degrees, wrapping around the circle.
    pub fn rotated(self, deg: i64) -> Self {
        Self::new(i64::from(self.0) + deg)
    }
}

impl std::fmt::Display for Hue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Largest accepted width or height.
    pub const MAX_DIM: u32 = 16_384;

    /// Create a validated canvas with dimensions in `1..=MAX_DIM`.
    pub fn new(width: u32, height: u32) -> FukuwaraiResult<Self> {
        if width == 0 || height == 0 {
            return Err(FukuwaraiError::validation(
                "Canvas width and height must be > 0",
            ));
        }
        if width > Self::MAX_DIM || height > Self::MAX_DIM {
            return Err(FukuwaraiError::validation(format!(
                "canvas too large: {width}x{height} (max {0}x{0})",
                Self::MAX_DIM
            )));
        }
        Ok(Self { width, height })
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
        }
    }
}

/// Small deterministic PRNG used for waveform seeds and hues.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform integer in `[0, n)`. Returns 0 when `n == 0`.
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        ((self.next_f64_01() * f64::from(n)) as u32).min(n - 1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

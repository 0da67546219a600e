use crate::{
    foundation::core::Rng64,
    scene::transform::{ORIGIN_Y, Origin, Transform},
};

/// Counter moduli, in `(origin, x, y, scale, rotate)` order.
pub const ORIGIN_PERIOD: u32 = 10;
/// Period of the horizontal offset counter.
pub const X_PERIOD: u32 = 256;
/// Period of the vertical offset counter.
pub const Y_PERIOD: u32 = 256;
/// Period of the scale counter (tenths lattice).
pub const SCALE_PERIOD: u32 = 100;
/// Period of the rotation counter (degrees).
pub const ROTATE_PERIOD: u32 = 360;

const ORIGIN_STEP: u32 = 1;
const X_STEP: u32 = 7;
const Y_STEP: u32 = 3;
const SCALE_STEP: u32 = 1;
const ROTATE_STEP: u32 = 9;

/// Raw counters of the procedural part waveform.
///
/// Each counter cycles independently; the rendered values fold the cycling counters into a
/// bounded back-and-forth sweep. The generator never terminates on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WaveformState {
    /// Pivot counter in `[0, 10)`.
    pub origin: u32,
    /// Horizontal offset counter in `[0, 256)`.
    pub x: u32,
    /// Vertical offset counter in `[0, 256)`.
    pub y: u32,
    /// Scale counter in tenths, `[0, 100)`.
    pub scale: u32,
    /// Rotation counter in degrees, `[0, 360)`.
    pub rotate: u32,
}

/// One frame of part placement produced by the waveform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderedFrame {
    /// Offset, scale and rotation.
    pub transform: Transform,
    /// Pivot for scale and rotation.
    pub origin: Origin,
}

impl WaveformState {
    /// Build a state from raw counters, wrapping each into its modulus.
    pub fn new(origin: u32, x: u32, y: u32, scale: u32, rotate: u32) -> Self {
        Self {
            origin: origin % ORIGIN_PERIOD,
            x: x % X_PERIOD,
            y: y % Y_PERIOD,
            scale: scale % SCALE_PERIOD,
            rotate: rotate % ROTATE_PERIOD,
        }
    }

    /// Draw every counter uniformly from its modulus range.
    pub fn seeded(rng: &mut Rng64) -> Self {
        Self {
            origin: rng.below(ORIGIN_PERIOD),
            x: rng.below(X_PERIOD),
            y: rng.below(Y_PERIOD),
            scale: rng.below(SCALE_PERIOD),
            rotate: rng.below(ROTATE_PERIOD),
        }
    }

    /// Rendered placement for the current counters.
    pub fn render(&self) -> RenderedFrame {
        let origin_x = 50 + (i64::from(self.origin) - 5).abs();
        let tenths = (i64::from(self.scale) - 50).abs() + 5;
        let x = 64 - (128 - i64::from(self.x)).abs();
        let y = 64 - (128 - i64::from(self.y)).abs();

        RenderedFrame {
            transform: Transform {
                translate_x: x as f64,
                translate_y: y as f64,
                scale: tenths as f64 / 10.0,
                rotate: f64::from(self.rotate),
            },
            origin: Origin {
                x: origin_x as f64,
                y: ORIGIN_Y,
            },
        }
    }

    /// Counters after one tick.
    pub fn advanced(&self) -> Self {
        Self {
            origin: (self.origin + ORIGIN_STEP) % ORIGIN_PERIOD,
            x: (self.x + X_STEP) % X_PERIOD,
            y: (self.y + Y_STEP) % Y_PERIOD,
            scale: (self.scale + SCALE_STEP) % SCALE_PERIOD,
            rotate: (self.rotate + ROTATE_STEP) % ROTATE_PERIOD,
        }
    }

    /// Render the current frame and return it with the successor state.
    pub fn next(self) -> (RenderedFrame, Self) {
        (self.render(), self.advanced())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/waveform.rs"]
mod tests;

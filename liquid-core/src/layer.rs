use crate::{config::Config, ring::PointRing};

/// Per-layer physics parameters.
#[derive(Clone, Copy, Debug)]
pub struct LayerParams {
    /// Velocity multiplier applied once per step. Values in (0, 1)
    /// damp; values >= 1 are accepted but will not damp — supplying a
    /// stable value is the caller's responsibility.
    pub viscosity: f32,
    /// Base pointer-interaction strength.
    pub mouse_force: f32,
    /// Clamp on the pointer-force magnitude after distance division.
    /// Only the magnitude is meaningful; a negative value clamps the
    /// same as its absolute value.
    pub force_limit: f32,
}

impl Default for LayerParams {
    fn default() -> Self {
        Self {
            viscosity: 0.5,
            mouse_force: 200.0,
            force_limit: 1.0,
        }
    }
}

/// A point ring together with the parameters that govern its motion.
#[derive(Clone, Debug)]
pub struct Layer {
    pub ring: PointRing,
    pub params: LayerParams,
}

impl Layer {
    /// A layer seeded from the rectangle perimeter of `cfg`.
    pub fn seeded(cfg: &Config, params: LayerParams) -> Self {
        Self {
            ring: PointRing::rect_perimeter(cfg),
            params,
        }
    }

    /// Replaces the ring wholesale from the current geometry in `cfg`.
    /// Used on resize; the point count may change, so no attempt is
    /// made to resample in place.
    pub fn reseed(&mut self, cfg: &Config) {
        self.ring = PointRing::rect_perimeter(cfg);
    }
}

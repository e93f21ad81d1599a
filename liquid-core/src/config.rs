/// Global simulation configuration.
///
/// All fields are resolved to concrete values at construction time;
/// there are no lazy per-access fallbacks. Geometry is not validated:
/// a non-positive `gap` or zero `width` is a caller error and may
/// produce a degenerate ring (see [`crate::ring::PointRing`]).
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Spline tightness: scale factor applied to control-point offsets.
    pub tension: f32,
    /// Interior rectangle width, excluding margins.
    pub width: f32,
    /// Interior rectangle height, excluding margins.
    pub height: f32,
    /// Offset of the interior rectangle from the canvas edge.
    pub margin: f32,
    /// Sampling step along the perimeter when seeding the ring.
    pub gap: f32,
    /// Amplitude of the uniform jitter applied to the spring displacement.
    pub noise: f32,
    /// Spring strength: restoring force grows linearly with displacement.
    pub force_factor: f32,
    /// Sign/scale flip applied to the pointer force while the touch is
    /// strictly inside the interior rectangle. Zero disables attraction.
    pub hover_factor: f32,
}

impl Config {
    /// Full canvas width including both margins.
    pub fn canvas_width(&self) -> f32 {
        self.width + self.margin * 2.0
    }

    /// Full canvas height including both margins.
    pub fn canvas_height(&self) -> f32 {
        self.height + self.margin * 2.0
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tension: 0.5,
            width: 500.0,
            height: 500.0,
            margin: 15.0,
            gap: 50.0,
            noise: 0.0,
            force_factor: 0.4,
            hover_factor: 0.0,
        }
    }
}

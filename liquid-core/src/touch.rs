use glam::Vec2;

/// A synthetic pointer sample in simulation coordinates.
///
/// At most one touch is active at a time; the pointer router replaces
/// the whole value on every relevant input event, so a stale sample
/// never survives a frame in which a new one arrived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Touch {
    pub pos: Vec2,
    /// Force magnitude. The synthetic pointer always carries 1.0.
    pub force: f32,
}

impl Touch {
    /// A unit-force touch at the given position.
    pub fn at(pos: Vec2) -> Self {
        Self { pos, force: 1.0 }
    }
}

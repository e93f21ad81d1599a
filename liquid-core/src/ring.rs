use crate::config::Config;
use glam::Vec2;

/// One boundary particle of the outline.
#[derive(Clone, Copy, Debug)]
pub struct RingPoint {
    /// Current position.
    pub pos: Vec2,
    /// Rest position the restoring spring pulls toward. Fixed at creation.
    pub origin: Vec2,
    /// Current velocity.
    pub vel: Vec2,
    /// Control-point offset toward the previous neighbor, recomputed
    /// every frame by the spline fit.
    pub c_prev: Vec2,
    /// Control-point offset toward the next neighbor.
    pub c_next: Vec2,
}

impl RingPoint {
    /// A point at rest: origin equals position, velocity zero.
    pub fn at_rest(pos: Vec2) -> Self {
        Self {
            pos,
            origin: pos,
            vel: Vec2::ZERO,
            c_prev: pos,
            c_next: pos,
        }
    }
}

/// A closed ordered sequence of points; index `len - 1` is adjacent to
/// index `0`. The length is constant between resets — points are never
/// added or removed while the simulation runs.
#[derive(Clone, Debug)]
pub struct PointRing {
    pub points: Vec<RingPoint>,
}

impl PointRing {
    pub fn from_positions(positions: Vec<Vec2>) -> Self {
        let points = positions.into_iter().map(RingPoint::at_rest).collect();
        Self { points }
    }

    /// Seeds the ring along the perimeter of the configured rectangle.
    ///
    /// The four sides are traversed in a fixed order: top left→right,
    /// right top→bottom, bottom right→left, left bottom→top, sampled
    /// every `cfg.gap` with each coordinate offset by `cfg.margin`.
    /// Extents are truncated before sampling and the loop bounds are
    /// inclusive, so side endpoints repeat at the corners; the last
    /// sample of a side may also fall short of the corner when the
    /// extent is not a multiple of the gap. Neither case is corrected.
    ///
    /// A non-positive gap or zero extent produces a degenerate ring;
    /// downstream code must tolerate rings shorter than 3 points.
    pub fn rect_perimeter(cfg: &Config) -> Self {
        let w = cfg.width.trunc();
        let h = cfg.height.trunc();
        let m = cfg.margin;
        let gap = cfg.gap;

        let mut positions = Vec::new();
        if gap <= 0.0 {
            return Self::from_positions(positions);
        }

        let mut x = 0.0;
        while x <= w {
            positions.push(Vec2::new(x + m, m));
            x += gap;
        }

        let mut y = 0.0;
        while y <= h {
            positions.push(Vec2::new(w + m, y + m));
            y += gap;
        }

        let mut x = w;
        while x >= 0.0 {
            positions.push(Vec2::new(x + m, h + m));
            x -= gap;
        }

        let mut y = h;
        while y >= 0.0 {
            positions.push(Vec2::new(m, y + m));
            y -= gap;
        }

        Self::from_positions(positions)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

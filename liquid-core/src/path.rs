//! Closed cubic-Bezier path geometry assembled from a fitted ring.
//!
//! The renderer collaborator consumes either the segment list directly
//! (e.g. to build GPU shapes) or the SVG path-data string produced by
//! [`ClosedPath::to_svg`].

use crate::ring::PointRing;
use glam::Vec2;
use std::fmt::Write;

/// One cubic segment: two absolute control points and the end anchor.
/// The start anchor is the previous segment's end (or the path start).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSegment {
    pub c1: Vec2,
    pub c2: Vec2,
    pub to: Vec2,
}

/// A closed path of cubic segments with absolute coordinates.
///
/// An N-point ring yields exactly N segments; the last segment ends at
/// `start`, so the curve is closed by construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosedPath {
    pub start: Vec2,
    pub segments: Vec<CubicSegment>,
}

impl ClosedPath {
    /// Assembles a path from a fitted ring.
    ///
    /// Segment `i` runs from anchor `i` to anchor `(i + 1) % n`, using
    /// anchor `i`'s outgoing control offset and the next anchor's
    /// incoming one. Expects [`crate::phases::fit_phase`] to have run
    /// since the last position update.
    ///
    /// Returns `None` for rings shorter than 3 points: a degenerate
    /// ring has no meaningful outline, and rendering nothing beats
    /// rendering garbage.
    pub fn from_ring(ring: &PointRing) -> Option<Self> {
        let points = &ring.points;
        let n = points.len();
        if n < 3 {
            return None;
        }

        let mut segments = Vec::with_capacity(n);
        for i in 0..n {
            let next = &points[(i + 1) % n];
            segments.push(CubicSegment {
                c1: points[i].c_next,
                c2: next.c_prev,
                to: next.pos,
            });
        }

        Some(Self {
            start: points[0].pos,
            segments,
        })
    }

    /// Renders the path as SVG path data (`M … C … Z`).
    pub fn to_svg(&self) -> String {
        let mut d = String::with_capacity(32 + self.segments.len() * 48);
        let _ = write!(d, "M {} {}", self.start.x, self.start.y);
        for s in &self.segments {
            let _ = write!(
                d,
                " C {} {} {} {} {} {}",
                s.c1.x, s.c1.y, s.c2.x, s.c2.y, s.to.x, s.to.y
            );
        }
        d.push_str(" Z");
        d
    }
}

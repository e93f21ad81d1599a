//! Filling the fitted outline with an image texture.
//!
//! egui can only fill convex polygons directly, and the liquid outline
//! goes concave under attraction, so the fill is built by hand: the
//! Bezier path is flattened into a polygon, the polygon is
//! triangulated by ear clipping, and the triangles become a textured
//! mesh whose UVs crop the image cover-style (the SVG original clips
//! the image with `preserveAspectRatio: xMidYMid slice`).
//!
//! All functions here are pure geometry; the viewer turns the output
//! into an [`egui::Mesh`].

use glam::Vec2;
use liquid_core::path::ClosedPath;

/// Point on a cubic Bezier at parameter `t` in [0, 1].
fn cubic_point(from: Vec2, c1: Vec2, c2: Vec2, to: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    from * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + to * (t * t * t)
}

/// Flattens a closed path into a polygon, `steps` samples per segment.
///
/// The polygon is open-ended (the last vertex does not repeat the
/// first) and consecutive near-coincident samples are dropped, so
/// zero-length segments from coincident ring anchors collapse instead
/// of producing degenerate vertices.
pub fn flatten(path: &ClosedPath, steps: usize) -> Vec<Vec2> {
    let steps = steps.max(1);
    let mut out: Vec<Vec2> = Vec::with_capacity(path.segments.len() * steps);

    let mut from = path.start;
    for seg in &path.segments {
        // Sample [0, 1); the endpoint is the next segment's start.
        for k in 0..steps {
            let t = k as f32 / steps as f32;
            let p = cubic_point(from, seg.c1, seg.c2, seg.to, t);
            if out.last().is_none_or(|&q| q.distance_squared(p) > 1e-6) {
                out.push(p);
            }
        }
        from = seg.to;
    }

    // The path is closed, so the first sample can coincide with the
    // tail of the final segment.
    while out.len() > 1 && out[0].distance_squared(*out.last().unwrap()) <= 1e-6 {
        out.pop();
    }
    out
}

fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Twice the signed area of the polygon (shoelace).
fn signed_area2(poly: &[Vec2]) -> f32 {
    let n = poly.len();
    let mut sum = 0.0;
    for i in 0..n {
        sum += cross(poly[i], poly[(i + 1) % n]);
    }
    sum
}

/// Inclusive point-in-triangle test (points on an edge count as in).
fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = cross(b - a, p - a);
    let d2 = cross(c - b, p - b);
    let d3 = cross(a - c, p - c);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Triangulates a simple polygon by ear clipping.
///
/// Returns index triples into `poly`, `len - 2` of them on success.
/// Works for either winding. A polygon the clipper cannot digest
/// (self-intersecting outline, zero area) yields an empty list: the
/// caller skips the fill for that frame rather than drawing garbage.
pub fn triangulate(poly: &[Vec2]) -> Vec<[usize; 3]> {
    let n = poly.len();
    if n < 3 {
        return Vec::new();
    }

    let winding = signed_area2(poly).signum();
    if winding == 0.0 {
        return Vec::new();
    }

    let mut idx: Vec<usize> = (0..n).collect();
    let mut tris = Vec::with_capacity(n - 2);
    let mut i = 0;
    let mut stalled = 0;

    while idx.len() > 3 {
        let m = idx.len();
        let prev = (i + m - 1) % m;
        let next = (i + 1) % m;
        let a = poly[idx[prev]];
        let b = poly[idx[i]];
        let c = poly[idx[next]];

        let convex = cross(b - a, c - b) * winding >= 0.0;
        let is_ear = convex
            && idx.iter().enumerate().all(|(j, &k)| {
                j == prev || j == i || j == next || !point_in_triangle(poly[k], a, b, c)
            });

        if is_ear {
            tris.push([idx[prev], idx[i], idx[next]]);
            idx.remove(i);
            stalled = 0;
            if i >= idx.len() {
                i = 0;
            }
        } else {
            i = (i + 1) % m;
            stalled += 1;
            if stalled > m {
                // No clippable ear in a full sweep: the outline is not
                // a simple polygon this frame. Fill nothing.
                return Vec::new();
            }
        }
    }

    tris.push([idx[0], idx[1], idx[2]]);
    tris
}

/// Maps a canvas-space point to image UV coordinates, cover-style.
///
/// The image is scaled uniformly until it covers the whole canvas and
/// centered, cropping the overhang on one axis (SVG's
/// `xMidYMid slice`). Points outside the canvas map outside [0, 1];
/// texture sampling clamps them to the border.
pub fn cover_uv(p: Vec2, canvas: Vec2, image: Vec2) -> Vec2 {
    if canvas.x <= 0.0 || canvas.y <= 0.0 || image.x <= 0.0 || image.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (canvas.x / image.x).max(canvas.y / image.y);
    let offset = (canvas - image * scale) * 0.5;
    (p - offset) / scale / image
}

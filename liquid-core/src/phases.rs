//! Per-frame phases of the liquid outline simulation.
//!
//! Each logical step runs two passes over a layer's point ring:
//! 1. [`force_phase`] — accumulate spring, jitter and pointer forces
//!    into each point's velocity, damp it, and integrate the position.
//! 2. [`fit_phase`] — recompute the Bezier control offsets that turn
//!    the discrete ring into a smooth closed curve.
//!
//! Both passes read only the previous frame's positions for any term
//! involving other points, so neither introduces an order dependency
//! within the ring.

use crate::{config::Config, layer::Layer, touch::Touch};
use glam::Vec2;
use rand::Rng;

/// Updates velocities and positions of every point in the layer.
///
/// For each point, three contributions are summed into the velocity
/// (force adds to velocity directly; there is no mass term):
///
/// 1. **Restoring spring**: displacement toward the point's origin,
///    perturbed per axis by uniform jitter in
///    `[-cfg.noise / 2, +cfg.noise / 2]`. The contribution is the
///    normalized displacement scaled by `|d| * cfg.force_factor`, so
///    force grows linearly with distance from rest. A zero-length
///    displacement contributes nothing.
/// 2. **Pointer force**: for the active touch, the vector from the
///    touch to the point at distance `md` receives
///    `clamp(mouse_force * touch.force / md, ±force_limit)` along its
///    normalized direction. While the touch lies strictly inside the
///    interior rectangle (`margin < coord < margin + extent` on both
///    axes) the base force is multiplied by `-cfg.hover_factor`,
///    turning repulsion into attraction; a touch exactly on the
///    boundary does not flip. `md == 0` contributes nothing.
/// 3. **Damping and integration**: `vel *= viscosity`, `pos += vel`.
///
/// The touch is taken by value: the caller samples the touch state
/// once per frame, so a pointer router overwriting its record mid-pass
/// cannot tear a single frame's computation.
///
/// ### Parameters
/// - `layer` - The layer to mutate; positions and velocities change.
/// - `touch` - The pointer sample for this frame, if any.
/// - `cfg` - Global configuration (noise, spring strength, geometry).
/// - `rng` - Randomness source for the jitter term.
pub fn force_phase(layer: &mut Layer, touch: Option<Touch>, cfg: &Config, rng: &mut impl Rng) {
    let params = layer.params;

    // Resolve the pointer force once; the sign flip depends only on
    // where the touch is, not on which point it acts on.
    let touch = touch.map(|t| {
        let inside = t.pos.x > cfg.margin
            && t.pos.x < cfg.margin + cfg.width
            && t.pos.y > cfg.margin
            && t.pos.y < cfg.margin + cfg.height;
        let base = if inside {
            params.mouse_force * -cfg.hover_factor
        } else {
            params.mouse_force
        };
        (t, base)
    });

    for point in &mut layer.ring.points {
        let jitter = Vec2::new(
            rng.random_range(-0.5..=0.5) * cfg.noise,
            rng.random_range(-0.5..=0.5) * cfg.noise,
        );
        let d = point.origin - point.pos + jitter;
        let dist = d.length();
        point.vel += d.normalize_or_zero() * (dist * cfg.force_factor);

        if let Some((t, base)) = touch {
            let m = point.pos - t.pos;
            let md = m.length();
            if md > 0.0 {
                // Clamp by magnitude so a negative force_limit cannot
                // invert the clamp bounds.
                let limit = params.force_limit.abs();
                let mf = (base * t.force / md).clamp(-limit, limit);
                point.vel += (m / md) * mf;
            }
        }

        point.vel *= params.viscosity;
        point.pos += point.vel;
    }
}

/// Recomputes the control-point offsets of every point in the ring.
///
/// For a point with ring-wrapped neighbors `prev` and `next`, the
/// tangent is the normalized chord `next - prev`, scaled on each side
/// by the actual distance to that neighbor and by `tension`:
///
/// - `c_prev = pos - tangent * |pos - prev| * tension`
/// - `c_next = pos + tangent * |pos - next| * tension`
///
/// Coincident neighbors give a zero tangent, producing zero-length
/// control offsets (a straight-line cusp) rather than NaN. Rings
/// shorter than 3 points are handled the same way; the output is
/// geometrically meaningless but finite.
pub fn fit_phase(layer: &mut Layer, tension: f32) {
    let points = &mut layer.ring.points;
    let n = points.len();

    for i in 0..n {
        let prev = points[(i + n - 1) % n].pos;
        let point = points[i].pos;
        let next = points[(i + 1) % n].pos;

        let d_prev = point.distance(prev);
        let d_next = point.distance(next);
        let tangent = (next - prev).normalize_or_zero();

        points[i].c_prev = point - tangent * d_prev * tension;
        points[i].c_next = point + tangent * d_next * tension;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerParams;
    use crate::ring::PointRing;
    use glam::Vec2;
    use rand::rng;

    fn layer_from(positions: Vec<Vec2>, params: LayerParams) -> Layer {
        Layer {
            ring: PointRing::from_positions(positions),
            params,
        }
    }

    fn quiet_config() -> Config {
        Config {
            noise: 0.0,
            force_factor: 0.4,
            ..Config::default()
        }
    }

    #[test]
    fn displaced_point_is_pulled_back_toward_origin() {
        let mut layer = layer_from(vec![Vec2::new(0.0, 0.0)], LayerParams::default());
        layer.ring.points[0].pos = Vec2::new(10.0, 0.0);

        force_phase(&mut layer, None, &quiet_config(), &mut rng());

        // Spring contribution: |d| = 10, factor 0.4 -> accel (-4, 0);
        // damped by viscosity 0.5 -> vel (-2, 0); pos 10 - 2 = 8.
        let p = layer.ring.points[0];
        assert_eq!(p.vel, Vec2::new(-2.0, 0.0));
        assert_eq!(p.pos, Vec2::new(8.0, 0.0));
    }

    #[test]
    fn point_at_origin_receives_no_spring_force() {
        let mut layer = layer_from(vec![Vec2::new(5.0, 5.0)], LayerParams::default());

        force_phase(&mut layer, None, &quiet_config(), &mut rng());

        let p = layer.ring.points[0];
        assert_eq!(p.vel, Vec2::ZERO);
        assert_eq!(p.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn ring_converges_to_origins_without_touch_or_noise() {
        let cfg = Config {
            width: 100.0,
            height: 100.0,
            margin: 10.0,
            gap: 50.0,
            noise: 0.0,
            ..Config::default()
        };
        let mut layer = Layer::seeded(&cfg, LayerParams::default());

        // Kick every point away from rest.
        for (i, p) in layer.ring.points.iter_mut().enumerate() {
            p.pos += Vec2::new(7.0 + i as f32, -3.0);
        }

        for _ in 0..200 {
            force_phase(&mut layer, None, &cfg, &mut rng());
        }

        for p in &layer.ring.points {
            assert!(
                p.pos.distance(p.origin) < 1e-3,
                "point did not converge: pos={:?}, origin={:?}",
                p.pos,
                p.origin
            );
        }
    }

    #[test]
    fn point_count_is_invariant_across_cycles() {
        let cfg = Config::default();
        let mut layer = Layer::seeded(&cfg, LayerParams::default());
        let n = layer.ring.len();

        for i in 0..50 {
            let touch = (i % 2 == 0).then(|| Touch::at(Vec2::new(1.0, 1.0)));
            force_phase(&mut layer, touch, &cfg, &mut rng());
            fit_phase(&mut layer, cfg.tension);
            assert_eq!(layer.ring.len(), n);
        }
    }

    #[test]
    fn touch_outside_the_interior_repels() {
        // Point at rest so the spring contributes nothing; the only
        // force is the pointer. Touch placed left of the point, well
        // outside the interior rectangle.
        let cfg = Config {
            width: 100.0,
            height: 100.0,
            margin: 10.0,
            hover_factor: 1.0,
            noise: 0.0,
            ..Config::default()
        };
        let mut layer = layer_from(vec![Vec2::new(5.0, 5.0)], LayerParams::default());

        force_phase(
            &mut layer,
            Some(Touch::at(Vec2::new(0.0, 5.0))),
            &cfg,
            &mut rng(),
        );

        // Repulsion pushes the point away from the touch: +x.
        assert!(layer.ring.points[0].vel.x > 0.0);
        assert_eq!(layer.ring.points[0].vel.y, 0.0);
    }

    #[test]
    fn touch_inside_the_interior_attracts_when_hover_factor_is_set() {
        let cfg = Config {
            width: 100.0,
            height: 100.0,
            margin: 10.0,
            hover_factor: 1.0,
            noise: 0.0,
            ..Config::default()
        };
        // Touch strictly inside the interior rectangle, point at rest
        // to its left.
        let mut layer = layer_from(vec![Vec2::new(20.0, 50.0)], LayerParams::default());

        force_phase(
            &mut layer,
            Some(Touch::at(Vec2::new(50.0, 50.0))),
            &cfg,
            &mut rng(),
        );

        // Flipped sign pulls the point toward the touch: +x.
        assert!(layer.ring.points[0].vel.x > 0.0);
    }

    #[test]
    fn touch_exactly_on_the_interior_boundary_does_not_flip() {
        // The interior test is strict: a touch at x == margin sits on
        // the boundary and keeps the unflipped (repulsive) sign.
        let cfg = Config {
            width: 100.0,
            height: 100.0,
            margin: 10.0,
            hover_factor: 1.0,
            noise: 0.0,
            ..Config::default()
        };
        let mut layer = layer_from(vec![Vec2::new(30.0, 50.0)], LayerParams::default());

        force_phase(
            &mut layer,
            Some(Touch::at(Vec2::new(10.0, 50.0))),
            &cfg,
            &mut rng(),
        );

        // Repulsion pushes the point farther right.
        assert!(layer.ring.points[0].vel.x > 0.0);
    }

    #[test]
    fn pointer_force_magnitude_is_clamped() {
        let cfg = Config {
            noise: 0.0,
            force_factor: 0.0,
            ..Config::default()
        };
        let params = LayerParams {
            viscosity: 1.0,
            mouse_force: 200.0,
            force_limit: 1.0,
        };
        // Touch very close to the point: the raw force 200 / md is
        // enormous, but the clamp caps the velocity change at 1.
        let mut layer = layer_from(vec![Vec2::new(600.0, 600.0)], params);

        force_phase(
            &mut layer,
            Some(Touch::at(Vec2::new(599.9, 600.0))),
            &cfg,
            &mut rng(),
        );

        let v = layer.ring.points[0].vel;
        assert!((v.length() - 1.0).abs() < 1e-4);
        assert!(v.x > 0.0);
    }

    #[test]
    fn negative_force_limit_clamps_by_magnitude() {
        let cfg = Config {
            noise: 0.0,
            force_factor: 0.0,
            ..Config::default()
        };
        let params = LayerParams {
            viscosity: 1.0,
            mouse_force: 200.0,
            force_limit: -1.0,
        };
        let mut layer = layer_from(vec![Vec2::new(600.0, 600.0)], params);

        // Must not panic on inverted clamp bounds; the cap is |limit|.
        force_phase(
            &mut layer,
            Some(Touch::at(Vec2::new(599.9, 600.0))),
            &cfg,
            &mut rng(),
        );

        let v = layer.ring.points[0].vel;
        assert!((v.length() - 1.0).abs() < 1e-4);
        assert!(v.x > 0.0);
    }

    #[test]
    fn touch_coincident_with_a_point_contributes_nothing() {
        let cfg = Config {
            noise: 0.0,
            force_factor: 0.0,
            ..Config::default()
        };
        let mut layer = layer_from(vec![Vec2::new(600.0, 600.0)], LayerParams::default());

        force_phase(
            &mut layer,
            Some(Touch::at(Vec2::new(600.0, 600.0))),
            &cfg,
            &mut rng(),
        );

        let p = layer.ring.points[0];
        assert_eq!(p.vel, Vec2::ZERO);
        assert!(p.pos.x.is_finite() && p.pos.y.is_finite());
    }

    #[test]
    fn clearing_the_touch_removes_influence_on_the_next_update() {
        // Spring and noise disabled, viscosity 1: the velocity changes
        // only through the pointer term.
        let cfg = Config {
            noise: 0.0,
            force_factor: 0.0,
            ..Config::default()
        };
        let params = LayerParams {
            viscosity: 1.0,
            ..LayerParams::default()
        };
        let mut layer = layer_from(vec![Vec2::new(600.0, 600.0)], params);

        force_phase(
            &mut layer,
            Some(Touch::at(Vec2::new(590.0, 600.0))),
            &cfg,
            &mut rng(),
        );
        let after_touch = layer.ring.points[0].vel;
        assert_ne!(after_touch, Vec2::ZERO);

        // Touch cleared: the very next update adds no pointer force.
        force_phase(&mut layer, None, &cfg, &mut rng());
        assert_eq!(layer.ring.points[0].vel, after_touch);
    }

    #[test]
    fn noise_jitter_stays_within_amplitude() {
        let cfg = Config {
            noise: 2.0,
            force_factor: 1.0,
            ..Config::default()
        };
        let params = LayerParams {
            viscosity: 1.0,
            ..LayerParams::default()
        };
        let mut layer = layer_from(vec![Vec2::new(50.0, 50.0)], params);

        // At rest the only displacement is the jitter, so per step the
        // velocity change is bounded by |jitter| * force_factor.
        for _ in 0..100 {
            let before = layer.ring.points[0].vel;
            layer.ring.points[0].pos = layer.ring.points[0].origin;
            force_phase(&mut layer, None, &cfg, &mut rng());
            let dv = layer.ring.points[0].vel - before;
            // Max |jitter| per axis is noise / 2 = 1.
            assert!(dv.length() <= (2.0_f32).sqrt() + 1e-4);
        }
    }

    #[test]
    fn fit_phase_produces_symmetric_tangents_on_a_square() {
        let mut layer = layer_from(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(0.0, 10.0),
            ],
            LayerParams::default(),
        );

        fit_phase(&mut layer, 0.5);

        // For point 1, prev = (0,0) and next = (10,10): the chord is
        // the diagonal, chords to both neighbors have length 10, so
        // both offsets are 10 * 0.5 = 5 along the unit diagonal.
        let p = layer.ring.points[1];
        let diag = Vec2::new(1.0, 1.0).normalize();
        assert!((p.c_prev - (p.pos - diag * 5.0)).length() < 1e-4);
        assert!((p.c_next - (p.pos + diag * 5.0)).length() < 1e-4);
    }

    #[test]
    fn coincident_neighbors_yield_zero_control_offsets() {
        // prev and next of the middle point coincide: the tangent is
        // zero-length and must degrade to zero offsets, not NaN.
        let mut layer = layer_from(
            vec![
                Vec2::new(5.0, 5.0),
                Vec2::new(9.0, 9.0),
                Vec2::new(5.0, 5.0),
            ],
            LayerParams::default(),
        );

        fit_phase(&mut layer, 0.5);

        let p = layer.ring.points[1];
        assert_eq!(p.c_prev, p.pos);
        assert_eq!(p.c_next, p.pos);
        for q in &layer.ring.points {
            assert!(q.c_prev.x.is_finite() && q.c_prev.y.is_finite());
            assert!(q.c_next.x.is_finite() && q.c_next.y.is_finite());
        }
    }

    #[test]
    fn phases_tolerate_degenerate_rings() {
        let cfg = Config::default();

        for positions in [
            vec![],
            vec![Vec2::new(1.0, 1.0)],
            vec![Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)],
        ] {
            let mut layer = layer_from(positions, LayerParams::default());
            force_phase(
                &mut layer,
                Some(Touch::at(Vec2::new(0.0, 0.0))),
                &cfg,
                &mut rng(),
            );
            fit_phase(&mut layer, cfg.tension);
            for p in &layer.ring.points {
                assert!(p.pos.x.is_finite() && p.pos.y.is_finite());
                assert!(p.c_prev.x.is_finite() && p.c_next.x.is_finite());
            }
        }
    }
}

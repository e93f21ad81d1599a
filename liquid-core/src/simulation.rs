//! Simulation façade: owns the layers, the touch state, and the
//! per-frame step that the host's frame scheduler drives.

use crate::{
    config::Config,
    layer::{Layer, LayerParams},
    path::ClosedPath,
    phases,
    touch::Touch,
    types::LayerId,
};
use rand::rngs::ThreadRng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide allocator for simulation instance ids.
///
/// Independent instances share nothing except this counter, which
/// namespaces per-instance resources (for example SVG clip-path ids in
/// a rendering adapter). Ids are never reused, even across reset or
/// re-creation of an instance.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

fn next_instance_id() -> u64 {
    NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Per-frame consumer of the fitted outline geometry.
///
/// Implement this to hand each frame's path to a renderer. The sink is
/// called at most once per layer per frame and must not fail; a sink
/// that cannot draw should simply skip the frame.
pub trait PathSink {
    fn accept(&mut self, layer: LayerId, path: &ClosedPath);
}

/// A sink that discards geometry. Useful for headless stepping.
pub struct NullSink;

impl PathSink for NullSink {
    fn accept(&mut self, _layer: LayerId, _path: &ClosedPath) {}
}

/// One liquid-outline simulation instance.
///
/// The host drives it with one [`Simulation::step`] (or
/// [`Simulation::run_frame`]) per display frame. Each step advances
/// the physics by exactly one fixed increment regardless of wall-clock
/// time between callbacks, so perceived speed follows the display
/// refresh rate. Stopping is the host's concern: stop calling `step`
/// and the instance is paused; drop it and it is gone.
pub struct Simulation {
    id: u64,
    cfg: Config,
    layers: Vec<Layer>,
    touch: Option<Touch>,
    rng: ThreadRng,
}

impl Simulation {
    /// Creates an instance with a single layer seeded from `cfg`.
    pub fn new(cfg: Config, params: LayerParams) -> Self {
        Self {
            id: next_instance_id(),
            layers: vec![Layer::seeded(&cfg, params)],
            cfg,
            touch: None,
            rng: rand::rng(),
        }
    }

    /// Process-unique instance id.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Replaces the touch state wholesale. `None` clears it; the next
    /// update then carries no pointer influence at all.
    pub fn set_touch(&mut self, touch: Option<Touch>) {
        self.touch = touch;
    }

    pub fn touch(&self) -> Option<Touch> {
        self.touch
    }

    /// Advances every layer by one logical step: force pass, then
    /// spline fit. The touch is sampled once here, so an event handler
    /// replacing it concurrently with a frame cannot tear the pass.
    pub fn step(&mut self) {
        let touch = self.touch;
        for layer in &mut self.layers {
            phases::force_phase(layer, touch, &self.cfg, &mut self.rng);
            phases::fit_phase(layer, self.cfg.tension);
        }
    }

    /// Fitted outline of the given layer, or `None` if the layer does
    /// not exist or its ring is too short to form a curve.
    pub fn path(&self, layer: LayerId) -> Option<ClosedPath> {
        self.layers.get(layer).and_then(|l| ClosedPath::from_ring(&l.ring))
    }

    /// One full frame: step, then emit each layer's path to the sink.
    pub fn run_frame(&mut self, sink: &mut impl PathSink) {
        self.step();
        for (i, layer) in self.layers.iter().enumerate() {
            if let Some(path) = ClosedPath::from_ring(&layer.ring) {
                sink.accept(i, &path);
            }
        }
    }

    /// Applies new outer dimensions and reseeds every ring wholesale.
    /// The point count may change; no state survives the reseed.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.cfg.width = width;
        self.cfg.height = height;
        self.reset();
    }

    /// Reseeds every ring from the current configuration.
    pub fn reset(&mut self) {
        for layer in &mut self.layers {
            layer.reseed(&self.cfg);
        }
    }

    /// Mutable access to a layer's parameters (viscosity, mouse force,
    /// force limit). The ring itself stays private to the step.
    pub fn params_mut(&mut self, layer: LayerId) -> Option<&mut LayerParams> {
        self.layers.get_mut(layer).map(|l| &mut l.params)
    }

    /// Mutable access to the tunable parts of the configuration.
    /// Geometry changes should go through [`Simulation::resize`] so
    /// the ring is reseeded to match.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.cfg
    }
}

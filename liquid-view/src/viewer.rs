//! Interactive liquid-outline viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`Simulation`] and
//! implements [`eframe::App`]. It plays the collaborator roles the
//! core leaves open: frame scheduling (one simulation step per egui
//! repaint), pointer routing (mapping hover positions into touch
//! samples), and rendering (stroking the fitted Bezier path).

use crate::fill;
use eframe::App;
use glam::Vec2;
use liquid_core::{
    config::Config,
    layer::LayerParams,
    path::ClosedPath,
    simulation::Simulation,
    touch::Touch,
};

/// How far outside the canvas (in simulation units) the pointer still
/// counts as a touch. Beyond this band the touch is cleared and the
/// outline relaxes back toward rest.
const TOUCH_BAND: f32 = 100.0;

/// Decides whether a pointer position becomes a touch.
///
/// The position is already in simulation coordinates. Anything within
/// [`TOUCH_BAND`] of the canvas rectangle yields a unit-force touch at
/// that position; anything farther clears the touch. The
/// attraction/repulsion flip inside the interior rectangle is the
/// core's business, not this router's.
fn route_pointer(world: Vec2, cfg: &Config) -> Option<Touch> {
    let clamped = Vec2::new(
        world.x.clamp(0.0, cfg.canvas_width()),
        world.y.clamp(0.0, cfg.canvas_height()),
    );
    (world.distance(clamped) <= TOUCH_BAND).then(|| Touch::at(world))
}

/// Main application state for the interactive viewer.
///
/// Per frame:
/// 1. Route the pointer into the simulation's touch state.
/// 2. If `running`, advance the simulation by one step.
/// 3. Fill the fitted path with the image texture when one is loaded,
///    stroke the outline, and optionally show the raw points.
pub struct Viewer {
    sim: Simulation,

    running: bool,
    zoom: f32,
    pan: egui::Vec2,

    stroke_color: egui::Color32,
    show_points: bool,

    // Decoded image waiting for a GPU upload; moves into `texture` on
    // the first frame, once a context is available.
    pending_image: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,

    // Pending geometry edits, applied on demand so the ring is not
    // reseeded on every slider tick.
    pending_width: f32,
    pending_height: f32,
}

impl Viewer {
    /// Creates a viewer around a freshly seeded simulation.
    ///
    /// `image`, when given, is clipped to the liquid outline each
    /// frame. Parameter defaults follow the core's `Default` impls;
    /// the stroke color default is the original teal (`#36DFE7`).
    pub fn new(image: Option<egui::ColorImage>) -> Self {
        let cfg = Config::default();
        let sim = Simulation::new(cfg, LayerParams::default());
        log::info!(
            "simulation instance {} seeded with {} points",
            sim.id(),
            sim.layers()[0].ring.len()
        );

        Self {
            pending_width: cfg.width,
            pending_height: cfg.height,
            sim,
            running: true,
            zoom: 1.0,
            pan: egui::vec2(0.0, 0.0),
            stroke_color: egui::Color32::from_rgb(0x36, 0xDF, 0xE7),
            show_points: false,
            pending_image: image,
            texture: None,
        }
    }

    /// Converts a simulation-space position to screen-space.
    ///
    /// Simulation coordinates are y-down with the canvas origin at the
    /// top-left, matching egui's screen space, so the mapping is a
    /// scale by `zoom` plus the pan offset from the panel corner.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        egui::pos2(
            rect.min.x + p.x * self.zoom + self.pan.x,
            rect.min.y + p.y * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`Viewer::world_to_screen`] up to rounding.
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        Vec2::new(
            (p.x - rect.min.x - self.pan.x) / self.zoom,
            (p.y - rect.min.y - self.pan.y) / self.zoom,
        )
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (run controls, stepping, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    self.sim.step();
                }

                if ui.button("Reset ring").clicked() {
                    self.sim.reset();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.25..=4.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (instance id, point count, touch).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match self.sim.touch() {
                    Some(t) => ui.label(format!("touch = ({:.0}, {:.0})", t.pos.x, t.pos.y)),
                    None => ui.label("touch = none"),
                };
                ui.separator();
                ui.label(format!("points = {}", self.sim.layers()[0].ring.len()));
                ui.label(format!("instance = {}", self.sim.id()));
            });
        });
    }

    /// Builds the right-hand configuration panel.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Spline");
                let cfg = self.sim.config_mut();
                Self::labeled_drag_f32(ui, "tension:", &mut cfg.tension, 0.0..=1.0, 0.01);

                ui.separator();
                ui.label("Forces");
                Self::labeled_drag_f32(ui, "force_factor:", &mut cfg.force_factor, 0.0..=1.0, 0.01);
                Self::labeled_drag_f32(ui, "hover_factor:", &mut cfg.hover_factor, -2.0..=2.0, 0.01);
                Self::labeled_drag_f32(ui, "noise:", &mut cfg.noise, 0.0..=20.0, 0.1);

                ui.separator();
                ui.label("Layer");
                if let Some(params) = self.sim.params_mut(0) {
                    Self::labeled_drag_f32(ui, "viscosity:", &mut params.viscosity, 0.0..=1.0, 0.01);
                    Self::labeled_drag_f32(
                        ui,
                        "mouse_force:",
                        &mut params.mouse_force,
                        0.0..=1000.0,
                        1.0,
                    );
                    Self::labeled_drag_f32(
                        ui,
                        "force_limit:",
                        &mut params.force_limit,
                        0.0..=10.0,
                        0.05,
                    );
                }

                ui.separator();
                ui.label("Geometry (applies on reseed)");
                Self::labeled_drag_f32(ui, "width:", &mut self.pending_width, 50.0..=2000.0, 1.0);
                Self::labeled_drag_f32(ui, "height:", &mut self.pending_height, 50.0..=2000.0, 1.0);
                let cfg = self.sim.config_mut();
                Self::labeled_drag_f32(ui, "margin:", &mut cfg.margin, 0.0..=100.0, 0.5);
                Self::labeled_drag_f32(ui, "gap:", &mut cfg.gap, 5.0..=200.0, 1.0);
                if ui.button("Reseed ring").clicked() {
                    self.sim.resize(self.pending_width, self.pending_height);
                    log::info!(
                        "reseeded to {} points",
                        self.sim.layers()[0].ring.len()
                    );
                }

                ui.separator();
                ui.label("Display");
                ui.horizontal(|ui| {
                    ui.label("stroke:");
                    ui.color_edit_button_srgba(&mut self.stroke_color);
                });
                ui.checkbox(&mut self.show_points, "show points");
            });
    }

    /// Fills the path interior with the image texture, cropped
    /// cover-style to the canvas, the way the original clips its
    /// `<image>` to the liquid path.
    ///
    /// A frame whose outline cannot be triangulated (self-crossing
    /// under extreme forces) draws no fill; the stroke still shows.
    fn draw_fill(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        path: &ClosedPath,
        texture: &egui::TextureHandle,
    ) {
        let poly = fill::flatten(path, 8);
        let tris = fill::triangulate(&poly);
        if tris.is_empty() {
            return;
        }

        let cfg = self.sim.config();
        let canvas = Vec2::new(cfg.canvas_width(), cfg.canvas_height());
        let tex_size = texture.size();
        let image = Vec2::new(tex_size[0] as f32, tex_size[1] as f32);

        let mut mesh = egui::Mesh::with_texture(texture.id());
        mesh.vertices.reserve(poly.len());
        for &p in &poly {
            let uv = fill::cover_uv(p, canvas, image);
            mesh.vertices.push(egui::epaint::Vertex {
                pos: self.world_to_screen(p, rect),
                uv: egui::pos2(uv.x, uv.y),
                color: egui::Color32::WHITE,
            });
        }
        for t in tris {
            mesh.indices.extend(t.map(|i| i as u32));
        }
        painter.add(egui::Shape::mesh(mesh));
    }

    /// Strokes the fitted path, one cubic Bezier shape per segment.
    fn draw_path(&self, painter: &egui::Painter, rect: egui::Rect, path: &ClosedPath) {
        let stroke = egui::Stroke::new(2.0, self.stroke_color);
        let mut from = path.start;
        for seg in &path.segments {
            let shape = egui::epaint::CubicBezierShape::from_points_stroke(
                [
                    self.world_to_screen(from, rect),
                    self.world_to_screen(seg.c1, rect),
                    self.world_to_screen(seg.c2, rect),
                    self.world_to_screen(seg.to, rect),
                ],
                false,
                egui::Color32::TRANSPARENT,
                stroke,
            );
            painter.add(shape);
            from = seg.to;
        }
    }

    /// Draws the raw ring points and their control offsets.
    fn draw_points(&self, painter: &egui::Painter, rect: egui::Rect) {
        for p in &self.sim.layers()[0].ring.points {
            let pos = self.world_to_screen(p.pos, rect);
            painter.circle_filled(pos, 2.5, egui::Color32::LIGHT_RED);
            for c in [p.c_prev, p.c_next] {
                let c = self.world_to_screen(c, rect);
                painter.line_segment(
                    [pos, c],
                    egui::Stroke::new(1.0, egui::Color32::from_gray(100)),
                );
                painter.circle_filled(c, 1.5, egui::Color32::LIGHT_BLUE);
            }
        }
    }

    /// Builds the central panel: pointer routing, stepping, drawing.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Pointer routing: the touch is replaced wholesale every
            // frame, present inside the band and absent outside it.
            let touch = response
                .hover_pos()
                .and_then(|p| route_pointer(self.screen_to_world(p, rect), self.sim.config()));
            self.sim.set_touch(touch);

            if self.running {
                self.sim.step();
            }

            // Faint outline of the interior rectangle the hover flip
            // is tied to.
            let cfg = *self.sim.config();
            let interior = egui::Rect::from_min_max(
                self.world_to_screen(Vec2::new(cfg.margin, cfg.margin), rect),
                self.world_to_screen(
                    Vec2::new(cfg.margin + cfg.width, cfg.margin + cfg.height),
                    rect,
                ),
            );
            painter.rect_stroke(
                interior,
                egui::CornerRadius::ZERO,
                egui::Stroke::new(1.0, egui::Color32::from_gray(60)),
                egui::StrokeKind::Middle,
            );

            if let Some(path) = self.sim.path(0) {
                if let Some(texture) = &self.texture {
                    self.draw_fill(&painter, rect, &path, texture);
                }
                self.draw_path(&painter, rect, &path);
            }

            if self.show_points {
                self.draw_points(&painter, rect);
            }

            // One step per repaint while running: the simulation speed
            // is tied to the display refresh rate by design.
            if self.running {
                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(image) = self.pending_image.take() {
            self.texture =
                Some(ctx.load_texture("liquid_image", image, egui::TextureOptions::LINEAR));
        }

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

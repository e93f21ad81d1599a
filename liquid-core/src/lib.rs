//! Core library for the liquid outline simulation: a ring of boundary
//! particles that deforms organically under pointer influence and is
//! fitted with a smooth closed cubic-Bezier curve every frame.
//!
//! Main components:
//! - [`ring`] — boundary particles and the perimeter seeding.
//! - [`layer`] — a ring paired with its physics parameters.
//! - [`touch`] — the synthetic pointer sample.
//! - [`config`] — global configuration with resolved defaults.
//! - [`phases`] — the per-frame force and spline-fit passes.
//! - [`path`] — closed cubic-Bezier path assembly and SVG output.
//! - [`simulation`] — the façade tying it together, stepped once per
//!   display frame by the host.
//! - [`types`] — shared type aliases and IDs.

pub mod config;
pub mod layer;
pub mod path;
pub mod phases;
pub mod ring;
pub mod simulation;
pub mod touch;
pub mod types;

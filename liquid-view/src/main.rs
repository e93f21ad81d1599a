//! Application entry point for the liquid outline viewer.
//!
//! This binary sets up logging and eframe/egui, loads the optional
//! image, and delegates all interactive logic and rendering to
//! [`Viewer`] from the `viewer` module.

mod fill;
mod viewer;

use viewer::Viewer;

/// Decodes the image to clip to the outline, if a path was given.
///
/// A file that cannot be read or decoded is logged and skipped; the
/// viewer then strokes the outline without a fill.
fn load_image(path: &str) -> Option<egui::ColorImage> {
    match image::open(path) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            log::info!("loaded image {path} ({}x{})", size[0], size[1]);
            Some(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
        }
        Err(err) => {
            log::warn!("could not load image {path}: {err}");
            None
        }
    }
}

/// Starts the native eframe application.
///
/// Usage: `liquid-view [image-file]`. Logging goes through
/// `env_logger` (configure with `RUST_LOG`). All UI state and
/// rendering are handled by [`Viewer`].
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    env_logger::init();

    let src_image = std::env::args().nth(1).and_then(|p| load_image(&p));

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Liquid Outline",
        options,
        Box::new(move |_cc| {
            // Construct the root app state for the viewer.
            Ok(Box::new(Viewer::new(src_image)))
        }),
    )
}

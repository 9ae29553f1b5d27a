//! Per-window state.

use serde::Serialize;

use emubridge_common::{Bitmap, LogicalSize, PhysicalSize, ProtocolError, WindowHandle};

use crate::canvas::Canvas;

/// One engine window and its backing surface.
#[derive(Debug, Clone)]
pub struct Window {
    handle: WindowHandle,
    title: String,
    canvas: Canvas,
    scale_factor: f64,
}

/// Read-only summary of a window for host UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub title: String,
    pub logical: LogicalSize,
    pub physical: PhysicalSize,
    pub scale_factor: f64,
}

impl Window {
    /// A window with an empty title and a 0x0 surface.
    pub fn new(handle: WindowHandle) -> Self {
        Self {
            handle,
            title: String::new(),
            canvas: Canvas::new(),
            scale_factor: 1.0,
        }
    }

    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Scale factor in effect at the last resize.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Size the surface to `logical` units at `scale_factor`.
    ///
    /// The buffer is sized in physical pixels so nothing is resampled on
    /// display. The draw context is then reset, smoothing turned off and
    /// the transform set to exactly `scale_factor`, so later draws use
    /// logical coordinates whatever state the context held before.
    ///
    /// A physical size over the surface limit is an error and changes
    /// nothing.
    pub fn resize(&mut self, logical: LogicalSize, scale_factor: f64) -> Result<(), ProtocolError> {
        self.canvas
            .set_size(PhysicalSize::from_logical(logical, scale_factor))?;
        self.canvas.set_style_size(logical);

        let ctx = self.canvas.context_mut();
        ctx.reset();
        ctx.set_image_smoothing_enabled(false);
        ctx.scale(scale_factor, scale_factor);

        self.scale_factor = scale_factor;
        Ok(())
    }

    /// Draw a frame at the origin, replacing what was there.
    pub fn present(&mut self, bitmap: &Bitmap) {
        self.canvas.draw_image(bitmap, 0.0, 0.0);
    }

    pub fn info(&self) -> WindowInfo {
        WindowInfo {
            handle: self.handle,
            title: self.title.clone(),
            logical: self.canvas.style_size(),
            physical: self.canvas.size(),
            scale_factor: self.scale_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_window_defaults() {
        let win = Window::new(WindowHandle(4));
        assert_eq!(win.handle(), WindowHandle(4));
        assert_eq!(win.title(), "");
        assert_eq!(win.canvas().size(), PhysicalSize::new(0, 0));
        assert_eq!(win.scale_factor(), 1.0);
    }

    #[test]
    fn resize_sets_both_sizes() {
        let mut win = Window::new(WindowHandle(1));
        win.resize(LogicalSize::new(100, 50), 2.0).unwrap();
        assert_eq!(win.canvas().size(), PhysicalSize::new(200, 100));
        assert_eq!(win.canvas().style_size(), LogicalSize::new(100, 50));
        assert_eq!(win.scale_factor(), 2.0);
    }

    #[test]
    fn resize_discards_prior_transform() {
        let mut win = Window::new(WindowHandle(1));
        win.canvas_mut().context_mut().scale(3.0, 3.0);
        win.canvas_mut().context_mut().translate(7.0, 7.0);
        win.canvas_mut().context_mut().set_image_smoothing_enabled(true);

        win.resize(LogicalSize::new(10, 10), 2.0).unwrap();
        let ctx = win.canvas().context();
        assert_eq!(ctx.transform().scale_x, 2.0);
        assert_eq!(ctx.transform().scale_y, 2.0);
        assert_eq!(ctx.transform().translate_x, 0.0);
        assert!(!ctx.image_smoothing_enabled());
    }

    #[test]
    fn oversized_resize_keeps_previous_state() {
        let mut win = Window::new(WindowHandle(1));
        win.resize(LogicalSize::new(10, 10), 2.0).unwrap();

        let err = win
            .resize(LogicalSize::new(u32::MAX, u32::MAX), 2.0)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::SurfaceTooLarge { .. }));
        assert_eq!(win.canvas().size(), PhysicalSize::new(20, 20));
        assert_eq!(win.canvas().style_size(), LogicalSize::new(10, 10));
    }

    #[test]
    fn present_uses_logical_coordinates() {
        let mut win = Window::new(WindowHandle(1));
        win.resize(LogicalSize::new(2, 2), 2.0).unwrap();
        win.present(&Bitmap::solid(2, 2, [10, 20, 30, 255]));

        // A 2x2 logical frame covers the whole 4x4 physical buffer.
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(win.canvas().pixel(x, y), Some([10, 20, 30, 255]));
            }
        }
    }

    #[test]
    fn info_reflects_state() {
        let mut win = Window::new(WindowHandle(2));
        win.set_title("Minesweeper".into());
        win.resize(LogicalSize::new(30, 20), 1.5).unwrap();

        let info = win.info();
        assert_eq!(info.handle, WindowHandle(2));
        assert_eq!(info.title, "Minesweeper");
        assert_eq!(info.logical, LogicalSize::new(30, 20));
        assert_eq!(info.physical, PhysicalSize::new(45, 30));
        assert_eq!(info.scale_factor, 1.5);
    }

    #[test]
    fn info_serializes_for_host_ui() {
        let info = Window::new(WindowHandle(3)).info();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["handle"], 3);
        assert_eq!(json["title"], "");
        assert_eq!(json["physical"]["width"], 0);
    }
}

//! 2D drawing state attached to a canvas.

/// Axis-aligned affine transform from logical to physical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Map a logical point to physical coordinates.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.scale_x * x + self.translate_x,
            self.scale_y * y + self.translate_y,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Mutable drawing state: current transform and resampling mode.
///
/// Operations compose onto the current state the way a canvas 2D context
/// does; only [`DrawContext::reset`] returns to the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawContext {
    transform: Transform,
    image_smoothing_enabled: bool,
}

impl DrawContext {
    pub fn new() -> Self {
        Self {
            transform: Transform::IDENTITY,
            image_smoothing_enabled: true,
        }
    }

    /// Restore the default state: identity transform, smoothing on.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Post-multiply a scale onto the current transform.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.transform.scale_x *= sx;
        self.transform.scale_y *= sy;
    }

    /// Post-multiply a translation onto the current transform.
    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.transform.translate_x += self.transform.scale_x * tx;
        self.transform.translate_y += self.transform.scale_y * ty;
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn image_smoothing_enabled(&self) -> bool {
        self.image_smoothing_enabled
    }

    pub fn set_image_smoothing_enabled(&mut self, enabled: bool) {
        self.image_smoothing_enabled = enabled;
    }
}

impl Default for DrawContext {
    fn default() -> Self {
        Self::new()
    }
}

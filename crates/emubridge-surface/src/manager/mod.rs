//! The set of live windows and the engine operations on it.

use std::collections::HashMap;

use tracing::{debug, warn};

use emubridge_common::{Bitmap, LogicalSize, ProtocolError, WindowHandle};

use crate::display::DisplayEnvironment;
use crate::window::{Window, WindowInfo};

/// Told when the window set changes structurally (creation, title,
/// size, removal). Frame presentation is not reported.
pub trait WindowObserver {
    fn on_window_changed(&mut self);
}

/// Owns every live window, keyed by engine handle.
pub struct SurfaceManager {
    windows: HashMap<WindowHandle, Window>,
    display: Box<dyn DisplayEnvironment>,
}

impl SurfaceManager {
    pub fn new(display: Box<dyn DisplayEnvironment>) -> Self {
        Self {
            windows: HashMap::new(),
            display,
        }
    }

    /// Register a new window. Handles must be unique among live windows.
    pub fn window_create(
        &mut self,
        handle: WindowHandle,
        observer: &mut dyn WindowObserver,
    ) -> Result<(), ProtocolError> {
        if self.windows.contains_key(&handle) {
            return Err(ProtocolError::DuplicateWindow(handle));
        }
        self.windows.insert(handle, Window::new(handle));
        debug!(%handle, "window created");
        observer.on_window_changed();
        Ok(())
    }

    pub fn window_set_title(
        &mut self,
        handle: WindowHandle,
        title: String,
        observer: &mut dyn WindowObserver,
    ) -> Result<(), ProtocolError> {
        let win = self.lookup_mut(handle)?;
        debug!(%handle, title = %title, "window title changed");
        win.set_title(title);
        observer.on_window_changed();
        Ok(())
    }

    /// Resize to `width` x `height` logical units at the display's
    /// current scale factor.
    pub fn window_set_size(
        &mut self,
        handle: WindowHandle,
        width: u32,
        height: u32,
        observer: &mut dyn WindowObserver,
    ) -> Result<(), ProtocolError> {
        let scale_factor = self.current_scale_factor();
        let win = self.lookup_mut(handle)?;
        win.resize(LogicalSize::new(width, height), scale_factor)?;
        debug!(
            %handle,
            width,
            height,
            scale_factor,
            physical_width = win.canvas().width(),
            physical_height = win.canvas().height(),
            "window resized"
        );
        observer.on_window_changed();
        Ok(())
    }

    /// Present a frame. Content changes do not notify the observer.
    pub fn window_show(&mut self, handle: WindowHandle, bitmap: &Bitmap) -> Result<(), ProtocolError> {
        self.lookup_mut(handle)?.present(bitmap);
        Ok(())
    }

    /// Remove a window. The handle may later be created again as a new window.
    pub fn window_destroy(
        &mut self,
        handle: WindowHandle,
        observer: &mut dyn WindowObserver,
    ) -> Result<(), ProtocolError> {
        if self.windows.remove(&handle).is_none() {
            return Err(ProtocolError::UnknownWindow(handle));
        }
        debug!(%handle, "window destroyed");
        observer.on_window_changed();
        Ok(())
    }

    pub fn get(&self, handle: WindowHandle) -> Option<&Window> {
        self.windows.get(&handle)
    }

    /// Handles of all live windows, ascending.
    pub fn handles(&self) -> Vec<WindowHandle> {
        let mut handles: Vec<WindowHandle> = self.windows.keys().copied().collect();
        handles.sort();
        handles
    }

    /// Summaries of all live windows, ordered by handle.
    pub fn snapshot(&self) -> Vec<WindowInfo> {
        self.handles()
            .into_iter()
            .filter_map(|h| self.windows.get(&h).map(Window::info))
            .collect()
    }

    /// Iterate over windows in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.windows.values()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn lookup_mut(&mut self, handle: WindowHandle) -> Result<&mut Window, ProtocolError> {
        self.windows
            .get_mut(&handle)
            .ok_or(ProtocolError::UnknownWindow(handle))
    }

    fn current_scale_factor(&self) -> f64 {
        let scale_factor = self.display.scale_factor();
        if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            warn!(scale_factor, "unusable display scale factor, using 1.0");
            1.0
        }
    }
}

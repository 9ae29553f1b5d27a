//! PNG export of window surfaces.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use tracing::debug;

use emubridge_common::BridgeError;
use emubridge_surface::SurfaceManager;

/// Write every non-empty window surface to `dir` as `window-<handle>.png`,
/// at physical resolution. Returns the files written, in handle order.
pub fn export_windows(windows: &SurfaceManager, dir: &Path) -> Result<Vec<PathBuf>, BridgeError> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for handle in windows.handles() {
        let Some(window) = windows.get(handle) else {
            continue;
        };
        let canvas = window.canvas();
        if canvas.width() == 0 || canvas.height() == 0 {
            debug!(%handle, "skipping window with empty surface");
            continue;
        }

        let png = encode_rgba_as_png(canvas.width(), canvas.height(), canvas.pixels())
            .map_err(|e| BridgeError::Export(format!("window {handle}: {e}")))?;
        let path = dir.join(format!("window-{handle}.png"));
        std::fs::write(&path, png)?;
        debug!(%handle, path = %path.display(), "surface exported");
        written.push(path);
    }
    Ok(written)
}

/// Encode raw RGBA pixels as a PNG byte buffer.
fn encode_rgba_as_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, String> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(|e| e.to_string())?;
        writer.write_image_data(rgba).map_err(|e| e.to_string())?;
    }
    Ok(buf.into_inner())
}

//! Callbacks from the bridge into the surrounding application.

use emubridge_surface::WindowObserver;

/// What the bridge needs from the application hosting it.
///
/// Callbacks run synchronously inside dispatch and get no access to the
/// bridge. A host that wants to act on the engine in response (restart it,
/// say) must record that and do it after dispatch returns.
pub trait EmulatorHost: WindowObserver {
    /// The engine terminated with `code`.
    fn exit(&mut self, code: i32);

    /// The engine logged an error.
    fn on_error(&mut self, message: &str);

    /// Text the engine wrote to standard output.
    fn on_stdout(&mut self, text: &str);
}

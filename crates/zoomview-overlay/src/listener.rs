//! Change notifications from the viewer.

use std::rc::Rc;

use crate::artwork::Overlay;

/// Handle for a registered overlay listener, used to unregister it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u64);

/// Receives notifications about overlay edits.
///
/// Every method has a no-op default so implementors pick what they need.
/// Listeners are called synchronously on the thread driving the viewer.
pub trait OverlayListener {
    /// Called once when a handle drag ends, or after a programmatic handle
    /// move, with the artwork's final state.
    fn on_artwork_changed(&self, _index: usize, _overlay: &Overlay) {}

    /// Called when an artwork becomes the selected one.
    fn on_selection_changed(&self, _index: usize, _overlay: &Overlay) {}
}

impl<T: OverlayListener + ?Sized> OverlayListener for Rc<T> {
    fn on_artwork_changed(&self, index: usize, overlay: &Overlay) {
        (**self).on_artwork_changed(index, overlay)
    }

    fn on_selection_changed(&self, index: usize, overlay: &Overlay) {
        (**self).on_selection_changed(index, overlay)
    }
}

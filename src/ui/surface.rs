//! The optional UI surface the page talks to.
//!
//! Every method has a no-op default so a host only implements the parts of
//! the UI it actually has. A missing search box or locate button simply means
//! those calls do nothing.

use crate::animation::ViewTransition;
use crate::layers::marker::Marker;
use crate::search::Suggestion;
use crate::ui::panel::PanelContent;

pub trait PageSurface {
    /// Blocking, user-facing message
    fn alert(&mut self, _message: &str) {}

    /// Enables or disables the "locate me" control
    fn set_locate_enabled(&mut self, _enabled: bool) {}

    /// Replaces the live suggestion list; an empty slice hides it
    fn show_suggestions(&mut self, _suggestions: &[Suggestion]) {}

    fn render_panel(&mut self, _panel: &PanelContent) {}

    fn clear_panel(&mut self) {}

    /// The viewport moved; animated transitions should be played back
    fn view_changed(&mut self, _transition: &ViewTransition) {}

    /// The set of visible spot markers changed
    fn markers_changed(&mut self, _visible: usize) {}

    /// A marker's popup should be opened
    fn open_popup(&mut self, _marker: &Marker) {}
}

/// Surface without any UI
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl PageSurface for NullSurface {}

impl<S: PageSurface + ?Sized> PageSurface for &mut S {
    fn alert(&mut self, message: &str) {
        (**self).alert(message)
    }

    fn set_locate_enabled(&mut self, enabled: bool) {
        (**self).set_locate_enabled(enabled)
    }

    fn show_suggestions(&mut self, suggestions: &[Suggestion]) {
        (**self).show_suggestions(suggestions)
    }

    fn render_panel(&mut self, panel: &PanelContent) {
        (**self).render_panel(panel)
    }

    fn clear_panel(&mut self) {
        (**self).clear_panel()
    }

    fn view_changed(&mut self, transition: &ViewTransition) {
        (**self).view_changed(transition)
    }

    fn markers_changed(&mut self, visible: usize) {
        (**self).markers_changed(visible)
    }

    fn open_popup(&mut self, marker: &Marker) {
        (**self).open_popup(marker)
    }
}

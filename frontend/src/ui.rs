//! DOM access seen by the controller.
//!
//! Elements are addressed by their DOM id (see [`crate::config`]), the way
//! `getElementById` would address them. The browser implementation lives in
//! [`crate::components::SignalUi`].

use crate::types::StatusBlock;

/// Property mutations on the widget's elements.
pub trait UiPort {
    /// Show or hide an element.
    fn set_visible(&self, id: &str, visible: bool);

    /// Replace an element's text content.
    fn set_text(&self, id: &str, text: &str);

    /// Set an element's width as a percentage.
    fn set_width_percent(&self, id: &str, percent: f64);

    /// Reset an input's value to empty.
    fn clear_value(&self, id: &str);

    /// Replace the content of a status region.
    fn render_status(&self, id: &str, blocks: Vec<StatusBlock>);
}

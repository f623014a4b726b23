//! Terminal rendering for the overlay.

pub mod overlay;
pub mod theme;

pub use overlay::render;
pub use theme::Theme;

//! Table rendering and terminal styling
//!
//! Colour handling degrades to plain text when colours are disabled, so the
//! same renderer serves terminals, pipes and files.

pub mod align;
pub mod cells;
pub mod colours;
pub mod config;
pub mod table;

pub use align::{visible_width, Alignment};
pub use cells::format_cell;
pub use colours::ColourManager;
pub use config::{ColourConfig, ColourPalette, ColourTheme};
pub use table::{Column, RenderedReport, TableLayout, TableRenderer};

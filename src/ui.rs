//! Output rendering for fxplore.
//!
//! - [render]: the bordered listing table (header, rows, footer) and [RenderOptions].

pub mod render;

pub use render::{RenderOptions, draw_rule, render_footer, render_header, render_row};

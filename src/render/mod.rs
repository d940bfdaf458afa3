//! Presentation of signal snapshots

pub mod html;

pub use html::{render_empty_page, render_page, render_row, RenderOptions};

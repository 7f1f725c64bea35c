//! Scribboard Render Library
//!
//! Turns a scene into a display list, rasterizes it in software and exports
//! PNG snapshots.

pub mod export;
pub mod pipeline;
pub mod raster;
mod renderer;

pub use export::{encode_png, export, sanitize_title, ExportService, ExportedImage};
pub use pipeline::{render, DisplayList, DrawCommand};
pub use raster::{load_font, Rasterizer};
pub use renderer::{RenderResult, RenderStyle, Renderer, RendererError};

//! Rendering Adapter: turns per-column raycast output into a picture.
//!
//! # Invariants
//! - Renderers only read engine buffers; they never mutate hit records.
//! - Column order is the engine's column order, left to right.
//!
//! Texture sampling and shading belong to real renderers; this crate ships a
//! debug text renderer used by the CLI and in tests.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "gridcast-render v0.1.0"
}

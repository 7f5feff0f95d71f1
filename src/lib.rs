//! starfield - headless rendering and hosting for the particle field background.
//!
//! The simulation itself lives in `starfield-sim`; this crate adds scene
//! files, an SVG surface and the HTML host page for the wasm build.

pub mod page;
pub mod scene;
pub mod svg_writer;

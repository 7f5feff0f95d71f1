//! Particle field simulation for the starfield background
//!
//! A fixed set of drifting particles joined by faint proximity lines and
//! pulled toward the pointer. The crate has no I/O: drawing goes through the
//! [`DrawSurface`] trait so the same field can render to a browser canvas,
//! an SVG document, or a recording used in tests.

pub mod field;
pub mod particle;
pub mod surface;
pub mod theme;

pub use field::{FieldEvent, FrameStats, ParticleField, init_particles, particle_count};
pub use particle::{Particle, Point, Rgb, Rgba, Viewport};
pub use surface::{DrawOp, DrawSurface, RecordingSurface, SurfaceError};
pub use theme::{Theme, UnknownTheme};

//! Particle and geometry value types
//!
//! Plain data shared by the simulation, the drawing surfaces and the
//! serialized state dumps.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point (or displacement) in canvas pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Length when treated as a vector
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Pixel dimensions of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Area in square pixels
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// True when nothing can be drawn
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Whether `point` lies inside the closed viewport rectangle
    pub fn contains(&self, point: Point) -> bool {
        (0.0..=f64::from(self.width)).contains(&point.x)
            && (0.0..=f64::from(self.height)).contains(&point.y)
    }
}

/// An opaque 8-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an opacity
    pub const fn with_alpha(self, a: f64) -> Rgba {
        Rgba { rgb: self, a }
    }
}

/// Formats as a CSS hex color (`#b0c4de`)
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A color with a floating point opacity in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f64,
}

/// Formats as a CSS `rgba()` color
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.a
        )
    }
}

/// A single animated point of the field
///
/// Everything except position and velocity is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Position in canvas pixels
    pub position: Point,
    /// Velocity in pixels per frame
    pub velocity: Point,
    /// Drawn radius, in [0.5, 2.5)
    pub radius: f64,
    /// Fill color, baked in from the theme palette
    pub color: Rgb,
    /// Fill opacity, in [0.2, 1.0)
    pub alpha: f64,
    /// Distance under which this particle connects to later ones, in [50, 150)
    pub connection_radius: f64,
}

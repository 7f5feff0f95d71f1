//! Drawing surface abstraction
//!
//! The field draws through this trait, modelled on the subset of the
//! canvas 2D API it needs. Global alpha and line width are surface state,
//! exactly like on a canvas context.

use thiserror::Error;

use crate::particle::{Point, Rgb, Rgba, Viewport};

/// Errors raised by a drawing surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The backing context could not be obtained
    #[error("drawing context not available")]
    ContextUnavailable,

    /// A draw call was rejected by the backend
    #[error("draw call failed: {0}")]
    Draw(String),
}

/// A 2D target the field can render onto
pub trait DrawSurface {
    /// Erase the whole surface
    fn clear(&mut self, viewport: Viewport) -> Result<(), SurfaceError>;

    /// Width used by subsequent strokes
    fn set_line_width(&mut self, width: f64);

    /// Stroke a straight segment
    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba) -> Result<(), SurfaceError>;

    /// Opacity multiplier for subsequent draw calls
    fn set_global_alpha(&mut self, alpha: f64);

    /// Fill a full circle
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb) -> Result<(), SurfaceError>;
}

/// One recorded draw call with the surface state it ran under
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear {
        viewport: Viewport,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        line_width: f64,
        global_alpha: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Rgb,
        global_alpha: f64,
    },
}

/// Surface that records calls instead of drawing
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    line_width: f64,
    global_alpha: f64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            line_width: 1.0,
            global_alpha: 1.0,
        }
    }

    /// Everything recorded so far
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of recorded line strokes
    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }

    /// Number of recorded circle fills
    pub fn circle_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
            .count()
    }

    /// Current global alpha
    pub fn global_alpha(&self) -> f64 {
        self.global_alpha
    }

    /// Drop recorded ops, keeping surface state
    pub fn reset(&mut self) {
        self.ops.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, viewport: Viewport) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::Clear { viewport });
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color,
            line_width: self.line_width,
            global_alpha: self.global_alpha,
        });
        Ok(())
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.global_alpha = alpha;
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
            global_alpha: self.global_alpha,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_state_in_effect() {
        let mut surface = RecordingSurface::new();
        surface.set_line_width(0.3);
        surface
            .stroke_line(
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                Rgb::new(1, 2, 3).with_alpha(0.5),
            )
            .unwrap();
        surface.set_global_alpha(0.4);
        surface
            .fill_circle(Point::new(2.0, 2.0), 1.0, Rgb::new(4, 5, 6))
            .unwrap();

        match &surface.ops()[0] {
            DrawOp::Line {
                line_width,
                global_alpha,
                ..
            } => {
                assert_eq!(*line_width, 0.3);
                assert_eq!(*global_alpha, 1.0);
            }
            op => panic!("expected line, got {op:?}"),
        }
        match &surface.ops()[1] {
            DrawOp::Circle { global_alpha, .. } => assert_eq!(*global_alpha, 0.4),
            op => panic!("expected circle, got {op:?}"),
        }
        assert_eq!(surface.line_count(), 1);
        assert_eq!(surface.circle_count(), 1);
    }

    #[test]
    fn reset_keeps_alpha() {
        let mut surface = RecordingSurface::new();
        surface.set_global_alpha(0.25);
        surface.clear(Viewport::new(10, 10)).unwrap();
        surface.reset();

        assert!(surface.ops().is_empty());
        assert_eq!(surface.global_alpha(), 0.25);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            SurfaceError::ContextUnavailable.to_string(),
            "drawing context not available"
        );
        assert_eq!(
            SurfaceError::Draw("arc".to_string()).to_string(),
            "draw call failed: arc"
        );
    }
}

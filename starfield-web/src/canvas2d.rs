//! 2D Canvas drawing surface
//!
//! Draws the particle field onto an HTML canvas through its 2D context.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use starfield_sim::{DrawSurface, Point, Rgb, Rgba, SurfaceError, Viewport};

/// 2D Canvas surface
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Create surface from canvas element
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| SurfaceError::Draw(format!("{e:?}")))?
            .ok_or(SurfaceError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::ContextUnavailable)?;

        Ok(Self { canvas, ctx })
    }

    /// Match the canvas backing store to the viewport
    pub fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self, viewport: Viewport) -> Result<(), SurfaceError> {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(viewport.width),
            f64::from(viewport.height),
        );
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba) -> Result<(), SurfaceError> {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
        Ok(())
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb) -> Result<(), SurfaceError> {
        self.ctx.begin_path();
        self.ctx
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
            .map_err(|e| SurfaceError::Draw(format!("arc: {e:?}")))?;
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill();
        Ok(())
    }
}

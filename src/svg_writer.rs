//! SVG rendering of a single frame
//!
//! `SvgSurface` collects the draw calls of the most recent frame (each
//! `clear` starts over) and renders them as a standalone SVG document.

use askama::Template;
use starfield_sim::{DrawSurface, Point, Rgb, Rgba, SurfaceError, Theme, Viewport};

/// A stroked connection, pre-formatted for the template
#[derive(Debug, Clone)]
pub struct SvgLine {
    pub x1: String,
    pub y1: String,
    pub x2: String,
    pub y2: String,
    pub stroke: String,
    pub opacity: String,
    pub width: String,
}

/// A filled particle, pre-formatted for the template
#[derive(Debug, Clone)]
pub struct SvgCircle {
    pub cx: String,
    pub cy: String,
    pub r: String,
    pub fill: String,
    pub opacity: String,
}

#[derive(Template)]
#[template(path = "frame.svg", escape = "none")]
struct FrameTemplate<'a> {
    width: u32,
    height: u32,
    background: String,
    lines: &'a [SvgLine],
    circles: &'a [SvgCircle],
}

/// Drawing surface producing SVG
#[derive(Debug, Clone)]
pub struct SvgSurface {
    viewport: Viewport,
    background: Rgb,
    line_width: f64,
    global_alpha: f64,
    lines: Vec<SvgLine>,
    circles: Vec<SvgCircle>,
}

fn coord(value: f64) -> String {
    format!("{value:.2}")
}

fn opacity(value: f64) -> String {
    format!("{:.3}", value.clamp(0.0, 1.0))
}

fn rgb(color: Rgb) -> String {
    format!("rgb({}, {}, {})", color.r, color.g, color.b)
}

impl SvgSurface {
    pub fn new(viewport: Viewport, theme: Theme) -> Self {
        Self {
            viewport,
            background: theme.background(),
            line_width: 1.0,
            global_alpha: 1.0,
            lines: Vec::new(),
            circles: Vec::new(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    /// Render the current frame as an SVG document
    pub fn render(&self) -> anyhow::Result<String> {
        let template = FrameTemplate {
            width: self.viewport.width,
            height: self.viewport.height,
            background: self.background.to_string(),
            lines: &self.lines,
            circles: &self.circles,
        };
        let mut svg = template.render()?.trim_end().to_string();
        svg.push('\n');
        Ok(svg)
    }
}

impl DrawSurface for SvgSurface {
    fn clear(&mut self, viewport: Viewport) -> Result<(), SurfaceError> {
        self.viewport = viewport;
        self.lines.clear();
        self.circles.clear();
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba) -> Result<(), SurfaceError> {
        self.lines.push(SvgLine {
            x1: coord(from.x),
            y1: coord(from.y),
            x2: coord(to.x),
            y2: coord(to.y),
            stroke: rgb(color.rgb),
            opacity: opacity(color.a * self.global_alpha),
            width: format!("{}", self.line_width),
        });
        Ok(())
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.global_alpha = alpha;
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb) -> Result<(), SurfaceError> {
        self.circles.push(SvgCircle {
            cx: coord(center.x),
            cy: coord(center.y),
            r: coord(radius),
            fill: color.to_string(),
            opacity: opacity(self.global_alpha),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfield_sim::{Particle, ParticleField};

    fn star(x: f64, y: f64, alpha: f64) -> Particle {
        Particle {
            position: Point::new(x, y),
            velocity: Point::default(),
            radius: 1.5,
            color: Rgb::new(0xe6, 0xe6, 0xfa),
            alpha,
            connection_radius: 100.0,
        }
    }

    #[test]
    fn clear_discards_previous_frame() {
        let mut surface = SvgSurface::new(Viewport::new(10, 10), Theme::Dark);
        surface
            .fill_circle(Point::new(1.0, 1.0), 1.0, Rgb::new(0, 0, 0))
            .unwrap();
        surface.clear(Viewport::new(20, 20)).unwrap();

        assert_eq!(surface.circle_count(), 0);
        assert!(surface.render().unwrap().contains("width=\"20\""));
    }

    #[test]
    fn empty_frame_has_only_background() {
        let surface = SvgSurface::new(Viewport::new(0, 0), Theme::Light);
        let svg = surface.render().unwrap();
        assert!(svg.contains("fill=\"#f9fafb\""));
        assert!(!svg.contains("<circle"));
        assert!(!svg.contains("<line"));
    }

    #[test]
    fn stroke_opacity_folds_in_global_alpha() {
        let mut surface = SvgSurface::new(Viewport::new(10, 10), Theme::Dark);
        surface.set_global_alpha(0.5);
        surface
            .stroke_line(
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                Rgb::new(1, 2, 3).with_alpha(0.2),
            )
            .unwrap();
        assert_eq!(surface.lines[0].opacity, "0.100");
    }

    mod snapshots {
        use super::*;

        #[test]
        fn snapshot_two_connected_stars() {
            let viewport = Viewport::new(100, 80);
            let particles = vec![star(10.0, 10.0, 0.5), star(40.0, 50.0, 0.25)];
            let mut field = ParticleField::from_particles(viewport, Theme::Dark, particles);
            field.set_pointer(Point::new(500.0, 500.0));
            let mut surface = SvgSurface::new(viewport, Theme::Dark);

            field.step(&mut surface).unwrap();

            insta::assert_snapshot!(surface.render().unwrap(), @r###"
            <svg xmlns="http://www.w3.org/2000/svg" width="100" height="80" viewBox="0 0 100 80">
            <rect width="100%" height="100%" fill="#000000"/>
            <line x1="10.00" y1="10.00" x2="40.00" y2="50.00" stroke="rgb(100, 100, 255)" stroke-opacity="0.100" stroke-width="0.3"/>
            <circle cx="10.00" cy="10.00" r="1.50" fill="#e6e6fa" fill-opacity="0.500"/>
            <circle cx="40.00" cy="50.00" r="1.50" fill="#e6e6fa" fill-opacity="0.250"/>
            </svg>
            "###);
        }
    }
}

//! The particle field and its per-frame update
//!
//! Each frame applies pointer attraction, strokes proximity connections,
//! integrates and damps velocities, wraps particles at the viewport edges
//! and fills every particle as a circle. Damping is applied per frame, not
//! per unit of real time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::particle::{Particle, Point, Viewport};
use crate::surface::{DrawSurface, SurfaceError};
use crate::theme::Theme;

/// Square pixels of viewport per particle
pub const DENSITY_DIVISOR: u64 = 15_000;

/// Pointer attraction reaches this far (pixels)
pub const ATTRACTION_RADIUS: f64 = 150.0;

/// Attraction force is `(ATTRACTION_RADIUS - distance) / ATTRACTION_DIVISOR`
pub const ATTRACTION_DIVISOR: f64 = 1500.0;

/// Velocity multiplier applied every frame
pub const VELOCITY_DAMPING: f64 = 0.99;

/// Stroke width of connection lines
pub const CONNECTION_LINE_WIDTH: f64 = 0.3;

/// Number of particles for a viewport: one per 15,000 square pixels
pub fn particle_count(viewport: Viewport) -> usize {
    (viewport.area() / DENSITY_DIVISOR) as usize
}

/// Create a fresh particle set covering `viewport`
///
/// The count is deterministic; every attribute is drawn independently and
/// uniformly from its range.
pub fn init_particles<R: Rng>(viewport: Viewport, theme: Theme, rng: &mut R) -> Vec<Particle> {
    let count = particle_count(viewport);
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    let palette = theme.palette();

    (0..count)
        .map(|_| {
            let x = rng.gen_range(0.0..1.0) * width;
            let y = rng.gen_range(0.0..1.0) * height;
            let radius = rng.gen_range(0.5..2.5);
            let vx = rng.gen_range(-0.1..0.1);
            let vy = rng.gen_range(-0.1..0.1);
            let color = palette[rng.gen_range(0..palette.len())];
            let alpha = rng.gen_range(0.2..1.0);
            let connection_radius = rng.gen_range(50.0..150.0);

            Particle {
                position: Point::new(x, y),
                velocity: Point::new(vx, vy),
                radius,
                color,
                alpha,
                connection_radius,
            }
        })
        .collect()
}

/// Asynchronous inputs to the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldEvent {
    /// The surface changed size; regenerates the field
    Resize(Viewport),
    /// The pointer moved; updates the attraction target
    PointerMove(Point),
    /// The display theme changed; regenerates the field if different
    ThemeChange(Theme),
}

/// What a single step drew
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FrameStats {
    /// Connection lines stroked
    pub connections: usize,
    /// Particles filled
    pub particles: usize,
}

/// Simulation state for one drawing surface
pub struct ParticleField<R = StdRng> {
    particles: Vec<Particle>,
    viewport: Viewport,
    /// Attraction target; the top-left corner until the first pointer move
    pointer: Point,
    theme: Theme,
    rng: R,
}

impl ParticleField<StdRng> {
    /// Create a field seeded from OS entropy
    pub fn new(viewport: Viewport, theme: Theme) -> Self {
        Self::with_rng(viewport, theme, StdRng::from_entropy())
    }

    /// Create a reproducible field
    pub fn with_seed(viewport: Viewport, theme: Theme, seed: u64) -> Self {
        Self::with_rng(viewport, theme, StdRng::seed_from_u64(seed))
    }

    /// Create a field from an explicit particle set
    ///
    /// The particles are used as given; later regenerations draw from
    /// OS entropy.
    pub fn from_particles(viewport: Viewport, theme: Theme, particles: Vec<Particle>) -> Self {
        Self {
            particles,
            viewport,
            pointer: Point::default(),
            theme,
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> ParticleField<R> {
    /// Create a field drawing from the given random source
    pub fn with_rng(viewport: Viewport, theme: Theme, rng: R) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            viewport,
            pointer: Point::default(),
            theme,
            rng,
        };
        field.regenerate();
        field
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Replace the whole particle set for the current viewport and theme
    fn regenerate(&mut self) {
        self.particles = init_particles(self.viewport, self.theme, &mut self.rng);
        tracing::debug!(
            count = self.particles.len(),
            width = self.viewport.width,
            height = self.viewport.height,
            theme = %self.theme,
            "regenerated particle field"
        );
    }

    /// Adopt a new viewport size; always regenerates
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.regenerate();
    }

    /// Switch theme; regenerates only when the theme changes
    pub fn set_theme(&mut self, theme: Theme) {
        if theme != self.theme {
            self.theme = theme;
            self.regenerate();
        }
    }

    /// Move the attraction target
    pub fn set_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// Apply a queued input
    pub fn apply(&mut self, event: FieldEvent) {
        match event {
            FieldEvent::Resize(viewport) => self.resize(viewport),
            FieldEvent::PointerMove(pointer) => self.set_pointer(pointer),
            FieldEvent::ThemeChange(theme) => self.set_theme(theme),
        }
    }

    /// Advance one frame and draw it onto `surface`
    ///
    /// An empty viewport is a no-op. When the surface rejects a draw call
    /// the remaining draw calls of the frame are skipped but the physics
    /// still advances; the first error is returned.
    pub fn step<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<FrameStats, SurfaceError> {
        let mut stats = FrameStats::default();
        if self.viewport.is_empty() {
            return Ok(stats);
        }

        let mut fault = None;
        record(&mut fault, surface.clear(self.viewport));
        surface.set_line_width(CONNECTION_LINE_WIDTH);

        let n = self.particles.len();
        for i in 0..n {
            attract(&mut self.particles[i], self.pointer);

            // Only particles[i]'s radius decides, so the rule is asymmetric
            let (head, tail) = self.particles.split_at(i + 1);
            let p1 = &head[i];
            for p2 in tail {
                let distance = p1.position.distance_to(p2.position);
                if distance < p1.connection_radius && fault.is_none() {
                    let color = self
                        .theme
                        .connection_color(1.0 - distance / p1.connection_radius);
                    if record(&mut fault, surface.stroke_line(p1.position, p2.position, color)) {
                        stats.connections += 1;
                    }
                }
            }
        }

        let width = f64::from(self.viewport.width);
        let height = f64::from(self.viewport.height);

        for particle in &mut self.particles {
            integrate(particle);
            wrap(&mut particle.position, width, height);

            if fault.is_none() {
                surface.set_global_alpha(particle.alpha);
                let drawn =
                    surface.fill_circle(particle.position, particle.radius, particle.color);
                surface.set_global_alpha(1.0);
                if record(&mut fault, drawn) {
                    stats.particles += 1;
                }
            }
        }

        match fault {
            Some(err) => Err(err),
            None => Ok(stats),
        }
    }
}

/// Keep the first failure; true if `result` succeeded
fn record(fault: &mut Option<SurfaceError>, result: Result<(), SurfaceError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            fault.get_or_insert(err);
            false
        }
    }
}

/// Pull a particle toward the pointer when within range
fn attract(particle: &mut Particle, pointer: Point) {
    let dx = pointer.x - particle.position.x;
    let dy = pointer.y - particle.position.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance < ATTRACTION_RADIUS {
        // atan2 keeps a defined direction when the pointer sits on the particle
        let angle = dy.atan2(dx);
        let force = (ATTRACTION_RADIUS - distance) / ATTRACTION_DIVISOR;
        particle.velocity.x += angle.cos() * force;
        particle.velocity.y += angle.sin() * force;
    }
}

/// Move by velocity, then damp
fn integrate(particle: &mut Particle) {
    particle.position.x += particle.velocity.x;
    particle.position.y += particle.velocity.y;
    particle.velocity.x *= VELOCITY_DAMPING;
    particle.velocity.y *= VELOCITY_DAMPING;
}

/// Teleport to the opposite edge after leaving the viewport
fn wrap(position: &mut Point, width: f64, height: f64) {
    if position.x < 0.0 {
        position.x = width;
    }
    if position.x > width {
        position.x = 0.0;
    }
    if position.y < 0.0 {
        position.y = height;
    }
    if position.y > height {
        position.y = 0.0;
    }
}

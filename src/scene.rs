//! Scene files for headless rendering
//!
//! A scene describes one run of the field: viewport, theme, how many frames
//! to simulate, an optional seed, and pointer positions to replay. Scenes
//! are YAML; every field has a default.
//!
//! ```yaml
//! viewport: { width: 800, height: 600 }
//! theme: dark
//! frames: 120
//! seed: 7
//! pointer:
//!   - { frame: 10, x: 400, y: 300 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use starfield_sim::{
    DrawSurface, FrameStats, Particle, ParticleField, Point, SurfaceError, Theme, Viewport,
};
use thiserror::Error;

/// Errors that can occur while loading a scene
#[derive(Error, Debug)]
pub enum SceneError {
    /// The scene file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The scene file is not valid scene YAML
    #[error("parse error: {0}")]
    Parse(String),

    /// The scene parsed but describes a run that cannot produce a frame
    #[error("invalid scene: {0}")]
    Invalid(String),
}

/// Result type for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Final state of a scene run, as written by `render --format json`
#[derive(Debug, Serialize)]
pub struct FieldSnapshot<'a> {
    pub viewport: Viewport,
    pub theme: Theme,
    pub frames: u32,
    pub last_frame: FrameStats,
    pub particles: &'a [Particle],
}

impl<'a> FieldSnapshot<'a> {
    pub fn new(scene: &Scene, field: &'a ParticleField, last_frame: FrameStats) -> Self {
        Self {
            viewport: field.viewport(),
            theme: field.theme(),
            frames: scene.frames,
            last_frame,
            particles: field.particles(),
        }
    }
}

/// Pointer position applied at the start of a given frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub frame: u32,
    pub x: f64,
    pub y: f64,
}

/// A headless run of the particle field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// Page / document title
    pub title: String,
    pub viewport: Viewport,
    pub theme: Theme,
    /// Number of steps to simulate
    pub frames: u32,
    /// Seed for reproducible output; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Pointer positions to replay
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pointer: Vec<PointerSample>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            title: "Starfield".to_string(),
            viewport: Viewport::new(800, 600),
            theme: Theme::Dark,
            frames: 120,
            seed: None,
            pointer: Vec::new(),
        }
    }
}

/// Command-line values that take precedence over the scene file
#[derive(Debug, Clone, Default)]
pub struct SceneOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub theme: Option<Theme>,
    pub frames: Option<u32>,
    pub seed: Option<u64>,
}

impl Scene {
    /// Read a scene from a YAML file
    pub fn load(path: &Path) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Load `path` if given, otherwise start from the defaults
    pub fn load_or_default(path: Option<&Path>) -> SceneResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a scene from YAML text
    pub fn from_yaml(text: &str) -> SceneResult<Self> {
        // An empty document means "all defaults"
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let scene: Self =
            serde_yaml::from_str(text).map_err(|e| SceneError::Parse(e.to_string()))?;
        scene.validate()?;
        Ok(scene)
    }

    /// At least one frame must run, otherwise nothing is ever drawn
    pub fn validate(&self) -> SceneResult<()> {
        if self.frames == 0 {
            return Err(SceneError::Invalid("frames must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &SceneOverrides) {
        if let Some(width) = overrides.width {
            self.viewport.width = width;
        }
        if let Some(height) = overrides.height {
            self.viewport.height = height;
        }
        if let Some(theme) = overrides.theme {
            self.theme = theme;
        }
        if let Some(frames) = overrides.frames {
            self.frames = frames;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
    }

    /// Pointer positions scheduled for `frame`, in file order
    pub fn pointer_at(&self, frame: u32) -> impl Iterator<Item = Point> + '_ {
        self.pointer
            .iter()
            .filter(move |s| s.frame == frame)
            .map(|s| Point::new(s.x, s.y))
    }

    /// Build the field this scene starts from
    pub fn build_field(&self) -> ParticleField {
        match self.seed {
            Some(seed) => ParticleField::with_seed(self.viewport, self.theme, seed),
            None => ParticleField::new(self.viewport, self.theme),
        }
    }

    /// Simulate every frame onto `surface`
    ///
    /// Returns the final field and the stats of the last frame.
    pub fn run<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
    ) -> Result<(ParticleField, FrameStats), SurfaceError> {
        let mut field = self.build_field();
        let mut stats = FrameStats::default();

        for frame in 0..self.frames {
            for point in self.pointer_at(frame) {
                field.set_pointer(point);
            }
            stats = field.step(surface)?;
        }

        tracing::debug!(
            frames = self.frames,
            connections = stats.connections,
            particles = stats.particles,
            "scene finished"
        );
        Ok((field, stats))
    }
}

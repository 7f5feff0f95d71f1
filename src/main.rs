use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use starfield::page::{PageOptions, write_page};
use starfield::scene::{FieldSnapshot, Scene, SceneOverrides};
use starfield::svg_writer::SvgSurface;
use starfield_sim::Theme;

mod server;

/// Mouse-reactive particle field: headless renders, host page and dev server.
#[derive(Parser)]
#[command(name = "starfield")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Output format for `render`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Final frame as an SVG document
    Svg,
    /// Final particle state as JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a scene and write its last frame
    Render {
        /// Scene file (.yaml)
        #[arg(short, long)]
        scene: Option<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Viewport width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Viewport height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Color theme (light or dark)
        #[arg(long)]
        theme: Option<Theme>,

        /// Number of frames to simulate (at least 1)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        frames: Option<u32>,

        /// Random seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Svg)]
        format: Format,
    },
    /// Write the HTML host page for the wasm build
    Page {
        /// Output directory
        #[arg(short, long, default_value = "site")]
        output: PathBuf,

        /// Scene file (.yaml) providing title and theme
        #[arg(short, long)]
        scene: Option<PathBuf>,

        /// Color theme (light or dark)
        #[arg(long)]
        theme: Option<Theme>,
    },
    /// Start development server with live reload
    Serve {
        /// Output directory to serve
        #[arg(short, long, default_value = "site")]
        output: PathBuf,

        /// Scene file (.yaml); the page is regenerated when it changes
        #[arg(short, long)]
        scene: Option<PathBuf>,

        /// Color theme (light or dark)
        #[arg(long)]
        theme: Option<Theme>,

        /// Port to run the server on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn render(
    scene_path: Option<&Path>,
    overrides: &SceneOverrides,
    format: Format,
    output: &Path,
) -> anyhow::Result<()> {
    let mut scene = Scene::load_or_default(scene_path)?;
    scene.apply_overrides(overrides);
    tracing::info!(
        width = scene.viewport.width,
        height = scene.viewport.height,
        theme = %scene.theme,
        frames = scene.frames,
        "rendering scene"
    );

    let mut surface = SvgSurface::new(scene.viewport, scene.theme);
    let (field, stats) = scene.run(&mut surface)?;

    let contents = match format {
        Format::Svg => surface.render()?,
        Format::Json => {
            serde_json::to_string_pretty(&FieldSnapshot::new(&scene, &field, stats))? + "\n"
        }
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, contents).with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Rendered {} particles ({} connections) to {}",
        stats.particles,
        stats.connections,
        output.display()
    );
    Ok(())
}

fn page(scene_path: Option<&Path>, theme: Option<Theme>, output: &Path) -> anyhow::Result<()> {
    let scene = Scene::load_or_default(scene_path)?;
    let options = PageOptions {
        title: scene.title,
        theme: theme.unwrap_or(scene.theme),
        ..PageOptions::default()
    };
    let path = write_page(&options, output)?;
    println!("Generated host page {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            scene,
            output,
            width,
            height,
            theme,
            frames,
            seed,
            format,
        } => {
            let overrides = SceneOverrides {
                width,
                height,
                theme,
                frames,
                seed,
            };
            render(scene.as_deref(), &overrides, format, &output)?;
        }
        Commands::Page {
            output,
            scene,
            theme,
        } => {
            page(scene.as_deref(), theme, &output)?;
        }
        Commands::Serve {
            output,
            scene,
            theme,
            port,
        } => {
            server::serve(scene.as_deref(), theme, &output, port).await?;
        }
    }

    Ok(())
}

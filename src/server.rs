use std::path::{Path, PathBuf};

use axum::Router;
use notify::{Event, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tower_http::services::ServeDir;
use tower_livereload::LiveReloadLayer;

use starfield::page::{PageOptions, write_page};
use starfield::scene::Scene;
use starfield_sim::Theme;

/// Regenerate the host page from the scene file (or defaults)
fn regenerate(scene: Option<&Path>, theme: Option<Theme>, output: &Path) -> anyhow::Result<()> {
    let loaded = Scene::load_or_default(scene)?;
    let options = PageOptions {
        title: loaded.title,
        theme: theme.unwrap_or(loaded.theme),
        ..PageOptions::default()
    };
    write_page(&options, output)?;
    Ok(())
}

/// Start the development server with live reload
pub async fn serve(
    scene: Option<&Path>,
    theme: Option<Theme>,
    output: &Path,
    port: u16,
) -> anyhow::Result<()> {
    // Generate initial page
    regenerate(scene, theme, output)?;
    println!("Generated host page in {}", output.display());
    if !output.join("pkg").exists() {
        tracing::warn!(
            "{} has no pkg/ directory; build it with `wasm-pack build starfield-web --target web --out-dir {}`",
            output.display(),
            output.join("pkg").display()
        );
    }

    // Keep the scene watcher alive for the lifetime of the server
    let _scene_watcher = match scene {
        Some(scene) => Some(watch_scene(scene, theme, output)?),
        None => None,
    };

    // Create live reload layer
    let livereload = LiveReloadLayer::new();
    let reloader = livereload.reloader();

    // Set up file watcher for output directory to trigger browser reload
    let mut output_watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            if event.kind.is_modify() || event.kind.is_create() {
                reloader.reload();
            }
        }
    })?;
    output_watcher.watch(output, RecursiveMode::Recursive)?;

    // Build the router
    let app = Router::new()
        .fallback_service(ServeDir::new(output))
        .layer(livereload);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("Development server running at http://localhost:{port}");
    println!("Press Ctrl+C to stop");

    // Keep watcher alive
    let _output_watcher = output_watcher;

    axum::serve(listener, app).await?;

    Ok(())
}

/// Regenerate the page whenever the scene file changes
fn watch_scene(
    scene: &Path,
    theme: Option<Theme>,
    output: &Path,
) -> anyhow::Result<notify::RecommendedWatcher> {
    // Create channel for file change notifications
    let (tx, mut rx) = mpsc::channel::<()>(1);

    // The parent directory may also hold the output; only the scene counts
    let scene_name = scene.file_name().map(|name| name.to_os_string());
    let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            let touches_scene = event
                .paths
                .iter()
                .any(|p| p.file_name().map(|n| n.to_os_string()) == scene_name);
            if touches_scene && (event.kind.is_modify() || event.kind.is_create()) {
                // Notify the regeneration task
                let _ = tx.blocking_send(());
            }
        }
    })?;

    // Watch the scene file's parent directory
    let watch_path = scene
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    watcher.watch(&watch_path, RecursiveMode::NonRecursive)?;
    println!("Watching {} for changes...", scene.display());

    // Spawn regeneration task
    let scene = scene.to_path_buf();
    let output = output.to_path_buf();
    tokio::spawn(async move {
        while rx.recv().await.is_some() {
            // Debounce: wait a bit for rapid changes to settle
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

            // Drain any additional notifications
            while rx.try_recv().is_ok() {}

            match regenerate(Some(scene.as_path()), theme, &output) {
                Ok(()) => tracing::info!("regenerated host page"),
                Err(e) => tracing::error!("error regenerating: {e:#}"),
            }
        }
    });

    Ok(watcher)
}

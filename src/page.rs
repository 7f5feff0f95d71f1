//! Host page for the wasm build
//!
//! Writes an `index.html` that sizes a canvas to the viewport, loads the
//! `starfield-web` module from `pkg/` and mounts the field on the canvas.

use std::fs;
use std::path::{Path, PathBuf};

use askama::Template;
use serde::Serialize;
use starfield_sim::Theme;

/// What the page needs to know
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub title: String,
    pub theme: Theme,
    /// `id` of the canvas element
    pub canvas_id: String,
    /// Module path relative to the page, as produced by `wasm-pack --target web`
    pub module_path: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "Starfield".to_string(),
            theme: Theme::Dark,
            canvas_id: "starfield".to_string(),
            module_path: "./pkg/starfield_web.js".to_string(),
        }
    }
}

/// Values handed to the inline module script
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MountConfig<'a> {
    canvas_id: &'a str,
    theme: Theme,
    module: &'a str,
}

#[derive(Template)]
#[template(path = "index.html")]
struct PageTemplate<'a> {
    title: &'a str,
    theme: Theme,
    canvas_id: &'a str,
    background: String,
    mount_config: String,
}

/// Render the host page
pub fn render_page(options: &PageOptions) -> anyhow::Result<String> {
    let config = MountConfig {
        canvas_id: &options.canvas_id,
        theme: options.theme,
        module: &options.module_path,
    };
    // "</" would close the inline script early
    let mount_config = serde_json::to_string(&config)?.replace("</", "<\\/");

    let template = PageTemplate {
        title: &options.title,
        theme: options.theme,
        canvas_id: &options.canvas_id,
        background: options.theme.background().to_string(),
        mount_config,
    };
    Ok(template.render()?)
}

/// Write `index.html` into `output`, creating the directory if needed
pub fn write_page(options: &PageOptions, output: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(output)?;
    let path = output.join("index.html");
    fs::write(&path, render_page(options)?)?;
    tracing::debug!(path = %path.display(), theme = %options.theme, "wrote host page");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_mounts_configured_canvas() {
        let html = render_page(&PageOptions::default()).unwrap();
        assert!(html.contains("<canvas id=\"starfield\">"));
        assert!(html.contains("\"canvasId\":\"starfield\""));
        assert!(html.contains("\"theme\":\"dark\""));
        assert!(html.contains("\"module\":\"./pkg/starfield_web.js\""));
        assert!(html.contains("background: #000000"));
    }

    #[test]
    fn light_theme_uses_light_background() {
        let options = PageOptions {
            theme: Theme::Light,
            ..PageOptions::default()
        };
        let html = render_page(&options).unwrap();
        assert!(html.contains("background: #f9fafb"));
        assert!(html.contains("\"theme\":\"light\""));
    }

    #[test]
    fn title_is_escaped() {
        let options = PageOptions {
            title: "Stars & <Dust>".to_string(),
            ..PageOptions::default()
        };
        let html = render_page(&options).unwrap();
        assert!(!html.contains("<Dust>"));
        assert!(
            html.contains("<title>Stars &#38; &#60;Dust&#62;</title>")
                || html.contains("<title>Stars &amp; &lt;Dust&gt;</title>")
        );
    }

    #[test]
    fn script_close_tags_are_neutralized() {
        let options = PageOptions {
            module_path: "./pkg/</script>.js".to_string(),
            ..PageOptions::default()
        };
        let html = render_page(&options).unwrap();
        assert!(!html.contains("pkg/</script>"));
        assert!(html.contains("pkg/<\\/script>"));
    }

    #[test]
    fn writes_index_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("site");
        let path = write_page(&PageOptions::default(), &output).unwrap();

        assert_eq!(path, output.join("index.html"));
        let html = fs::read_to_string(path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}

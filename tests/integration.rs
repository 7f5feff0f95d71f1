use std::fs;
use std::process::Command;

#[test]
fn renders_reference_viewport_to_svg() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("frames/hero.svg");

    let status = Command::new(env!("CARGO_BIN_EXE_starfield"))
        .args([
            "render",
            "--width",
            "800",
            "--height",
            "600",
            "--frames",
            "10",
            "--seed",
            "7",
            "--output",
            output.to_str().unwrap(),
        ])
        .status()
        .expect("Failed to execute starfield");

    assert!(status.success(), "starfield exited with error");

    let svg = fs::read_to_string(&output).expect("Failed to read SVG");
    assert!(svg.starts_with("<svg"), "Missing svg root");
    assert!(
        svg.contains("viewBox=\"0 0 800 600\""),
        "Missing viewport dimensions"
    );
    assert_eq!(svg.matches("<circle").count(), 32, "Expected 32 particles");
    assert!(svg.contains("fill=\"#000000\""), "Missing dark background");
}

#[test]
fn renders_scene_file_to_json() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let scene = dir.path().join("scene.yaml");
    fs::write(
        &scene,
        "viewport: { width: 800, height: 600 }\ntheme: light\nframes: 5\nseed: 3\npointer:\n  - { frame: 0, x: 400, y: 300 }\n",
    )
    .expect("Failed to write scene");
    let output = dir.path().join("state.json");

    let status = Command::new(env!("CARGO_BIN_EXE_starfield"))
        .args([
            "render",
            "--scene",
            scene.to_str().unwrap(),
            "--format",
            "json",
            "--output",
            output.to_str().unwrap(),
        ])
        .status()
        .expect("Failed to execute starfield");

    assert!(status.success(), "starfield exited with error");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("Failed to read JSON"))
            .expect("Output is not JSON");
    assert_eq!(json["theme"], "light");
    assert_eq!(json["frames"], 5);
    assert_eq!(json["particles"].as_array().map(Vec::len), Some(32));
    for particle in json["particles"].as_array().unwrap() {
        let x = particle["position"]["x"].as_f64().unwrap();
        let y = particle["position"]["y"].as_f64().unwrap();
        assert!((0.0..=800.0).contains(&x));
        assert!((0.0..=600.0).contains(&y));
    }
}

#[test]
fn empty_viewport_renders_background_only() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("empty.svg");

    let status = Command::new(env!("CARGO_BIN_EXE_starfield"))
        .args([
            "render",
            "--width",
            "0",
            "--height",
            "0",
            "--output",
            output.to_str().unwrap(),
        ])
        .status()
        .expect("Failed to execute starfield");

    assert!(status.success(), "starfield exited with error");
    let svg = fs::read_to_string(&output).expect("Failed to read SVG");
    assert!(!svg.contains("<circle"));
}

#[test]
fn writes_host_page() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let site = dir.path().join("site");

    let status = Command::new(env!("CARGO_BIN_EXE_starfield"))
        .args(["page", "--output", site.to_str().unwrap(), "--theme", "light"])
        .status()
        .expect("Failed to execute starfield");

    assert!(status.success(), "starfield exited with error");
    let html = fs::read_to_string(site.join("index.html")).expect("index.html was not generated");
    assert!(html.contains("<canvas id=\"starfield\">"));
    assert!(html.contains("\"theme\":\"light\""));
}

#[test]
fn rejects_malformed_scene() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let scene = dir.path().join("bad.yaml");
    fs::write(&scene, "theme: sepia\n").expect("Failed to write scene");

    let status = Command::new(env!("CARGO_BIN_EXE_starfield"))
        .args([
            "render",
            "--scene",
            scene.to_str().unwrap(),
            "--output",
            dir.path().join("x.svg").to_str().unwrap(),
        ])
        .status()
        .expect("Failed to execute starfield");

    assert!(!status.success(), "malformed scene should fail");
}

#[test]
fn renders_bundled_hero_scene() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("hero.svg");

    let status = Command::new(env!("CARGO_BIN_EXE_starfield"))
        .args([
            "render",
            "--scene",
            "scenes/hero.yaml",
            "--frames",
            "30",
            "--output",
            output.to_str().unwrap(),
        ])
        .status()
        .expect("Failed to execute starfield");

    assert!(status.success(), "starfield exited with error");
    let svg = fs::read_to_string(&output).expect("Failed to read SVG");
    // 1280 x 720 / 15000
    assert_eq!(svg.matches("<circle").count(), 61);
}

#[test]
fn rejects_scene_without_frames() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let scene = dir.path().join("still.yaml");
    fs::write(&scene, "frames: 0\n").expect("Failed to write scene");
    let output = dir.path().join("still.json");

    let status = Command::new(env!("CARGO_BIN_EXE_starfield"))
        .args([
            "render",
            "--scene",
            scene.to_str().unwrap(),
            "--format",
            "json",
            "--output",
            output.to_str().unwrap(),
        ])
        .status()
        .expect("Failed to execute starfield");

    assert!(!status.success(), "a scene with no frames should fail");
    assert!(!output.exists());
}

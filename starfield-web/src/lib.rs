//! Browser binding for the starfield particle background
//!
//! This crate provides WASM bindings that mount the particle field on a
//! full-viewport canvas, feed it window resize and pointer events, and
//! drive it from `requestAnimationFrame`.

pub mod animation;
pub mod canvas2d;
pub mod logging;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

use starfield_sim::{FieldEvent, ParticleField, Point, Theme, Viewport};

use crate::animation::{AnimationLoop, EventListener, InputQueue};
use crate::canvas2d::CanvasSurface;

/// Initialize WASM panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(tracing::Level::INFO);
}

/// A mounted particle field
///
/// Dropping the handle (or calling `unmount`) stops the animation loop and
/// removes the window listeners.
#[wasm_bindgen]
pub struct Starfield {
    inputs: InputQueue,
    listeners: Vec<EventListener>,
    frames: Option<AnimationLoop>,
}

#[wasm_bindgen]
impl Starfield {
    /// Switch palette; takes effect on the next frame
    ///
    /// Ignored after `unmount`, since no frame will drain it.
    pub fn set_theme(&self, theme: &str) {
        if !self.is_mounted() {
            return;
        }
        self.inputs
            .push(FieldEvent::ThemeChange(Theme::resolve(theme)));
    }

    /// Whether the animation loop is still scheduling frames
    pub fn is_mounted(&self) -> bool {
        self.frames.as_ref().is_some_and(AnimationLoop::is_running)
    }

    /// Stop animating and release every browser resource
    pub fn unmount(&mut self) {
        if let Some(mut frames) = self.frames.take() {
            frames.stop();
            tracing::info!("starfield unmounted");
        }
        self.listeners.clear();
        self.inputs.close();
    }
}

/// Mount the particle field on the canvas with id `canvas_id`
///
/// `theme` is the host theme name; only `"dark"` selects the dark palette.
#[wasm_bindgen]
pub fn mount(canvas_id: &str, theme: &str) -> Result<Starfield, JsValue> {
    let window = web_sys::window().ok_or("no global window")?;
    let document = window.document().ok_or("window has no document")?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| format!("no element with id '{canvas_id}'"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| format!("element '{canvas_id}' is not a canvas"))?;

    let viewport = viewport_of(&window);
    let mut surface = match CanvasSurface::new(canvas) {
        Ok(surface) => Some(surface),
        Err(e) => {
            tracing::warn!("{e}; the field will animate without drawing");
            None
        }
    };
    if let Some(surface) = surface.as_mut() {
        surface.resize(viewport);
    }

    let mut field = ParticleField::new(viewport, Theme::resolve(theme));
    tracing::info!(
        particles = field.particles().len(),
        width = viewport.width,
        height = viewport.height,
        "starfield mounted"
    );

    let inputs = InputQueue::new();
    let target: &EventTarget = &window;

    let resize_inputs = inputs.clone();
    let resize_window = window.clone();
    let on_resize = EventListener::new(target, "resize", move |_| {
        resize_inputs.push(FieldEvent::Resize(viewport_of(&resize_window)));
    })?;

    let move_inputs = inputs.clone();
    let on_move = EventListener::new(target, "mousemove", move |event: Event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            move_inputs.push(FieldEvent::PointerMove(Point::new(
                f64::from(mouse.client_x()),
                f64::from(mouse.client_y()),
            )));
        }
    })?;

    let frame_inputs = inputs.clone();
    let frames = AnimationLoop::start(&window, move || {
        for event in frame_inputs.drain() {
            if let (FieldEvent::Resize(viewport), Some(surface)) = (event, surface.as_mut()) {
                surface.resize(viewport);
            }
            field.apply(event);
        }

        let Some(surface) = surface.as_mut() else {
            return;
        };
        if let Err(e) = field.step(surface) {
            tracing::warn!("frame not fully drawn: {e}");
        }
    })?;

    Ok(Starfield {
        inputs,
        listeners: vec![on_resize, on_move],
        frames: Some(frames),
    })
}

/// Current window inner size in CSS pixels
fn viewport_of(window: &Window) -> Viewport {
    let dimension = |value: Result<JsValue, JsValue>| {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
            .max(0.0) as u32
    };
    Viewport::new(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
    )
}

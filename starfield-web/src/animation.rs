//! Browser resources held for the lifetime of a mounted field
//!
//! Both types release what they acquired on `Drop`: the animation loop
//! cancels its pending frame and stops rescheduling, and listeners
//! deregister themselves.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, Window};

use starfield_sim::FieldEvent;

/// Inputs waiting for the next frame
///
/// Listeners push, the frame callback drains, so field state is only
/// touched from inside a frame.
#[derive(Clone, Default)]
pub struct InputQueue {
    events: Rc<RefCell<VecDeque<FieldEvent>>>,
    closed: Rc<Cell<bool>>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an input; dropped once the queue is closed
    pub fn push(&self, event: FieldEvent) {
        if self.closed.get() {
            return;
        }
        let mut events = self.events.borrow_mut();
        // Only the latest pointer position matters
        let supersedes = matches!(event, FieldEvent::PointerMove(_))
            && matches!(events.back(), Some(FieldEvent::PointerMove(_)));
        if supersedes {
            events.pop_back();
        }
        events.push_back(event);
    }

    /// Take everything queued so far, oldest first
    pub fn drain(&self) -> Vec<FieldEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    /// Discard pending inputs and refuse new ones
    pub fn close(&self) {
        self.closed.set(true);
        self.events.borrow_mut().clear();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

type FrameCallback = Closure<dyn FnMut()>;

/// A `requestAnimationFrame` loop calling `tick` once per display refresh
pub struct AnimationLoop {
    window: Window,
    running: Rc<Cell<bool>>,
    frame_id: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl AnimationLoop {
    /// Schedule the first frame
    pub fn start(window: &Window, mut tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let running = Rc::new(Cell::new(true));
        let frame_id = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let cb_running = Rc::clone(&running);
        let cb_frame_id = Rc::clone(&frame_id);
        let cb_self = Rc::clone(&callback);
        let cb_window = window.clone();

        *callback.borrow_mut() = Some(Closure::new(move || {
            cb_frame_id.set(None);
            if !cb_running.get() {
                return;
            }

            tick();

            if !cb_running.get() {
                return;
            }
            if let Some(cb) = cb_self.borrow().as_ref() {
                match cb_window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => cb_frame_id.set(Some(id)),
                    Err(e) => tracing::error!("failed to schedule animation frame: {e:?}"),
                }
            }
        }));

        let id = match callback.borrow().as_ref() {
            Some(cb) => window.request_animation_frame(cb.as_ref().unchecked_ref())?,
            None => return Err(JsValue::from_str("animation callback missing")),
        };
        frame_id.set(Some(id));

        Ok(Self {
            window: window.clone(),
            running,
            frame_id,
            callback,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Cancel the pending frame and release the callback
    pub fn stop(&mut self) {
        self.running.set(false);
        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                tracing::warn!("failed to cancel animation frame: {e:?}");
            }
        }
        // Breaks the callback -> closure -> callback cycle
        self.callback.borrow_mut().take();
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// An event listener registered for as long as this value lives
pub struct EventListener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        event_type: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;

        Ok(Self {
            target: target.clone(),
            event_type,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let removed = self.target.remove_event_listener_with_callback(
            self.event_type,
            self.callback.as_ref().unchecked_ref(),
        );
        if let Err(e) = removed {
            tracing::warn!(event = self.event_type, "failed to remove listener: {e:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfield_sim::{Point, Theme, Viewport};

    #[test]
    fn queue_preserves_order() {
        let queue = InputQueue::new();
        queue.push(FieldEvent::Resize(Viewport::new(10, 10)));
        queue.push(FieldEvent::ThemeChange(Theme::Dark));

        assert_eq!(
            queue.drain(),
            vec![
                FieldEvent::Resize(Viewport::new(10, 10)),
                FieldEvent::ThemeChange(Theme::Dark),
            ]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn queue_coalesces_consecutive_pointer_moves() {
        let queue = InputQueue::new();
        queue.push(FieldEvent::PointerMove(Point::new(1.0, 1.0)));
        queue.push(FieldEvent::PointerMove(Point::new(2.0, 2.0)));
        queue.push(FieldEvent::Resize(Viewport::new(5, 5)));
        queue.push(FieldEvent::PointerMove(Point::new(3.0, 3.0)));

        assert_eq!(
            queue.drain(),
            vec![
                FieldEvent::PointerMove(Point::new(2.0, 2.0)),
                FieldEvent::Resize(Viewport::new(5, 5)),
                FieldEvent::PointerMove(Point::new(3.0, 3.0)),
            ]
        );
    }

    #[test]
    fn clones_share_the_queue() {
        let queue = InputQueue::new();
        let producer = queue.clone();
        producer.push(FieldEvent::ThemeChange(Theme::Light));
        assert_eq!(queue.drain().len(), 1);
    }

    #[test]
    fn closed_queue_stops_growing() {
        let queue = InputQueue::new();
        let producer = queue.clone();
        producer.push(FieldEvent::ThemeChange(Theme::Dark));

        queue.close();
        assert!(producer.is_closed());
        for _ in 0..100 {
            producer.push(FieldEvent::ThemeChange(Theme::Light));
            producer.push(FieldEvent::Resize(Viewport::new(10, 10)));
        }
        assert!(queue.drain().is_empty());
    }
}

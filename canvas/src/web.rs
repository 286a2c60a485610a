//! Browser entry point.
//!
//! [`WebScene`] is the type JavaScript sees. Mounting binds an [`Engine`] to
//! a canvas, attaches a `keydown` listener to the window and pointer
//! listeners to the canvas, and starts one `setInterval` per
//! [`TimerSpec`] the session asks for. Every callback borrows the engine for
//! one event and redraws when the event reports [`Action::RenderNeeded`].
//! Unmounting (or dropping the scene) clears the intervals, removes the
//! listeners and tears the session down.

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Date;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

use crate::doc::Point;
use crate::engine::{Action, Engine, EngineError, SceneConfig, TimerSpec};
use crate::input::{Button, Key, Modifiers};
use crate::shortcuts::Command;

type SharedEngine = Rc<RefCell<Engine>>;
type EventHandler = fn(&mut Engine, &Event) -> Vec<Action>;

impl From<EngineError> for JsValue {
    fn from(value: EngineError) -> Self {
        JsValue::from_str(&value.to_string())
    }
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

struct Interval {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

/// A scene mounted on a page canvas.
#[wasm_bindgen]
pub struct WebScene {
    window: Window,
    engine: SharedEngine,
    listeners: Vec<Listener>,
    intervals: Vec<Interval>,
}

#[wasm_bindgen]
impl WebScene {
    /// Mount on the canvas whose element id is `canvas_id`. Resolves to
    /// `undefined` when there is no such canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` when there is no window, the canvas has no 2D context,
    /// or a listener or interval cannot be registered.
    pub fn mount(canvas_id: &str) -> Result<Option<WebScene>, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let canvas = match window.document().and_then(|doc| doc.get_element_by_id(canvas_id)) {
            Some(element) => match element.dyn_into::<HtmlCanvasElement>() {
                Ok(canvas) => Some(canvas),
                Err(_) => {
                    warn!("#{canvas_id} is not a canvas");
                    None
                }
            },
            None => None,
        };
        let Some(engine) = Engine::mount(canvas, &SceneConfig::default())? else {
            debug!("no canvas #{canvas_id}; nothing mounted");
            return Ok(None);
        };

        let timers = engine.session.timers().to_vec();
        let canvas = engine.canvas().clone();
        let mut scene = WebScene {
            window: window.clone(),
            engine: Rc::new(RefCell::new(engine)),
            listeners: Vec::new(),
            intervals: Vec::new(),
        };

        scene.listen(EventTarget::from(window), "keydown", key_down)?;
        scene.listen(EventTarget::from(canvas.clone()), "mousedown", pointer_down)?;
        scene.listen(EventTarget::from(canvas.clone()), "mousemove", pointer_move)?;
        scene.listen(EventTarget::from(canvas), "mouseup", pointer_up)?;
        for spec in timers {
            scene.start_interval(spec)?;
        }
        dispatch(&scene.engine, |_| vec![Action::RenderNeeded]);

        info!("scene mounted on #{canvas_id}");
        Ok(Some(scene))
    }

    /// Toolbar: add a rectangle.
    pub fn add_rectangle(&self) {
        self.command(Command::AddRectangle);
    }

    /// Toolbar: add a circle.
    pub fn add_circle(&self) {
        self.command(Command::AddCircle);
    }

    pub fn select_all(&self) {
        self.command(Command::SelectAll);
    }

    /// Toolbar: delete the active selection.
    pub fn delete_selected(&self) {
        self.command(Command::DeleteSelection);
    }

    /// The scene as a JSON string, or `undefined` once unmounted.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the engine is busy or serialization fails.
    pub fn snapshot(&self) -> Result<Option<String>, JsValue> {
        let engine = self.engine.try_borrow().map_err(|_| JsValue::from_str("engine busy"))?;
        match engine.session.surface() {
            Some(surface) => surface
                .snapshot_json()
                .map(Some)
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(None),
        }
    }

    /// Clear intervals, remove listeners and tear the session down. Safe to
    /// call more than once.
    pub fn unmount(&mut self) {
        for interval in self.intervals.drain(..) {
            self.window.clear_interval_with_handle(interval.handle);
        }
        for listener in self.listeners.drain(..) {
            if let Err(e) = listener
                .target
                .remove_event_listener_with_callback(listener.event, listener.callback.as_ref().unchecked_ref())
            {
                warn!("removing {} listener failed: {e:?}", listener.event);
            }
        }
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => engine.unmount(),
            Err(_) => warn!("engine busy during unmount"),
        }
    }
}

impl WebScene {
    fn command(&self, command: Command) {
        dispatch(&self.engine, |engine| engine.run_command(command));
    }

    fn listen(&mut self, target: EventTarget, event: &'static str, handler: EventHandler) -> Result<(), JsValue> {
        let engine = Rc::clone(&self.engine);
        let callback = Closure::wrap(Box::new(move |e: Event| {
            dispatch(&engine, |engine| handler(engine, &e));
        }) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener { target, event, callback });
        Ok(())
    }

    fn start_interval(&mut self, spec: TimerSpec) -> Result<(), JsValue> {
        let engine = Rc::clone(&self.engine);
        let mut last = Date::now();
        let callback = Closure::wrap(Box::new(move || {
            let now = Date::now();
            let elapsed_ms = (now - last).max(0.0);
            last = now;
            dispatch(&engine, |engine| engine.on_timer(spec.kind, elapsed_ms));
        }) as Box<dyn FnMut()>);
        let period_ms = i32::try_from(spec.period.as_millis()).unwrap_or(i32::MAX);
        let handle = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), period_ms)?;
        debug!("interval {handle} started for {:?} every {period_ms}ms", spec.kind);
        self.intervals.push(Interval { handle, _callback: callback });
        Ok(())
    }
}

impl Drop for WebScene {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Run one event against the engine and redraw if it asks for it.
fn dispatch(engine: &SharedEngine, event: impl FnOnce(&mut Engine) -> Vec<Action>) {
    let Ok(mut engine) = engine.try_borrow_mut() else {
        debug!("engine busy; event dropped");
        return;
    };
    let actions = event(&mut engine);
    if wants_render(&actions) {
        if let Err(e) = engine.render() {
            warn!("render failed: {e}");
        }
    }
}

fn key_down(engine: &mut Engine, event: &Event) -> Vec<Action> {
    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
        return Vec::new();
    };
    let mods = modifiers(event.ctrl_key(), event.shift_key(), event.alt_key(), event.meta_key());
    let actions = engine.on_key_down(&Key::new(event.key()), mods);
    if !actions.is_empty() {
        event.prevent_default();
    }
    actions
}

fn pointer_down(engine: &mut Engine, event: &Event) -> Vec<Action> {
    let Some(event) = event.dyn_ref::<MouseEvent>() else {
        return Vec::new();
    };
    let Some(button) = button_from(event.button()) else {
        return Vec::new();
    };
    let mods = modifiers(event.ctrl_key(), event.shift_key(), event.alt_key(), event.meta_key());
    engine.on_pointer_down(pointer_at(event.offset_x(), event.offset_y()), button, mods)
}

fn pointer_move(engine: &mut Engine, event: &Event) -> Vec<Action> {
    match event.dyn_ref::<MouseEvent>() {
        Some(event) => engine.on_pointer_move(pointer_at(event.offset_x(), event.offset_y())),
        None => Vec::new(),
    }
}

fn pointer_up(engine: &mut Engine, event: &Event) -> Vec<Action> {
    match event.dyn_ref::<MouseEvent>() {
        Some(event) => engine.on_pointer_up(pointer_at(event.offset_x(), event.offset_y())),
        None => Vec::new(),
    }
}

#[allow(clippy::fn_params_excessive_bools)]
fn modifiers(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers { shift, ctrl, alt, meta }
}

/// DOM `MouseEvent.button` to [`Button`]. Back/forward buttons map to `None`.
fn button_from(code: i16) -> Option<Button> {
    match code {
        0 => Some(Button::Primary),
        1 => Some(Button::Middle),
        2 => Some(Button::Secondary),
        _ => None,
    }
}

fn pointer_at(x: i32, y: i32) -> Point {
    Point::new(f64::from(x), f64::from(y))
}

fn wants_render(actions: &[Action]) -> bool {
    actions.contains(&Action::RenderNeeded)
}

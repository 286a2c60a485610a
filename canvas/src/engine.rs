use std::time::Duration;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{FRAME_MS, PARTICLE_CAPACITY, PARTICLE_RISE_MS, PARTICLE_SPAWN_MS, SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::decor::{self, Decorations};
use crate::doc::{ObjectId, Point, Selection};
use crate::hit;
use crate::input::{Button, InputState, Key, Modifiers};
use crate::particles::{EvictionPolicy, ParticleAnimator};
use crate::render;
use crate::shortcuts::{self, Command};
use crate::surface::{SceneSurface, Surface};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers and timers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ObjectCreated { id: ObjectId },
    ObjectDeleted { id: ObjectId },
    ObjectsMoved { ids: Vec<ObjectId> },
    SelectionChanged,
    RenderNeeded,
}

/// Scene parameters a host may override.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Surface width in CSS pixels.
    pub width: f64,
    /// Surface height in CSS pixels.
    pub height: f64,
    pub particle_capacity: usize,
    pub spawn_interval: Duration,
    pub frame_interval: Duration,
    /// Time a particle takes to rise off screen, in milliseconds.
    pub particle_rise_ms: f64,
    pub eviction: EvictionPolicy,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,
            particle_capacity: PARTICLE_CAPACITY,
            spawn_interval: Duration::from_millis(PARTICLE_SPAWN_MS),
            frame_interval: Duration::from_millis(FRAME_MS),
            particle_rise_ms: PARTICLE_RISE_MS,
            eviction: EvictionPolicy::Capacity,
        }
    }
}

/// What a session timer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Spawns one particle per fire.
    ParticleSpawn,
    /// Advances running tweens by one frame.
    Frame,
}

/// A periodic timer the host must schedule while the session is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSpec {
    pub kind: TimerKind,
    pub period: Duration,
}

/// A mounted scene: the surface handle plus everything registered against it.
///
/// The session owns the surface exclusively and threads it into the
/// shortcut dispatcher and the particle animator. It schedules nothing
/// itself; the host reads [`Session::timers`] and calls [`Session::on_timer`].
pub struct Session<S: Surface> {
    surface: Option<S>,
    animator: ParticleAnimator,
    decorations: Decorations,
    input: InputState,
    timers: Vec<TimerSpec>,
    key_listener: bool,
    rng: SmallRng,
}

impl<S: Surface> Session<S> {
    /// Decorate `surface`, register the keyboard listener and the timers.
    /// A missing surface initializes nothing.
    pub fn initialize(surface: Option<S>, config: &SceneConfig, rng: SmallRng) -> Option<Self> {
        let mut surface = surface?;
        let decorations = decor::decorate(&mut surface);
        let size = surface.size();
        info!("scene initialized on {}x{} surface", size.width, size.height);

        Some(Self {
            surface: Some(surface),
            animator: ParticleAnimator::new(config.particle_capacity, config.particle_rise_ms, config.eviction),
            decorations,
            input: InputState::Idle,
            timers: vec![
                TimerSpec { kind: TimerKind::ParticleSpawn, period: config.spawn_interval },
                TimerSpec { kind: TimerKind::Frame, period: config.frame_interval },
            ],
            key_listener: true,
            rng,
        })
    }

    /// Cancel timers, detach the listener and dispose the surface. Later
    /// calls do nothing.
    pub fn teardown(&mut self) {
        let Some(mut surface) = self.surface.take() else {
            return;
        };
        self.timers.clear();
        self.key_listener = false;
        self.input = InputState::Idle;
        self.animator.clear();
        surface.dispose();
        info!("scene torn down");
    }

    /// Whether the surface is still bound.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.surface.is_some()
    }

    /// Timers the host should be running.
    #[must_use]
    pub fn timers(&self) -> &[TimerSpec] {
        &self.timers
    }

    /// Number of attached input listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        usize::from(self.key_listener)
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    #[must_use]
    pub fn particles(&self) -> &ParticleAnimator {
        &self.animator
    }

    #[must_use]
    pub fn decorations(&self) -> Decorations {
        self.decorations
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        self.input
    }

    // --- Keyboard / buttons ---

    /// Route a key press through the shortcut dispatcher.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if !self.key_listener {
            return Vec::new();
        }
        shortcuts::dispatch(key, modifiers, self.surface.as_mut(), &mut self.rng)
    }

    /// Run a command from a toolbar button.
    pub fn run_command(&mut self, command: Command) -> Vec<Action> {
        let Some(surface) = self.surface.as_mut() else {
            return Vec::new();
        };
        shortcuts::apply(command, surface, &mut self.rng)
    }

    // --- Timers ---

    /// Handle one fire of a timer from [`Session::timers`]. `elapsed_ms` is
    /// the wall time measured since the same timer last fired; a frame
    /// advances tweens by exactly that much, so late or skipped fires do not
    /// slow animations down.
    pub fn on_timer(&mut self, kind: TimerKind, elapsed_ms: f64) -> Vec<Action> {
        match kind {
            TimerKind::ParticleSpawn => self.tick_particles(),
            TimerKind::Frame => self.advance_frame(elapsed_ms),
        }
    }

    /// Spawn one particle.
    pub fn tick_particles(&mut self) -> Vec<Action> {
        let Some(surface) = self.surface.as_mut() else {
            return Vec::new();
        };
        let spawned = self.animator.tick(&mut *surface, &mut self.rng);
        let mut actions = Vec::with_capacity(2);
        if let Some(id) = spawned.evicted {
            actions.push(Action::ObjectDeleted { id });
        }
        actions.push(Action::ObjectCreated { id: spawned.id });
        actions
    }

    /// Step running tweens by `dt_ms` and retire finished particles when the
    /// eviction policy asks for it.
    pub fn advance_frame(&mut self, dt_ms: f64) -> Vec<Action> {
        let Some(surface) = self.surface.as_mut() else {
            return Vec::new();
        };
        let completed = surface.advance(dt_ms);
        let mut actions: Vec<Action> = self
            .animator
            .on_completed(&mut *surface, &completed)
            .into_iter()
            .map(|id| Action::ObjectDeleted { id })
            .collect();
        if surface.take_render_request() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Pointer ---

    /// Select (or shift-toggle) the topmost selectable object under the
    /// pointer and start dragging the selection. Empty space or a
    /// non-selectable object clears the selection.
    pub fn on_pointer_down(&mut self, pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let Some(surface) = self.surface.as_mut() else {
            return Vec::new();
        };

        let before = surface.active_selection().clone();
        match hit::hit_test(pt, &*surface) {
            Some(hit) if hit.selectable => {
                let id = hit.object_id;
                if modifiers.shift {
                    surface.set_active_selection(before.toggled(id));
                } else if !before.contains(&id) {
                    surface.set_active_selection(Selection::Single(id));
                }
                if surface.active_selection().contains(&id) {
                    self.input = InputState::DraggingSelection { last: pt };
                }
            }
            _ => {
                if !modifiers.shift {
                    surface.discard_active_selection();
                }
            }
        }

        if surface.active_selection() == &before {
            return Vec::new();
        }
        debug!("selection now {} object(s)", surface.active_selection().len());
        surface.request_render();
        vec![Action::SelectionChanged, Action::RenderNeeded]
    }

    /// Move the selection by the pointer delta while dragging.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let InputState::DraggingSelection { last } = self.input else {
            return Vec::new();
        };
        let Some(surface) = self.surface.as_mut() else {
            return Vec::new();
        };

        let (dx, dy) = (pt.x - last.x, pt.y - last.y);
        let members = surface.active_selection().members();
        for id in members {
            if let Some(obj) = surface.object_mut(&id) {
                obj.left += dx;
                obj.top += dy;
            }
        }
        self.input = InputState::DraggingSelection { last: pt };
        surface.request_render();
        vec![Action::RenderNeeded]
    }

    /// Finish a drag. Reports the moved objects if the pointer travelled.
    pub fn on_pointer_up(&mut self, pt: Point) -> Vec<Action> {
        let mut actions = self.on_pointer_move(pt);
        let was_dragging = matches!(self.input, InputState::DraggingSelection { .. });
        self.input = InputState::Idle;
        if !was_dragging {
            return actions;
        }
        if let Some(surface) = self.surface.as_ref() {
            actions.push(Action::ObjectsMoved { ids: surface.active_selection().members() });
        }
        actions
    }
}

/// Errors raised while binding to or drawing on a browser canvas.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("2d rendering context unavailable")]
    ContextUnavailable,
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for EngineError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// The browser engine. Wraps a [`Session`] over a [`SceneSurface`] and owns
/// the canvas element it draws to.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub session: Session<SceneSurface>,
}

impl Engine {
    /// Bind to `canvas` and initialize the scene. A missing element is a
    /// silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the element has no 2D context.
    pub fn mount(canvas: Option<HtmlCanvasElement>, config: &SceneConfig) -> Result<Option<Self>, EngineError> {
        let Some(canvas) = canvas else {
            return Ok(None);
        };
        let ctx = canvas
            .get_context("2d")?
            .ok_or(EngineError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::ContextUnavailable)?;

        let surface = SceneSurface::new(f64::from(canvas.width()), f64::from(canvas.height()));
        let rng = SmallRng::seed_from_u64(random_seed());
        Ok(Session::initialize(Some(surface), config, rng).map(|session| Self { canvas, ctx, session }))
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.session.on_key_down(key, modifiers)
    }

    pub fn run_command(&mut self, command: Command) -> Vec<Action> {
        self.session.run_command(command)
    }

    pub fn on_timer(&mut self, kind: TimerKind, elapsed_ms: f64) -> Vec<Action> {
        self.session.on_timer(kind, elapsed_ms)
    }

    pub fn on_pointer_down(&mut self, pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.session.on_pointer_down(pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        self.session.on_pointer_move(pt)
    }

    pub fn on_pointer_up(&mut self, pt: Point) -> Vec<Action> {
        self.session.on_pointer_up(pt)
    }

    /// Draw the current scene. Does nothing once unmounted.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a 2D-context call fails.
    pub fn render(&self) -> Result<(), EngineError> {
        let Some(surface) = self.session.surface() else {
            return Ok(());
        };
        render::draw(&self.ctx, surface)?;
        Ok(())
    }

    /// Tear the session down. Safe to call more than once.
    pub fn unmount(&mut self) {
        self.session.teardown();
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64 ^ (js_sys::Date::now() as u64)
}

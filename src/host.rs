//! Headless host: schedules session timers on tokio and feeds console events
//! into the session.
//!
//! The session sits behind one async mutex. Timer tasks and the console loop
//! each take the lock for a single event, so scene mutations never interleave.

use std::sync::Arc;

use canvas::engine::{Action, SceneConfig, Session, TimerSpec};
use canvas::surface::SceneSurface;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::HostError;
use crate::config::HostConfig;
use crate::console::ConsoleEvent;

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

pub type SharedSession = Arc<Mutex<Session<SceneSurface>>>;

/// What the console loop does after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Write this line to the output, after the session lock is released.
    Print(String),
    Quit,
}

/// Create the surface and initialize a session on it.
#[must_use]
pub fn open_session(scene: &SceneConfig, seed: Option<u64>) -> Option<SharedSession> {
    let rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let surface = SceneSurface::new(scene.width, scene.height);
    let session = Session::initialize(Some(surface), scene, rng)?;
    info!(
        width = scene.width,
        height = scene.height,
        capacity = scene.particle_capacity,
        spawn_ms = scene.spawn_interval.as_millis(),
        eviction = ?scene.eviction,
        "session initialized"
    );
    Some(Arc::new(Mutex::new(session)))
}

/// Run the host until quit, end of input or Ctrl-C.
///
/// # Errors
///
/// Returns [`HostError`] on stdin/stdout failure or when a snapshot cannot
/// be serialized.
pub async fn run(config: HostConfig) -> Result<(), HostError> {
    let Some(session) = open_session(&config.scene, config.seed) else {
        return Ok(());
    };
    let timers = spawn_timers(&session).await;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let result = tokio::select! {
        result = drive(&session, stdin, &mut stdout) => result,
        signal = tokio::signal::ctrl_c() => {
            info!("interrupted");
            signal.map_err(HostError::from)
        }
    };

    shutdown(&session, timers).await;
    result
}

/// Spawn one interval task per timer the session asks for.
pub async fn spawn_timers(session: &SharedSession) -> Vec<JoinHandle<()>> {
    let specs = session.lock().await.timers().to_vec();
    specs
        .into_iter()
        .map(|spec| spawn_timer(Arc::clone(session), spec))
        .collect()
}

fn spawn_timer(session: SharedSession, spec: TimerSpec) -> JoinHandle<()> {
    debug!(kind = ?spec.kind, period_ms = spec.period.as_millis(), "timer started");
    tokio::spawn(async move {
        let mut last = Instant::now();
        let mut ticker = tokio::time::interval_at(last + spec.period, spec.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let mut guard = session.lock().await;
            if !guard.is_active() {
                debug!(kind = ?spec.kind, "timer stopped");
                break;
            }
            // Measured after the lock is taken so time spent waiting counts.
            let now = Instant::now();
            let elapsed_ms = now.duration_since(last).as_secs_f64() * 1000.0;
            last = now;
            trace_actions(&guard.on_timer(spec.kind, elapsed_ms));
        }
    })
}

/// Read console lines from `input` and apply them until quit or end of input.
///
/// The session lock is held only while an event is applied; output is
/// written after it is released.
///
/// # Errors
///
/// Returns [`HostError`] when reading `input`, writing `out`, or serializing
/// a snapshot fails.
pub async fn drive<R, W>(session: &SharedSession, input: R, out: &mut W) -> Result<(), HostError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let event = match line.parse::<ConsoleEvent>() {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, line = %line, "ignoring console line");
                continue;
            }
        };
        let flow = apply(&mut *session.lock().await, event)?;
        match flow {
            Flow::Continue => {}
            Flow::Print(text) => {
                out.write_all(text.as_bytes()).await?;
                out.write_all(b"\n").await?;
                out.flush().await?;
            }
            Flow::Quit => {
                info!("quit requested");
                return Ok(());
            }
        }
    }
    info!("input closed");
    Ok(())
}

/// Apply one console event to the session.
///
/// # Errors
///
/// Returns [`HostError`] when a `dump` cannot be serialized.
pub fn apply(session: &mut Session<SceneSurface>, event: ConsoleEvent) -> Result<Flow, HostError> {
    let actions = match event {
        ConsoleEvent::Key { key, modifiers } => session.on_key_down(&key, modifiers),
        ConsoleEvent::PointerDown { at, modifiers } => {
            session.on_pointer_down(at, canvas::input::Button::Primary, modifiers)
        }
        ConsoleEvent::PointerMove(at) => session.on_pointer_move(at),
        ConsoleEvent::PointerUp(at) => session.on_pointer_up(at),
        ConsoleEvent::Button(command) => session.run_command(command),
        ConsoleEvent::Dump => return snapshot(session),
        ConsoleEvent::Quit => return Ok(Flow::Quit),
    };
    trace_actions(&actions);
    Ok(Flow::Continue)
}

fn snapshot(session: &Session<SceneSurface>) -> Result<Flow, HostError> {
    let Some(surface) = session.surface() else {
        warn!("dump requested after teardown");
        return Ok(Flow::Continue);
    };
    Ok(Flow::Print(surface.snapshot_json()?))
}

/// Tear the session down and stop its timer tasks.
pub async fn shutdown(session: &SharedSession, timers: Vec<JoinHandle<()>>) {
    session.lock().await.teardown();
    for handle in &timers {
        handle.abort();
    }
    for handle in timers {
        if let Err(e) = handle.await {
            if !e.is_cancelled() {
                warn!(error = %e, "timer task failed");
            }
        }
    }
    info!("host stopped");
}

fn trace_actions(actions: &[Action]) {
    for action in actions {
        match action {
            Action::ObjectCreated { id } => debug!(%id, "object created"),
            Action::ObjectDeleted { id } => debug!(%id, "object deleted"),
            Action::ObjectsMoved { ids } => debug!(count = ids.len(), "objects moved"),
            Action::SelectionChanged => debug!("selection changed"),
            Action::RenderNeeded => {}
        }
    }
}

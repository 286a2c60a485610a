//! Keyboard shortcuts and the four scene commands they trigger.
//!
//! The dispatcher is stateless: it maps a key event to a [`Command`] and
//! applies that command to whatever surface it is handed. Toolbar buttons go
//! through [`apply`] directly.

#[cfg(test)]
#[path = "shortcuts_test.rs"]
mod shortcuts_test;

use log::debug;
use rand::Rng;

use crate::consts::{
    CIRCLE_RADIUS, RECT_SIZE, SHAPE_LIGHTNESS_PCT, SHAPE_SATURATION_PCT, SHAPE_VIEWPORT_HEIGHT, SHAPE_VIEWPORT_WIDTH,
};
use crate::doc::{SceneObject, Selection};
use crate::engine::Action;
use crate::input::{Key, Modifiers};
use crate::surface::Surface;

/// A mutating scene operation reachable from keys and buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectAll,
    AddRectangle,
    AddCircle,
    DeleteSelection,
}

/// Map a key event to its command, if it has one.
///
/// Ctrl+A is the only modified shortcut; the shape keys fire regardless of
/// modifiers.
#[must_use]
pub fn resolve(key: &Key, modifiers: Modifiers) -> Option<Command> {
    if modifiers.ctrl && key.is_char_ignore_case('a') {
        return Some(Command::SelectAll);
    }
    match key.0.as_str() {
        "Delete" => Some(Command::DeleteSelection),
        "c" | "C" => Some(Command::AddCircle),
        "r" | "R" => Some(Command::AddRectangle),
        _ => None,
    }
}

/// Handle a key event against an optional surface. Unknown keys and a
/// missing surface do nothing.
pub fn dispatch<S, R>(key: &Key, modifiers: Modifiers, surface: Option<&mut S>, rng: &mut R) -> Vec<Action>
where
    S: Surface + ?Sized,
    R: Rng + ?Sized,
{
    let Some(surface) = surface else {
        return Vec::new();
    };
    let Some(command) = resolve(key, modifiers) else {
        return Vec::new();
    };
    debug!("shortcut {:?} -> {command:?}", key.0);
    apply(command, surface, rng)
}

/// Run `command` against `surface`.
pub fn apply<S, R>(command: Command, surface: &mut S, rng: &mut R) -> Vec<Action>
where
    S: Surface + ?Sized,
    R: Rng + ?Sized,
{
    match command {
        Command::SelectAll => select_all(surface),
        Command::AddRectangle => {
            let obj = random_rectangle(rng);
            debug!("rectangle added at ({:.0}, {:.0})", obj.left, obj.top);
            vec![Action::ObjectCreated { id: surface.add(obj) }, Action::RenderNeeded]
        }
        Command::AddCircle => {
            let obj = random_circle(rng);
            debug!("circle added at ({:.0}, {:.0})", obj.left, obj.top);
            vec![Action::ObjectCreated { id: surface.add(obj) }, Action::RenderNeeded]
        }
        Command::DeleteSelection => delete_selection(surface),
    }
}

/// Select every object on the surface as one aggregate.
pub fn select_all<S: Surface + ?Sized>(surface: &mut S) -> Vec<Action> {
    let ids = surface.objects();
    surface.set_active_selection(Selection::aggregate(ids));
    surface.request_render();
    vec![Action::SelectionChanged, Action::RenderNeeded]
}

/// Remove the active selection from the surface.
///
/// An aggregate is removed member by member and then discarded; a single
/// object is removed directly. No selection means no change.
pub fn delete_selection<S: Surface + ?Sized>(surface: &mut S) -> Vec<Action> {
    let members = match surface.active_selection() {
        Selection::None => return Vec::new(),
        Selection::Single(id) => vec![*id],
        Selection::Aggregate(ids) => ids.clone(),
    };

    let mut actions = Vec::with_capacity(members.len() + 2);
    for id in members {
        if surface.remove(&id).is_some() {
            actions.push(Action::ObjectDeleted { id });
        }
    }
    surface.discard_active_selection();
    surface.request_render();
    actions.push(Action::SelectionChanged);
    actions.push(Action::RenderNeeded);
    actions
}

/// `hsl(h, 70%, 60%)` with a random hue.
pub fn random_fill<R: Rng + ?Sized>(rng: &mut R) -> String {
    let hue = rng.random::<f64>() * 360.0;
    format!("hsl({hue:.1}, {SHAPE_SATURATION_PCT}%, {SHAPE_LIGHTNESS_PCT}%)")
}

/// A selectable 100×100 rectangle somewhere in the shape viewport.
pub fn random_rectangle<R: Rng + ?Sized>(rng: &mut R) -> SceneObject {
    let left = rng.random::<f64>() * SHAPE_VIEWPORT_WIDTH;
    let top = rng.random::<f64>() * SHAPE_VIEWPORT_HEIGHT;
    SceneObject::rect(left, top, RECT_SIZE, RECT_SIZE)
        .with_fill(random_fill(rng))
        .with_selectable(true)
}

/// A selectable circle of radius 50 somewhere in the shape viewport.
pub fn random_circle<R: Rng + ?Sized>(rng: &mut R) -> SceneObject {
    let left = rng.random::<f64>() * SHAPE_VIEWPORT_WIDTH;
    let top = rng.random::<f64>() * SHAPE_VIEWPORT_HEIGHT;
    SceneObject::circle(left, top, CIRCLE_RADIUS)
        .with_fill(random_fill(rng))
        .with_selectable(true)
}

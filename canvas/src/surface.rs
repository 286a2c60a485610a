//! The drawing surface: object list, selection, tweens and redraw state.
//!
//! `Surface` is the capability set the shortcut dispatcher, the particle
//! animator and the session program against. `SceneSurface` is the in-memory
//! implementation the browser engine renders and the tests inspect.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use log::debug;
use serde::Serialize;

use crate::doc::{Animatable, DocStore, ObjectId, Property, SceneObject, Selection};
use crate::tween::{AnimateOptions, Tween};

/// Width and height of a surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A tween that reached its end value during `Surface::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completed {
    pub target: ObjectId,
    pub property: Property,
}

/// Operations a scene surface must provide.
pub trait Surface {
    /// Append an object on top of the scene. Returns its id.
    fn add(&mut self, obj: SceneObject) -> ObjectId;

    /// Remove an object and any tweens targeting it. The object is also
    /// dropped from the active selection.
    fn remove(&mut self, id: &ObjectId) -> Option<SceneObject>;

    /// Ids of all objects in draw order (bottom first).
    fn objects(&self) -> Vec<ObjectId>;

    fn object(&self, id: &ObjectId) -> Option<&SceneObject>;

    fn object_mut(&mut self, id: &ObjectId) -> Option<&mut SceneObject>;

    fn active_selection(&self) -> &Selection;

    /// Replace the active selection. Ids not on the surface are dropped.
    fn set_active_selection(&mut self, selection: Selection);

    /// Clear the active selection; members stay on the surface.
    fn discard_active_selection(&mut self);

    fn size(&self) -> Size;

    /// Mark the surface as needing a redraw.
    fn request_render(&mut self);

    /// Consume a pending redraw request.
    fn take_render_request(&mut self) -> bool;

    /// Tween `property` of `id` from its current value to `to`. Replaces any
    /// running tween on the same property of the same object.
    fn animate(&mut self, id: &ObjectId, property: Property, to: f64, options: AnimateOptions);

    /// Step all tweens by `dt_ms`, writing values into their objects.
    /// Requests a redraw when anything moved and returns finished tweens.
    fn advance(&mut self, dt_ms: f64) -> Vec<Completed>;

    /// Number of running tweens.
    fn active_tweens(&self) -> usize;

    /// Release every object and tween. Later mutations are ignored.
    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;
}

/// In-memory scene surface.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSurface {
    size: Size,
    doc: DocStore,
    selection: Selection,
    #[serde(skip)]
    tweens: Vec<Tween>,
    #[serde(skip)]
    render_needed: bool,
    #[serde(skip)]
    disposed: bool,
}

impl SceneSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size { width, height },
            doc: DocStore::new(),
            selection: Selection::None,
            tweens: Vec::new(),
            render_needed: false,
            disposed: false,
        }
    }

    /// Read-only view of the document, for the renderer.
    #[must_use]
    pub fn doc(&self) -> &DocStore {
        &self.doc
    }

    /// Serialize size, objects and selection as single-line JSON.
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization fails.
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Surface for SceneSurface {
    fn add(&mut self, obj: SceneObject) -> ObjectId {
        let id = obj.id;
        if self.disposed {
            return id;
        }
        self.doc.insert(obj);
        self.render_needed = true;
        id
    }

    fn remove(&mut self, id: &ObjectId) -> Option<SceneObject> {
        let removed = self.doc.remove(id)?;
        self.tweens.retain(|t| &t.target != id);
        self.selection = self.selection.without(id);
        self.render_needed = true;
        Some(removed)
    }

    fn objects(&self) -> Vec<ObjectId> {
        self.doc.ids()
    }

    fn object(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.doc.get(id)
    }

    fn object_mut(&mut self, id: &ObjectId) -> Option<&mut SceneObject> {
        self.doc.get_mut(id)
    }

    fn active_selection(&self) -> &Selection {
        &self.selection
    }

    fn set_active_selection(&mut self, selection: Selection) {
        if self.disposed {
            return;
        }
        self.selection = match selection {
            Selection::Single(id) if self.doc.get(&id).is_none() => Selection::None,
            Selection::Aggregate(ids) => {
                Selection::aggregate(ids.into_iter().filter(|id| self.doc.get(id).is_some()).collect())
            }
            other => other,
        };
        self.render_needed = true;
    }

    fn discard_active_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection = Selection::None;
            self.render_needed = true;
        }
    }

    fn size(&self) -> Size {
        self.size
    }

    fn request_render(&mut self) {
        if !self.disposed {
            self.render_needed = true;
        }
    }

    fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_needed)
    }

    fn animate(&mut self, id: &ObjectId, property: Property, to: f64, options: AnimateOptions) {
        let Some(obj) = self.doc.get(id) else {
            return;
        };
        let from = obj.property(property);
        self.tweens.retain(|t| !(&t.target == id && t.property == property));
        self.tweens.push(Tween::new(*id, property, from, to, options));
    }

    fn advance(&mut self, dt_ms: f64) -> Vec<Completed> {
        if self.tweens.is_empty() {
            return Vec::new();
        }

        let mut completed = Vec::new();
        for tween in &mut self.tweens {
            let step = tween.advance(dt_ms);
            if let Some(obj) = self.doc.get_mut(&tween.target) {
                obj.set_property(tween.property, step.value);
            }
            if step.done {
                completed.push(Completed { target: tween.target, property: tween.property });
            }
        }
        self.tweens
            .retain(|t| !completed.iter().any(|c| c.target == t.target && c.property == t.property));
        self.render_needed = true;
        completed
    }

    fn active_tweens(&self) -> usize {
        self.tweens.len()
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        debug!("disposing surface with {} objects", self.doc.len());
        self.doc.clear();
        self.tweens.clear();
        self.selection = Selection::None;
        self.render_needed = false;
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

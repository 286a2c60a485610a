//! Document model: scene objects, their shapes, and the in-memory store.
//!
//! This module defines the data types that describe what is on the surface
//! (`SceneObject`, `Shape`, `Style`), the active selection (`Selection`), the
//! animatable property set (`Property`, `Animatable`), and the runtime store
//! that owns all live objects in draw order (`DocStore`).
//!
//! Objects enter this layer from the shortcut dispatcher, the particle
//! animator and the initial decorations. The renderer reads from `DocStore`
//! in insertion order, so the first object added is drawn at the bottom.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, TEXT_CHAR_WIDTH, TEXT_LINE_HEIGHT};

/// Unique identifier for a scene object.
pub type ObjectId = Uuid;

/// A point in surface coordinates (CSS pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Whether `pt` lies inside or on the edge of the box.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.left && pt.x <= self.left + self.width && pt.y >= self.top && pt.y <= self.top + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Smallest box covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Bounds) -> Bounds {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = (self.left + self.width).max(other.left + other.width);
        let bottom = (self.top + self.height).max(other.top + other.height);
        Bounds { left, top, width: right - left, height: bottom - top }
    }
}

/// Fill and stroke paint for an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// CSS fill colour. `None` leaves the interior unpainted.
    pub fill: Option<String>,
    /// CSS stroke colour. `None` draws no outline.
    pub stroke: Option<String>,
    /// Stroke width in pixels; ignored without a stroke colour.
    pub stroke_width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self { fill: Some("rgb(0,0,0)".to_owned()), stroke: None, stroke_width: 1.0 }
    }
}

/// Variant-specific geometry of a scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Axis-aligned rectangle.
    Rect { width: f64, height: f64 },
    /// Circle or circular arc. Angles are in degrees, clockwise from +x.
    Circle { radius: f64, start_angle: f64, end_angle: f64 },
    /// Single-line text label.
    Text { text: String, font_size: f64, font_family: String },
    /// Children laid out relative to the group centre.
    Group { children: Vec<SceneObject> },
}

impl Shape {
    /// Unstroked width and height of the shape.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn size(&self) -> (f64, f64) {
        match self {
            Self::Rect { width, height } => (*width, *height),
            Self::Circle { radius, .. } => (radius * 2.0, radius * 2.0),
            Self::Text { text, font_size, .. } => {
                let chars = text.chars().count() as f64;
                (chars * font_size * TEXT_CHAR_WIDTH, font_size * TEXT_LINE_HEIGHT)
            }
            Self::Group { children } => group_extent(children).map_or((0.0, 0.0), |b| (b.width, b.height)),
        }
    }
}

/// Union of the children's bounds, in group-centre coordinates.
fn group_extent(children: &[SceneObject]) -> Option<Bounds> {
    children
        .iter()
        .map(SceneObject::bounds)
        .reduce(|acc, b| acc.union(&b))
}

/// A numeric object property that can be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Left,
    Top,
    Angle,
    Opacity,
}

/// Anything whose numeric properties can be driven by a tween.
pub trait Animatable {
    fn property(&self, property: Property) -> f64;
    fn set_property(&mut self, property: Property, value: f64);
}

/// An object placed on the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Unique identifier for this object.
    pub id: ObjectId,
    /// Left edge of the bounding box.
    pub left: f64,
    /// Top edge of the bounding box.
    pub top: f64,
    /// Clockwise rotation in degrees around the bounding-box centre.
    pub angle: f64,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
    pub style: Style,
    /// Whether pointer input and select-all may pick this object.
    pub selectable: bool,
    pub shape: Shape,
}

impl SceneObject {
    fn new(left: f64, top: f64, shape: Shape) -> Self {
        Self {
            id: Uuid::new_v4(),
            left,
            top,
            angle: 0.0,
            opacity: 1.0,
            style: Style::default(),
            selectable: true,
            shape,
        }
    }

    #[must_use]
    pub fn rect(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(left, top, Shape::Rect { width, height })
    }

    #[must_use]
    pub fn circle(left: f64, top: f64, radius: f64) -> Self {
        Self::new(left, top, Shape::Circle { radius, start_angle: 0.0, end_angle: 360.0 })
    }

    #[must_use]
    pub fn arc(left: f64, top: f64, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self::new(left, top, Shape::Circle { radius, start_angle, end_angle })
    }

    /// A text label using the default font.
    #[must_use]
    pub fn text(left: f64, top: f64, text: impl Into<String>) -> Self {
        Self::new(
            left,
            top,
            Shape::Text {
                text: text.into(),
                font_size: DEFAULT_FONT_SIZE,
                font_family: DEFAULT_FONT_FAMILY.to_owned(),
            },
        )
    }

    /// A group whose children are positioned relative to the group centre.
    /// The group itself starts at the origin.
    #[must_use]
    pub fn group(children: Vec<SceneObject>) -> Self {
        Self::new(0.0, 0.0, Shape::Group { children })
    }

    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.style.fill = Some(fill.into());
        self
    }

    #[must_use]
    pub fn without_fill(mut self) -> Self {
        self.style.fill = None;
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: impl Into<String>, width: f64) -> Self {
        self.style.stroke = Some(stroke.into());
        self.style.stroke_width = width;
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Override font size and family. No effect on non-text shapes.
    #[must_use]
    pub fn with_font(mut self, size: f64, family: impl Into<String>) -> Self {
        if let Shape::Text { font_size, font_family, .. } = &mut self.shape {
            *font_size = size;
            *font_family = family.into();
        }
        self
    }

    /// Width and height including the stroke.
    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        let (w, h) = self.shape.size();
        let stroke = if self.style.stroke.is_some() { self.style.stroke_width } else { 0.0 };
        (w + stroke, h + stroke)
    }

    /// Axis-aligned bounds, ignoring rotation.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let (width, height) = self.size();
        Bounds { left: self.left, top: self.top, width, height }
    }

    /// Move the object so its bounding-box centre sits at `center`.
    pub fn center_at(&mut self, center: Point) {
        let (w, h) = self.size();
        self.left = center.x - w / 2.0;
        self.top = center.y - h / 2.0;
    }
}

impl Animatable for SceneObject {
    fn property(&self, property: Property) -> f64 {
        match property {
            Property::Left => self.left,
            Property::Top => self.top,
            Property::Angle => self.angle,
            Property::Opacity => self.opacity,
        }
    }

    fn set_property(&mut self, property: Property, value: f64) {
        match property {
            Property::Left => self.left = value,
            Property::Top => self.top = value,
            Property::Angle => self.angle = value,
            Property::Opacity => self.opacity = value.clamp(0.0, 1.0),
        }
    }
}

/// The current selection on a surface. At most one exists at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "ids", rename_all = "lowercase")]
pub enum Selection {
    #[default]
    None,
    Single(ObjectId),
    /// Several objects manipulated as one unit.
    Aggregate(Vec<ObjectId>),
}

impl Selection {
    /// Build an aggregate over `ids`; an empty list yields `None`.
    #[must_use]
    pub fn aggregate(ids: Vec<ObjectId>) -> Self {
        if ids.is_empty() { Self::None } else { Self::Aggregate(ids) }
    }

    /// Number of selected objects.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Single(_) => 1,
            Self::Aggregate(ids) => ids.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, id: &ObjectId) -> bool {
        match self {
            Self::None => false,
            Self::Single(sel) => sel == id,
            Self::Aggregate(ids) => ids.contains(id),
        }
    }

    /// The selected ids in selection order.
    #[must_use]
    pub fn members(&self) -> Vec<ObjectId> {
        match self {
            Self::None => Vec::new(),
            Self::Single(id) => vec![*id],
            Self::Aggregate(ids) => ids.clone(),
        }
    }

    /// This selection with `id` dropped. An aggregate keeps its remaining
    /// members; one left empty becomes `None`.
    #[must_use]
    pub fn without(&self, id: &ObjectId) -> Self {
        match self {
            Self::Single(sel) if sel == id => Self::None,
            Self::Aggregate(ids) => Self::aggregate(ids.iter().copied().filter(|m| m != id).collect()),
            other => other.clone(),
        }
    }

    /// Add `id` if absent, remove it if present (shift-click).
    #[must_use]
    pub fn toggled(&self, id: ObjectId) -> Self {
        if self.contains(&id) {
            return self.without(&id);
        }
        match self {
            Self::None => Self::Single(id),
            Self::Single(sel) => Self::Aggregate(vec![*sel, id]),
            Self::Aggregate(ids) => {
                let mut ids = ids.clone();
                ids.push(id);
                Self::Aggregate(ids)
            }
        }
    }
}

/// In-memory store of scene objects, kept in insertion (draw) order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocStore {
    objects: Vec<SceneObject>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Append an object. If an object with the same `id` already exists it is
    /// replaced in place and keeps its draw position.
    pub fn insert(&mut self, obj: SceneObject) {
        match self.objects.iter_mut().find(|o| o.id == obj.id) {
            Some(slot) => *slot = obj,
            None => self.objects.push(obj),
        }
    }

    /// Remove an object by id, returning it if it was present.
    pub fn remove(&mut self, id: &ObjectId) -> Option<SceneObject> {
        let idx = self.objects.iter().position(|o| &o.id == id)?;
        Some(self.objects.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| &o.id == id)
    }

    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| &o.id == id)
    }

    /// Ids of all objects in draw order (bottom first).
    #[must_use]
    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|o| o.id).collect()
    }

    /// All objects in draw order (bottom first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Drop every object.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Number of objects currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the store contains no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

//! The fixed decorative objects placed on a fresh surface.

#[cfg(test)]
#[path = "decor_test.rs"]
mod decor_test;

use crate::consts::{RAINBOW_COLORS, RAINBOW_OUTER_RADIUS, RAINBOW_RADIUS_STEP, RAINBOW_STROKE_WIDTH, SPINNER_SPIN_MS};
use crate::doc::{ObjectId, Point, Property, SceneObject};
use crate::surface::Surface;
use crate::tween::{AnimateOptions, Easing};

pub const MESSAGE_TEXT: &str = "we are all going to make it \u{1f9e1}";
pub const SPINNER_TEXT: &str = "yupee";

/// Ids of the objects created by [`decorate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decorations {
    pub rainbow: ObjectId,
    pub message: ObjectId,
    pub spinner: ObjectId,
}

/// Half-circle arcs, outermost first, centred on the group origin.
#[must_use]
pub fn rainbow_arcs() -> Vec<SceneObject> {
    RAINBOW_COLORS
        .iter()
        .zip(0_u32..)
        .map(|(color, i)| {
            let radius = RAINBOW_OUTER_RADIUS - f64::from(i) * RAINBOW_RADIUS_STEP;
            let extent = radius + RAINBOW_STROKE_WIDTH / 2.0;
            SceneObject::arc(-extent, -extent, radius, 180.0, 360.0)
                .without_fill()
                .with_stroke(*color, RAINBOW_STROKE_WIDTH)
                .with_selectable(false)
        })
        .collect()
}

/// Add the rainbow, the corner message and the spinning label to `surface`.
/// The label starts a single 0 → 360° spin.
pub fn decorate<S: Surface + ?Sized>(surface: &mut S) -> Decorations {
    let size = surface.size();
    let center = Point::new(size.width / 2.0, size.height / 2.0);

    let mut rainbow = SceneObject::group(rainbow_arcs()).without_fill().with_selectable(false);
    rainbow.center_at(center);
    let rainbow = surface.add(rainbow);

    let message = SceneObject::text(size.width - 250.0, size.height - 50.0, MESSAGE_TEXT)
        .with_fill("#ffffff")
        .with_font(18.0, "monospace")
        .with_opacity(0.7)
        .with_selectable(false);
    let message = surface.add(message);

    let mut spinner = SceneObject::text(0.0, 0.0, SPINNER_TEXT).with_fill("white");
    spinner.center_at(center);
    let spinner = surface.add(spinner);
    surface.animate(
        &spinner,
        Property::Angle,
        360.0,
        AnimateOptions { duration_ms: SPINNER_SPIN_MS, easing: Easing::EaseInOutCubic },
    );

    Decorations { rainbow, message, spinner }
}

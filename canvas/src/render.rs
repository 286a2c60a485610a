//! Rendering: draws the full scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only view of the surface and produces pixels; it does
//! not mutate any scene state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::SELECTION_DASH_PX;
use crate::doc::{Bounds, SceneObject, Selection, Shape};
use crate::surface::{SceneSurface, Surface};

/// Page background behind the scene.
const BACKGROUND: &str = "#000000";

/// Outline colour for selected objects.
const SELECTION_STROKE: &str = "#1E90FF";

/// Draw the full scene: background, objects bottom first, then selection UI.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, surface: &SceneSurface) -> Result<(), JsValue> {
    let size = surface.size();

    // Layer 1: background.
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.set_global_alpha(1.0);
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, size.width, size.height);

    // Layer 2: objects in insertion order.
    for obj in surface.doc().iter() {
        draw_object(ctx, obj)?;
    }

    // Layer 3: selection outlines.
    draw_selection(ctx, surface)
}

// =============================================================
// Object dispatch
// =============================================================

/// Draw `obj` in the current coordinate space. Group children are drawn
/// recursively in a space whose origin is the group centre.
fn draw_object(ctx: &CanvasRenderingContext2d, obj: &SceneObject) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_global_alpha(ctx.global_alpha() * obj.opacity);
    translate_and_rotate(ctx, obj)?;

    match &obj.shape {
        Shape::Rect { width, height } => draw_rect(ctx, obj, *width, *height),
        Shape::Circle { radius, start_angle, end_angle } => {
            draw_arc(ctx, obj, *radius, *start_angle, *end_angle)?;
        }
        Shape::Text { text, font_size, font_family } => draw_text(ctx, obj, text, *font_size, font_family)?,
        Shape::Group { children } => {
            for child in children {
                draw_object(ctx, child)?;
            }
        }
    }

    ctx.restore();
    Ok(())
}

// =============================================================
// Shape renderers
// =============================================================

fn draw_rect(ctx: &CanvasRenderingContext2d, obj: &SceneObject, width: f64, height: f64) {
    if let Some(fill) = &obj.style.fill {
        ctx.set_fill_style_str(fill);
        ctx.fill_rect(-width / 2.0, -height / 2.0, width, height);
    }
    if apply_stroke_style(ctx, obj) {
        ctx.stroke_rect(-width / 2.0, -height / 2.0, width, height);
    }
}

fn draw_arc(
    ctx: &CanvasRenderingContext2d,
    obj: &SceneObject,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> Result<(), JsValue> {
    if radius <= 0.0 {
        return Ok(());
    }
    ctx.begin_path();
    ctx.arc(0.0, 0.0, radius, start_angle.to_radians(), end_angle.to_radians())?;

    if let Some(fill) = &obj.style.fill {
        ctx.set_fill_style_str(fill);
        ctx.fill();
    }
    if apply_stroke_style(ctx, obj) {
        ctx.stroke();
    }
    Ok(())
}

fn draw_text(
    ctx: &CanvasRenderingContext2d,
    obj: &SceneObject,
    text: &str,
    font_size: f64,
    font_family: &str,
) -> Result<(), JsValue> {
    if text.is_empty() {
        return Ok(());
    }
    ctx.set_font(&format!("{font_size}px {font_family}"));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    if let Some(fill) = &obj.style.fill {
        ctx.set_fill_style_str(fill);
        ctx.fill_text(text, 0.0, 0.0)?;
    }
    if apply_stroke_style(ctx, obj) {
        ctx.stroke_text(text, 0.0, 0.0)?;
    }
    Ok(())
}

// =============================================================
// Selection
// =============================================================

fn draw_selection(ctx: &CanvasRenderingContext2d, surface: &SceneSurface) -> Result<(), JsValue> {
    let selection = surface.active_selection();
    let members: Vec<&SceneObject> = selection
        .members()
        .iter()
        .filter_map(|id| surface.object(id))
        .collect();
    if members.is_empty() {
        return Ok(());
    }

    ctx.save();
    ctx.set_global_alpha(1.0);
    ctx.set_stroke_style_str(SELECTION_STROKE);
    ctx.set_line_width(1.0);
    let dash_array = js_sys::Array::new();
    dash_array.push(&SELECTION_DASH_PX.into());
    dash_array.push(&SELECTION_DASH_PX.into());
    ctx.set_line_dash(&dash_array)?;

    for obj in &members {
        ctx.save();
        translate_and_rotate(ctx, obj)?;
        let (w, h) = obj.size();
        ctx.stroke_rect(-w / 2.0, -h / 2.0, w, h);
        ctx.restore();
    }

    // An aggregate also gets one box around all of its members.
    if matches!(selection, Selection::Aggregate(_)) {
        let outline = members
            .iter()
            .map(|obj| obj.bounds())
            .reduce(|acc, b| acc.union(&b));
        if let Some(Bounds { left, top, width, height }) = outline {
            ctx.set_line_dash(&js_sys::Array::new())?;
            ctx.stroke_rect(left, top, width, height);
        }
    }

    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Move the origin to the object's centre and apply its rotation.
fn translate_and_rotate(ctx: &CanvasRenderingContext2d, obj: &SceneObject) -> Result<(), JsValue> {
    let (w, h) = obj.size();
    ctx.translate(obj.left + w / 2.0, obj.top + h / 2.0)?;
    ctx.rotate(obj.angle.to_radians())?;
    Ok(())
}

/// Set stroke colour and width. Returns `false` when the object has no stroke.
fn apply_stroke_style(ctx: &CanvasRenderingContext2d, obj: &SceneObject) -> bool {
    let Some(stroke) = &obj.style.stroke else {
        return false;
    };
    ctx.set_stroke_style_str(stroke);
    ctx.set_line_width(obj.style.stroke_width);
    true
}

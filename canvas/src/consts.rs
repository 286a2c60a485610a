//! Shared numeric constants for the canvas crate.

// ── Surface ─────────────────────────────────────────────────────

/// Default drawing-surface width in CSS pixels.
pub const SURFACE_WIDTH: f64 = 1920.0;

/// Default drawing-surface height in CSS pixels.
pub const SURFACE_HEIGHT: f64 = 1080.0;

/// Width of the region new shapes are scattered across.
pub const SHAPE_VIEWPORT_WIDTH: f64 = 800.0;

/// Height of the region new shapes are scattered across.
pub const SHAPE_VIEWPORT_HEIGHT: f64 = 600.0;

// ── Shapes ──────────────────────────────────────────────────────

/// Side length of a rectangle added by shortcut.
pub const RECT_SIZE: f64 = 100.0;

/// Radius of a circle added by shortcut.
pub const CIRCLE_RADIUS: f64 = 50.0;

/// Saturation and lightness of randomly hued shape fills.
pub const SHAPE_SATURATION_PCT: u32 = 70;
pub const SHAPE_LIGHTNESS_PCT: u32 = 60;

// ── Particles ───────────────────────────────────────────────────

/// Maximum number of live particles.
pub const PARTICLE_CAPACITY: usize = 12;

/// Milliseconds between particle spawns.
pub const PARTICLE_SPAWN_MS: u64 = 300;

/// How long a particle takes to rise off screen.
pub const PARTICLE_RISE_MS: f64 = 6000.0;

/// Final `top` of a particle; just above the visible area.
pub const PARTICLE_END_TOP: f64 = -50.0;

/// Horizontal offset added to the random particle start position.
pub const PARTICLE_X_OFFSET: f64 = 200.0;

pub const PARTICLE_FONT_SIZE: f64 = 20.0;

pub const PARTICLE_GLYPH: &str = "\u{1f9e1}";

// ── Frames ──────────────────────────────────────────────────────

/// Milliseconds between animation frames (~60 fps).
pub const FRAME_MS: u64 = 16;

// ── Decorations ─────────────────────────────────────────────────

/// Radius of the outermost rainbow arc.
pub const RAINBOW_OUTER_RADIUS: f64 = 200.0;

/// Radius decrement between consecutive rainbow arcs.
pub const RAINBOW_RADIUS_STEP: f64 = 20.0;

pub const RAINBOW_STROKE_WIDTH: f64 = 20.0;

pub const RAINBOW_COLORS: [&str; 7] = ["red", "orange", "yellow", "green", "blue", "indigo", "violet"];

/// Duration of the one-shot spin of the centre label.
pub const SPINNER_SPIN_MS: f64 = 2000.0;

// ── Text ────────────────────────────────────────────────────────

pub const DEFAULT_FONT_SIZE: f64 = 40.0;

pub const DEFAULT_FONT_FAMILY: &str = "Times New Roman";

/// Line height as a multiple of font size.
pub const TEXT_LINE_HEIGHT: f64 = 1.16;

/// Average glyph advance as a multiple of font size, used for bounds.
pub const TEXT_CHAR_WIDTH: f64 = 0.6;

// ── Selection ───────────────────────────────────────────────────

/// Selection outline dash segment length in pixels.
pub const SELECTION_DASH_PX: f64 = 4.0;

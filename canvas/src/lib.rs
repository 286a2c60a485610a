//! Scene engine for the heartfall demo.
//!
//! This crate owns the whole scene: an ordered list of shapes, the active
//! selection, property tweens, the keyboard shortcut dispatcher and the
//! floating-particle animator. It compiles natively (for tests and the
//! headless host) and to WebAssembly, where [`engine::Engine`] binds a
//! session to an `HtmlCanvasElement` and draws it, and [`web::WebScene`]
//! exports the mounted scene to JavaScript.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::Session`] lifecycle, timers, pointer input, and the browser [`engine::Engine`] |
//! | [`surface`] | The [`surface::Surface`] trait and the in-memory [`surface::SceneSurface`] |
//! | [`doc`] | Scene objects, shapes, selection and the ordered document store |
//! | [`tween`] | Easing curves and per-frame tween sampling |
//! | [`shortcuts`] | Key-to-command mapping and the four scene commands |
//! | [`particles`] | Bounded buffer of rising particles |
//! | [`decor`] | The fixed rainbow, message and spinner |
//! | [`input`] | Key, modifier and pointer gesture types |
//! | [`hit`] | Hit-testing against scene objects |
//! | [`render`] | Scene rendering to a 2D context |
//! | [`web`] | Exported browser entry point: DOM listeners and interval timers |
//! | [`consts`] | Shared numeric constants (sizes, periods, capacities) |

pub mod consts;
pub mod decor;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod particles;
pub mod render;
pub mod shortcuts;
pub mod surface;
pub mod tween;
pub mod web;

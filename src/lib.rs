//! # Retouch Landing
//!
//! A static landing page generator for a photo retouching service. The page
//! centres on an interactive before/after comparison: two aligned photos
//! stacked on top of each other, with a draggable divider revealing the
//! retouched version to its right.
//!
//! # Architecture: Model, State Machine, Projection
//!
//! The comparison widget is split into three pieces that know nothing about
//! a browser:
//!
//! ```text
//! InputEvent ──▶ InteractionStateMachine ──▶ Effect ──▶ ComparisonSlider
//!                                                         │
//!                 PositionController ◀── Track / Jump ────┘
//!                         │  (one frame per burst of moves)
//!                         ▼
//!                 SliderView::project(position, phase) ──▶ Markup
//! ```
//!
//! The host (a browser shim, a test double) implements [`slider::SliderHost`]:
//! it measures the container, schedules frames and installs global listeners.
//! Everything else is plain data, so the whole interaction contract is unit
//! tested without a DOM.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`slider`] | Comparison widget: position model, interaction state machine, view projection |
//! | [`components`] | `LazyMount` (deferred sections) and `OptimizedImage` (placeholder + fallback) |
//! | [`content`] | FAQ entries and "how it works" steps, Markdown rendering |
//! | [`config`] | `landing.toml` loading, validation, merging over stock defaults, color CSS |
//! | [`assets`] | Asset fingerprinting, dimension probing and the asset manifest |
//! | [`generate`] | Renders `index.html` with Maud and writes the build output |
//! | [`output`] | CLI output formatting for `build` and `check` |
//!
//! # Design Decisions
//!
//! ## Frame-Coalesced Position Updates
//!
//! Pointer moves arrive far faster than the screen refreshes. A move only
//! records the latest pointer x and (re)schedules one frame; the container is
//! measured and the position recomputed when that frame runs. Any number of
//! moves between two frames costs one layout read. Clicks bypass this and
//! apply immediately.
//!
//! ## Armed Presses
//!
//! A press installs capture (global listeners, cursor, selection lock) right
//! away but only becomes a drag once the pointer moves off the press point.
//! A release without such a move is a click: the divider jumps to the click.
//! This keeps "press then release in place" from flashing the dragging
//! affordance.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system, rather than Handlebars or Tera. Advantages:
//!
//! - **Compile-time checking**: malformed HTML is a build error, not a runtime surprise.
//! - **Type-safe**: template variables are Rust expressions, not stringly-typed lookups.
//! - **XSS-safe by default**: all interpolation is auto-escaped.
//! - **Zero runtime files**: no template directory to ship or get out of sync.
//!
//! ## Fingerprinted Assets
//!
//! Every published asset carries a content hash in its name, so a CDN can
//! cache it forever. Config references the logical name (`assets/before.jpg`);
//! the [`assets::AssetManifest`] resolves it, and an unresolvable reference
//! fails the build instead of shipping a broken image.

pub mod assets;
pub mod components;
pub mod config;
pub mod content;
pub mod generate;
pub mod output;
pub mod slider;

#[cfg(test)]
pub(crate) mod test_helpers;

//! Pure projection of `(position, phase)` into the widget's markup.
//!
//! [`SliderView`] holds every value derived from the slider state: label
//! tones, affordance intensities, the readout. It is recomputed from scratch
//! on each render and never stored, so styling cannot drift from the state it
//! describes.
//!
//! ## Layering
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ before image (full width, base layer)      │
//! │              ┌─────────────────────────────┤
//! │              │ after image, clipped with   │
//! │              │ inset(0 0 0 P%)             │
//! │   [Before]   ┃◉ handle at P%       [After] │
//! │              ┃               readout: P%   │
//! └──────────────┸─────────────────────────────┘
//! ```
//!
//! Both images are always in the document; only the overlay's clip changes.

use super::interaction::Phase;
use super::position::INITIAL_POSITION;
use maud::{Markup, html};

/// Below this position the before label sits on the light part of the
/// after image and switches to its contrasting style.
pub const BEFORE_LABEL_INVERT_BELOW: f64 = 25.0;
/// Above this position the after label switches to its contrasting style.
pub const AFTER_LABEL_INVERT_ABOVE: f64 = 75.0;

/// Caller-supplied inputs of the comparison widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonProps {
    pub before_image: String,
    pub after_image: String,
    pub before_alt: Option<String>,
    pub after_alt: Option<String>,
    /// Extra classes on the container. The widget has no intrinsic size, so
    /// this is how callers size it.
    pub class_name: Option<String>,
}

impl ComparisonProps {
    pub fn new(before_image: impl Into<String>, after_image: impl Into<String>) -> Self {
        Self {
            before_image: before_image.into(),
            after_image: after_image.into(),
            before_alt: None,
            after_alt: None,
            class_name: None,
        }
    }

    pub fn before_label(&self) -> &str {
        self.before_alt.as_deref().unwrap_or("Before")
    }

    pub fn after_label(&self) -> &str {
        self.after_alt.as_deref().unwrap_or("After")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelTone {
    Normal,
    Inverted,
}

impl LabelTone {
    fn is_inverted(self) -> bool {
        self == LabelTone::Inverted
    }
}

/// Phase-dependent visual feedback. Never affects geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affordance {
    pub brightness: f64,
    pub handle_scale: f64,
    pub shadow_alpha: f64,
    pub cursor: &'static str,
}

impl Affordance {
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Idle => Self {
                brightness: 1.0,
                handle_scale: 1.0,
                shadow_alpha: 0.3,
                cursor: "ew-resize",
            },
            Phase::Hovering => Self {
                brightness: 1.05,
                handle_scale: 1.1,
                shadow_alpha: 0.45,
                cursor: "ew-resize",
            },
            Phase::Dragging => Self {
                brightness: 1.1,
                handle_scale: 1.2,
                shadow_alpha: 0.6,
                cursor: "grabbing",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderView {
    pub position: f64,
    pub phase: Phase,
    pub before_label: LabelTone,
    pub after_label: LabelTone,
    pub affordance: Affordance,
    /// `round(position)`, shown as `N%`.
    pub readout: u8,
}

impl SliderView {
    pub fn project(position: f64, phase: Phase) -> Self {
        let position = if position.is_nan() {
            INITIAL_POSITION
        } else {
            position.clamp(0.0, 100.0)
        };
        let before_label = if position < BEFORE_LABEL_INVERT_BELOW {
            LabelTone::Inverted
        } else {
            LabelTone::Normal
        };
        let after_label = if position > AFTER_LABEL_INVERT_ABOVE {
            LabelTone::Inverted
        } else {
            LabelTone::Normal
        };
        Self {
            position,
            phase,
            before_label,
            after_label,
            affordance: Affordance::for_phase(phase),
            readout: position.round() as u8,
        }
    }

    /// Position trimmed to three decimals, without unit.
    pub fn position_text(&self) -> String {
        format!("{}", (self.position * 1000.0).round() / 1000.0)
    }

    /// CSS percentage of the split point.
    pub fn offset(&self) -> String {
        format!("{}%", self.position_text())
    }

    /// `clip-path` of the after overlay: everything left of the split is cut.
    pub fn after_clip(&self) -> String {
        format!("inset(0 0 0 {})", self.offset())
    }

    pub fn readout_text(&self) -> String {
        format!("{}%", self.readout)
    }

    fn container_style(&self) -> String {
        let a = self.affordance;
        format!(
            "--position: {}; --brightness: {}; --handle-scale: {}; --shadow-alpha: {}; cursor: {};",
            self.offset(),
            a.brightness,
            a.handle_scale,
            a.shadow_alpha,
            a.cursor
        )
    }

    pub fn render(&self, props: &ComparisonProps) -> Markup {
        let classes = match &props.class_name {
            Some(extra) if !extra.trim().is_empty() => format!("comparison {}", extra.trim()),
            _ => "comparison".to_string(),
        };
        let offset = self.offset();
        let handle_style = format!(
            "left: {offset}; transform: translate(-50%, -50%) scale({});",
            self.affordance.handle_scale
        );

        html! {
            div class=(classes)
                data-phase=(self.phase.as_str())
                data-position=(self.position_text())
                style=(self.container_style())
            {
                img.comparison-before
                    src=(props.before_image)
                    alt=(props.before_label())
                    draggable="false";
                div.comparison-after style={ "clip-path: " (self.after_clip()) ";" } {
                    img src=(props.after_image) alt=(props.after_label()) draggable="false";
                }
                div.comparison-divider style={ "left: " (offset) ";" } {}
                div.comparison-handle
                    role="slider"
                    tabindex="0"
                    aria-label="Comparison position"
                    aria-valuemin="0"
                    aria-valuemax="100"
                    aria-valuenow=(self.readout)
                    style=(handle_style)
                {
                    span.handle-grip aria-hidden="true" { "‹ ›" }
                }
                span.comparison-label.comparison-label-before.inverted[self.before_label.is_inverted()] {
                    (props.before_label())
                }
                span.comparison-label.comparison-label-after.inverted[self.after_label.is_inverted()] {
                    (props.after_label())
                }
                span.comparison-readout aria-live="polite" { (self.readout_text()) }
            }
        }
    }
}

//! Drag lifecycle of the comparison slider.
//!
//! The machine is pure: [`InteractionStateMachine::handle`] consumes one
//! [`InputEvent`] and returns the [`Effect`]s the widget must carry out
//! against its host. It never touches the host itself, which keeps every
//! transition testable without a scheduler or a DOM.
//!
//! ## Phases
//!
//! ```text
//!            enter                 press          first move
//!   Idle ───────────▶ Hovering ──────────▶ (armed) ──────────▶ Dragging
//!    ▲  ◀─────────────   │                   │                    │
//!    │      leave        │                   │ release            │ release
//!    │                   │                   ▼ (plain click)      ▼
//!    └───────────────────┴──────── Idle / Hovering, by pointer location
//! ```
//!
//! A press *arms* the drag: global listeners, the resize cursor and the
//! text-selection lock are installed at once, because the very next move may
//! already be outside the widget. The phase becomes [`Phase::Dragging`] on the
//! first move away from the press coordinate. A release with no such move is a
//! plain click and produces a single [`Effect::Jump`].
//!
//! ## Invariants
//!
//! 1. `BeginCapture` and `EndCapture` alternate strictly; every press that
//!    was accepted is matched by exactly one `EndCapture`, emitted on release
//!    or on [`InteractionStateMachine::reset`].
//! 2. Leaving the widget while pressed never ends the drag.
//! 3. Moves are forwarded only between a press and its release.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Interaction phase, exposed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Hovering,
    Dragging,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Hovering => "hovering",
            Phase::Dragging => "dragging",
        }
    }
}

/// Input device that started a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Raw input, in client coordinates.
///
/// `Move` and `Release` may come from the widget itself or from the
/// top-level input surface while global listeners are attached; the machine
/// treats both the same.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerEnter,
    PointerLeave,
    Press { x: f64, kind: PointerKind },
    Move { x: f64 },
    Release { x: f64 },
}

/// Work the widget performs in response to a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Attach move/release listeners to the whole input surface, disable
    /// text selection and show the resize cursor.
    BeginCapture,
    /// Undo everything `BeginCapture` installed.
    EndCapture,
    /// Forward a drag coordinate to the coalescing position update.
    Track(f64),
    /// Apply a click coordinate immediately.
    Jump(f64),
}

/// Global input hooks the host installs for the duration of a press.
pub trait InputSurface {
    /// Route move and release events from the whole input surface to the
    /// widget, not only those over its own bounds.
    fn attach_global_listeners(&mut self);
    fn detach_global_listeners(&mut self);
    /// Disable text selection and force the resize cursor (`true`), or
    /// restore both (`false`).
    fn set_interaction_lock(&mut self, locked: bool);
}

#[derive(Debug, Clone, Copy)]
struct Press {
    origin_x: f64,
    kind: PointerKind,
    moved: bool,
}

#[derive(Debug, Default)]
pub struct InteractionStateMachine {
    phase: Phase,
    pointer_inside: bool,
    press: Option<Press>,
}

impl InteractionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True between an accepted press and its release.
    pub fn is_capturing(&self) -> bool {
        self.press.is_some()
    }

    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    pub fn handle(&mut self, event: InputEvent) -> Vec<Effect> {
        let before = self.phase;
        let effects = match event {
            InputEvent::PointerEnter => {
                self.pointer_inside = true;
                if self.press.is_none() {
                    self.phase = Phase::Hovering;
                }
                Vec::new()
            }
            InputEvent::PointerLeave => {
                self.pointer_inside = false;
                if self.press.is_none() {
                    self.phase = Phase::Idle;
                }
                Vec::new()
            }
            InputEvent::Press { x, kind } => {
                if self.press.is_some() {
                    // Second finger or a stray button while already pressed.
                    Vec::new()
                } else {
                    self.pointer_inside = true;
                    self.press = Some(Press {
                        origin_x: x,
                        kind,
                        moved: false,
                    });
                    vec![Effect::BeginCapture]
                }
            }
            InputEvent::Move { x } => match self.press.as_mut() {
                Some(press) if press.moved || x != press.origin_x => {
                    press.moved = true;
                    self.phase = Phase::Dragging;
                    vec![Effect::Track(x)]
                }
                _ => Vec::new(),
            },
            InputEvent::Release { x } => match self.press.take() {
                Some(press) => {
                    self.phase = self.resting_phase(press.kind);
                    if press.moved {
                        vec![Effect::EndCapture]
                    } else {
                        vec![Effect::EndCapture, Effect::Jump(x)]
                    }
                }
                None => Vec::new(),
            },
        };
        if self.phase != before {
            debug!(from = before.as_str(), to = self.phase.as_str(), ?event, "slider phase");
        }
        effects
    }

    /// Force the machine back to `Idle`, e.g. on unmount.
    ///
    /// Returns `EndCapture` if a press was still active, since no release
    /// will ever arrive for it.
    pub fn reset(&mut self) -> Vec<Effect> {
        let was_capturing = self.press.take().is_some();
        self.phase = Phase::Idle;
        self.pointer_inside = false;
        if was_capturing {
            debug!("slider reset mid-press");
            vec![Effect::EndCapture]
        } else {
            Vec::new()
        }
    }

    fn resting_phase(&self, kind: PointerKind) -> Phase {
        match kind {
            // A lifted finger does not hover.
            PointerKind::Touch => Phase::Idle,
            PointerKind::Mouse if self.pointer_inside => Phase::Hovering,
            PointerKind::Mouse => Phase::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(x: f64) -> InputEvent {
        InputEvent::Press {
            x,
            kind: PointerKind::Mouse,
        }
    }

    #[test]
    fn starts_idle() {
        let machine = InteractionStateMachine::new();
        assert_eq!(machine.phase(), Phase::Idle);
        assert!(!machine.is_capturing());
    }

    #[test]
    fn enter_and_leave_toggle_hover() {
        let mut machine = InteractionStateMachine::new();
        assert!(machine.handle(InputEvent::PointerEnter).is_empty());
        assert_eq!(machine.phase(), Phase::Hovering);
        assert!(machine.handle(InputEvent::PointerLeave).is_empty());
        assert_eq!(machine.phase(), Phase::Idle);
    }

    #[test]
    fn hover_moves_are_ignored() {
        let mut machine = InteractionStateMachine::new();
        machine.handle(InputEvent::PointerEnter);
        assert!(machine.handle(InputEvent::Move { x: 42.0 }).is_empty());
        assert_eq!(machine.phase(), Phase::Hovering);
    }

    #[test]
    fn press_then_move_drags() {
        let mut machine = InteractionStateMachine::new();
        machine.handle(InputEvent::PointerEnter);
        assert_eq!(machine.handle(press(100.0)), vec![Effect::BeginCapture]);
        assert!(machine.is_capturing());
        assert_eq!(
            machine.handle(InputEvent::Move { x: 120.0 }),
            vec![Effect::Track(120.0)]
        );
        assert_eq!(machine.phase(), Phase::Dragging);
    }

    #[test]
    fn drag_reachable_from_idle() {
        let mut machine = InteractionStateMachine::new();
        machine.handle(press(100.0));
        machine.handle(InputEvent::Move { x: 101.0 });
        assert_eq!(machine.phase(), Phase::Dragging);
    }

    #[test]
    fn move_at_press_origin_is_not_a_drag() {
        let mut machine = InteractionStateMachine::new();
        machine.handle(press(100.0));
        assert!(machine.handle(InputEvent::Move { x: 100.0 }).is_empty());
        assert_ne!(machine.phase(), Phase::Dragging);
    }

    #[test]
    fn leaving_while_dragging_keeps_dragging() {
        let mut machine = InteractionStateMachine::new();
        machine.handle(InputEvent::PointerEnter);
        machine.handle(press(100.0));
        machine.handle(InputEvent::Move { x: 150.0 });
        assert!(machine.handle(InputEvent::PointerLeave).is_empty());
        assert_eq!(machine.phase(), Phase::Dragging);
        assert_eq!(
            machine.handle(InputEvent::Move { x: 900.0 }),
            vec![Effect::Track(900.0)]
        );
    }

    #[test]
    fn release_outside_returns_to_idle() {
        let mut machine = InteractionStateMachine::new();
        machine.handle(InputEvent::PointerEnter);
        machine.handle(press(100.0));
        machine.handle(InputEvent::Move { x: 150.0 });
        machine.handle(InputEvent::PointerLeave);
        assert_eq!(
            machine.handle(InputEvent::Release { x: 900.0 }),
            vec![Effect::EndCapture]
        );
        assert_eq!(machine.phase(), Phase::Idle);
        assert!(!machine.is_capturing());
    }

    #[test]
    fn release_inside_returns_to_hovering() {
        let mut machine = InteractionStateMachine::new();
        machine.handle(InputEvent::PointerEnter);
        machine.handle(press(100.0));
        machine.handle(InputEvent::Move { x: 150.0 });
        machine.handle(InputEvent::Release { x: 150.0 });
        assert_eq!(machine.phase(), Phase::Hovering);
    }

    #[test]
    fn touch_release_never_hovers() {
        let mut machine = InteractionStateMachine::new();
        machine.handle(InputEvent::Press {
            x: 100.0,
            kind: PointerKind::Touch,
        });
        machine.handle(InputEvent::Move { x: 130.0 });
        machine.handle(InputEvent::Release { x: 130.0 });
        assert_eq!(machine.phase(), Phase::Idle);
    }

    #[test]
    fn plain_click_jumps_without_dragging() {
        let mut machine = InteractionStateMachine::new();
        machine.handle(InputEvent::PointerEnter);
        machine.handle(press(180.0));
        assert_ne!(machine.phase(), Phase::Dragging);
        assert_eq!(
            machine.handle(InputEvent::Release { x: 180.0 }),
            vec![Effect::EndCapture, Effect::Jump(180.0)]
        );
        assert_eq!(machine.phase(), Phase::Hovering);
    }

    #[test]
    fn moves_after_release_are_ignored() {
        let mut machine = InteractionStateMachine::new();
        machine.handle(press(100.0));
        machine.handle(InputEvent::Move { x: 150.0 });
        machine.handle(InputEvent::Release { x: 150.0 });
        assert!(machine.handle(InputEvent::Move { x: 300.0 }).is_empty());
        assert!(machine.handle(InputEvent::Release { x: 300.0 }).is_empty());
    }

    #[test]
    fn second_press_while_pressed_is_ignored() {
        let mut machine = InteractionStateMachine::new();
        assert_eq!(machine.handle(press(100.0)), vec![Effect::BeginCapture]);
        assert!(machine.handle(press(200.0)).is_empty());
        machine.handle(InputEvent::Move { x: 150.0 });
        assert_eq!(
            machine.handle(InputEvent::Release { x: 150.0 }),
            vec![Effect::EndCapture]
        );
    }

    #[test]
    fn reset_mid_drag_ends_capture() {
        let mut machine = InteractionStateMachine::new();
        machine.handle(press(100.0));
        machine.handle(InputEvent::Move { x: 150.0 });
        assert_eq!(machine.reset(), vec![Effect::EndCapture]);
        assert_eq!(machine.phase(), Phase::Idle);
        assert!(!machine.is_capturing());
        assert!(machine.reset().is_empty());
    }

    #[test]
    fn phase_names() {
        assert_eq!(Phase::Idle.as_str(), "idle");
        assert_eq!(Phase::Hovering.as_str(), "hovering");
        assert_eq!(Phase::Dragging.as_str(), "dragging");
    }
}

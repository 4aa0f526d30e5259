//! Interactive before/after comparison slider.
//!
//! | Part | Role |
//! |------|------|
//! | [`position`] | Coordinate → clamped percentage, one applied update per frame |
//! | [`interaction`] | Idle / Hovering / Dragging lifecycle, as a pure event → effects machine |
//! | [`render`] | Pure projection of `(position, phase)` into markup |
//!
//! [`ComparisonSlider`] wires the three together and owns the host handle.
//! The host is anything that can measure the widget, schedule frames and
//! route global input: a browser binding, a native window, or the recording
//! fake used in tests.
//!
//! ```text
//! host input ──▶ dispatch() ──▶ InteractionStateMachine ──effects──▶ host / PositionController
//! host frame ──▶ on_frame()  ──▶ PositionController::run_frame(measure())
//! view()     ──▶ SliderView::project(position, phase)
//! ```
//!
//! ## Teardown
//!
//! [`ComparisonSlider::unmount`] (also run on drop) detaches global listeners,
//! releases the selection lock and cancels the pending frame, whether or not a
//! release ever arrived. After that every entry point is a no-op.

pub mod interaction;
pub mod position;
pub mod render;

pub use interaction::{Effect, InputEvent, InputSurface, InteractionStateMachine, Phase, PointerKind};
pub use position::{Bounds, FrameHandle, FrameScheduler, PositionController, percentage_at};
pub use render::{ComparisonProps, SliderView};

use tracing::debug;

/// Everything the slider needs from its environment.
pub trait SliderHost: FrameScheduler + InputSurface {
    /// Current bounding box of the widget, `None` once it left the tree.
    fn measure(&self) -> Option<Bounds>;
}

/// Snapshot of the slider's mutable state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderState {
    pub position: f64,
    pub phase: Phase,
    pub pending_frame: Option<FrameHandle>,
}

pub struct ComparisonSlider<H: SliderHost> {
    host: H,
    controller: PositionController,
    machine: InteractionStateMachine,
    mounted: bool,
}

impl<H: SliderHost> ComparisonSlider<H> {
    /// Create the widget in its initial state: position 50, `Idle`.
    pub fn mount(host: H) -> Self {
        debug!("comparison slider mounted");
        Self {
            host,
            controller: PositionController::new(),
            machine: InteractionStateMachine::new(),
            mounted: true,
        }
    }

    pub fn position(&self) -> f64 {
        self.controller.position()
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn state(&self) -> SliderState {
        SliderState {
            position: self.controller.position(),
            phase: self.machine.phase(),
            pending_frame: self.controller.pending_frame(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Schedule a coalesced move of the split point to `client_x`.
    pub fn update_position(&mut self, client_x: f64) {
        if !self.mounted {
            return;
        }
        self.controller.update_position(client_x, &mut self.host);
    }

    /// Feed one input event through the interaction machine.
    pub fn dispatch(&mut self, event: InputEvent) {
        if !self.mounted {
            return;
        }
        for effect in self.machine.handle(event) {
            self.apply(effect);
        }
    }

    /// Host callback for a fired frame. Returns `true` if the position was
    /// updated (and the widget should re-render).
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if !self.mounted {
            return false;
        }
        let bounds = self.host.measure();
        self.controller.run_frame(handle, bounds).is_some()
    }

    pub fn view(&self) -> SliderView {
        SliderView::project(self.position(), self.phase())
    }

    /// Tear the widget down. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        for effect in self.machine.reset() {
            self.apply(effect);
        }
        if let Some(handle) = self.controller.cancel(&mut self.host) {
            debug!(handle = handle.0, "cancelled pending frame on unmount");
        }
        self.mounted = false;
        debug!("comparison slider unmounted");
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::BeginCapture => {
                self.host.attach_global_listeners();
                self.host.set_interaction_lock(true);
            }
            Effect::EndCapture => {
                self.host.detach_global_listeners();
                self.host.set_interaction_lock(false);
            }
            Effect::Track(x) => self.controller.update_position(x, &mut self.host),
            Effect::Jump(x) => {
                let bounds = self.host.measure();
                self.controller.jump_to(x, bounds, &mut self.host);
            }
        }
    }
}

impl<H: SliderHost> Drop for ComparisonSlider<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}

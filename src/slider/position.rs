//! Coordinate-to-percentage conversion with per-frame coalescing.
//!
//! Pointer and touch move events arrive far more often than the display
//! refreshes. [`PositionController::update_position`] never applies a
//! coordinate directly: it schedules a recompute for the next frame and
//! cancels whatever recompute was still waiting. When the host fires the
//! frame, [`PositionController::run_frame`] measures the widget *at that
//! moment* and stores the clamped percentage.
//!
//! ```text
//! move(120) ─┐
//! move(140) ─┼─ cancel, cancel ─▶ frame #3 fires ─▶ measure ─▶ position = pct(160)
//! move(160) ─┘
//! ```
//!
//! Only the latest coordinate inside a frame window is ever rendered.
//! Intermediate coordinates are dropped on purpose.

use tracing::{trace, warn};

/// Position of a freshly mounted slider, in percent.
pub const INITIAL_POSITION: f64 = 50.0;

/// Horizontal extent of the widget in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge (`L`).
    pub left: f64,
    /// Width (`W`). Zero while the widget is collapsed or not laid out.
    pub width: f64,
}

impl Bounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    fn is_measurable(&self) -> bool {
        self.left.is_finite() && self.width.is_finite() && self.width > 0.0
    }
}

/// Identifies one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Frame-synchronized scheduling, supplied by the host.
///
/// A browser host maps this onto `requestAnimationFrame` /
/// `cancelAnimationFrame`; a native host onto its vsync callback. When a
/// requested frame fires, the host calls back into the widget with the
/// handle it was given.
pub trait FrameScheduler {
    /// Request one callback at the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;
    /// Cancel a requested callback that has not fired yet.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Convert a client x coordinate into a percentage of `bounds`.
///
/// Returns `None` when the measurement is unusable (zero or non-finite width)
/// or the coordinate is NaN. Coordinates outside the box, including
/// infinities, clamp to `0.0` or `100.0`.
pub fn percentage_at(client_x: f64, bounds: Bounds) -> Option<f64> {
    if !bounds.is_measurable() || client_x.is_nan() {
        return None;
    }
    let pct = ((client_x - bounds.left) / bounds.width) * 100.0;
    Some(pct.clamp(0.0, 100.0))
}

#[derive(Debug, Clone, Copy)]
struct PendingUpdate {
    handle: FrameHandle,
    client_x: f64,
}

/// Owns the slider position and its single outstanding recompute.
#[derive(Debug)]
pub struct PositionController {
    position: f64,
    pending: Option<PendingUpdate>,
}

impl Default for PositionController {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionController {
    pub fn new() -> Self {
        Self {
            position: INITIAL_POSITION,
            pending: None,
        }
    }

    /// Current position, always within `0.0..=100.0`.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Handle of the recompute waiting for its frame, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending.map(|p| p.handle)
    }

    /// Schedule a recompute for `client_x`, replacing any pending one.
    pub fn update_position(&mut self, client_x: f64, scheduler: &mut impl FrameScheduler) {
        if let Some(previous) = self.pending.take() {
            trace!(handle = previous.handle.0, "superseding pending frame");
            scheduler.cancel_frame(previous.handle);
        }
        let handle = scheduler.request_frame();
        trace!(handle = handle.0, client_x, "frame requested");
        self.pending = Some(PendingUpdate { handle, client_x });
    }

    /// Run the recompute scheduled under `handle`.
    ///
    /// `bounds` is the widget measurement taken when the frame fires, `None`
    /// if the widget is no longer in the tree. Returns the applied position,
    /// or `None` when nothing changed: the handle was cancelled or superseded,
    /// or the measurement was unusable (the previous position is kept).
    pub fn run_frame(&mut self, handle: FrameHandle, bounds: Option<Bounds>) -> Option<f64> {
        match self.pending {
            Some(pending) if pending.handle == handle => {
                self.pending = None;
                self.apply(pending.client_x, bounds)
            }
            _ => {
                trace!(handle = handle.0, "ignoring stale frame");
                None
            }
        }
    }

    /// Apply `client_x` immediately, bypassing frame coalescing.
    ///
    /// Used for plain clicks. A pending recompute is cancelled first so an
    /// older coordinate cannot land after the click.
    pub fn jump_to(
        &mut self,
        client_x: f64,
        bounds: Option<Bounds>,
        scheduler: &mut impl FrameScheduler,
    ) -> Option<f64> {
        self.cancel(scheduler);
        self.apply(client_x, bounds)
    }

    /// Cancel the pending recompute. Returns the cancelled handle.
    pub fn cancel(&mut self, scheduler: &mut impl FrameScheduler) -> Option<FrameHandle> {
        let pending = self.pending.take()?;
        scheduler.cancel_frame(pending.handle);
        Some(pending.handle)
    }

    fn apply(&mut self, client_x: f64, bounds: Option<Bounds>) -> Option<f64> {
        let Some(bounds) = bounds else {
            trace!("widget not measurable, skipping update");
            return None;
        };
        match percentage_at(client_x, bounds) {
            Some(pct) => {
                self.position = pct;
                Some(pct)
            }
            None => {
                warn!(
                    left = bounds.left,
                    width = bounds.width,
                    client_x,
                    "unusable measurement, keeping position {}",
                    self.position
                );
                None
            }
        }
    }
}

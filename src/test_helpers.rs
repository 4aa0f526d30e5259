//! Shared test utilities for the retouch-landing test suite.
//!
//! Two kinds of helpers live here:
//!
//! - a recording [`FakeHost`] that stands in for the browser when driving a
//!   [`ComparisonSlider`]: frames are queued until [`flush_frames`] plays one
//!   display refresh, and global listener state is tracked so [`outside`] can
//!   deliver events only while the widget is actually listening;
//! - site fixtures ([`write_site_fixture`]) with real PNG assets for the
//!   generator tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let host = FakeHost::with_bounds(100.0, 400.0);
//! let mut slider = ComparisonSlider::mount(host.clone());
//! slider.update_position(300.0);
//! assert_eq!(flush_frames(&mut slider, &host), 1);
//! assert_eq!(slider.position(), 50.0);
//! ```

use std::cell::{Ref, RefCell};
use std::path::Path;
use std::rc::Rc;

use crate::slider::{
    Bounds, ComparisonSlider, FrameHandle, FrameScheduler, InputEvent, InputSurface, SliderHost,
};

// =========================================================================
// Fake slider host
// =========================================================================

/// Everything the fake host has been asked to do.
#[derive(Debug, Default)]
pub struct HostLog {
    pub bounds: Option<Bounds>,
    next_handle: u64,
    /// Total frames requested.
    pub requested: usize,
    /// Requested, not cancelled, not fired yet.
    pub outstanding: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
    pub listeners_attached: bool,
    pub attach_count: usize,
    pub detach_count: usize,
    pub interaction_locked: bool,
}

/// Cloneable handle onto a shared [`HostLog`]; tests keep one clone and give
/// the other to the slider, so the log survives the slider being dropped.
#[derive(Debug, Clone, Default)]
pub struct FakeHost(Rc<RefCell<HostLog>>);

impl FakeHost {
    pub fn with_bounds(left: f64, width: f64) -> Self {
        let host = Self::default();
        host.set_bounds(Some(Bounds::new(left, width)));
        host
    }

    pub fn set_bounds(&self, bounds: Option<Bounds>) {
        self.0.borrow_mut().bounds = bounds;
    }

    pub fn log(&self) -> Ref<'_, HostLog> {
        self.0.borrow()
    }

    fn take_outstanding(&self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.0.borrow_mut().outstanding)
    }
}

impl FrameScheduler for FakeHost {
    fn request_frame(&mut self) -> FrameHandle {
        let mut log = self.0.borrow_mut();
        log.next_handle += 1;
        log.requested += 1;
        let handle = FrameHandle(log.next_handle);
        log.outstanding.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut log = self.0.borrow_mut();
        log.outstanding.retain(|h| *h != handle);
        log.cancelled.push(handle);
    }
}

impl InputSurface for FakeHost {
    fn attach_global_listeners(&mut self) {
        let mut log = self.0.borrow_mut();
        assert!(!log.listeners_attached, "global listeners attached twice");
        log.listeners_attached = true;
        log.attach_count += 1;
    }

    fn detach_global_listeners(&mut self) {
        let mut log = self.0.borrow_mut();
        log.listeners_attached = false;
        log.detach_count += 1;
    }

    fn set_interaction_lock(&mut self, locked: bool) {
        self.0.borrow_mut().interaction_locked = locked;
    }
}

impl SliderHost for FakeHost {
    fn measure(&self) -> Option<Bounds> {
        self.0.borrow().bounds
    }
}

/// Play one display refresh: fire every outstanding frame. Returns how many
/// applied a position update.
pub fn flush_frames(slider: &mut ComparisonSlider<FakeHost>, host: &FakeHost) -> usize {
    host.take_outstanding()
        .into_iter()
        .filter(|handle| slider.on_frame(*handle))
        .count()
}

/// Deliver an event that happened outside the widget's bounds. Like a real
/// input surface, it only reaches the widget while global listeners are
/// attached.
pub fn outside(slider: &mut ComparisonSlider<FakeHost>, host: &FakeHost, event: InputEvent) {
    let listening = host.log().listeners_attached;
    if listening {
        slider.dispatch(event);
    }
}

// =========================================================================
// Site fixtures
// =========================================================================

/// Write a small solid-colour PNG.
pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 180, 160]));
    img.save(path).unwrap();
}

/// Populate `root` with a minimal landing source: two comparison images, a
/// step illustration, a logo and a `landing.toml` that references them.
pub fn write_site_fixture(root: &Path) {
    write_png(&root.join("assets/before.png"), 64, 48);
    write_png(&root.join("assets/after.png"), 64, 48);
    write_png(&root.join("assets/steps/upload.png"), 32, 32);
    write_png(&root.join("assets/logo.png"), 40, 12);
    std::fs::write(root.join("assets/robots.txt"), "User-agent: *\n").unwrap();
    std::fs::write(
        root.join("landing.toml"),
        r#"
[site]
title = "Retouch"
logo = "assets/logo.png"

[comparison]
before_image = "assets/before.png"
after_image = "assets/after.png"

[[steps]]
title = "Upload"
description = "Drop in **any** photo."
image = "assets/steps/upload.png"

[[steps]]
title = "Download"
description = "Get the edited file."
"#,
    )
    .unwrap();
}

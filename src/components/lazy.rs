//! Deferred mounting of below-the-fold sections.
//!
//! A [`LazyMount`] starts `Pending`, rendering a placeholder with a fixed
//! minimum height so the page does not jump when content arrives. The first
//! visibility observation that satisfies the threshold mounts it, and it stays
//! mounted: later observations, visible or not, are ignored.
//!
//! In the generated page a pending section is emitted as its placeholder plus
//! the deferred subtree inside a `<template>`, with the observation options in
//! `data-` attributes for whatever script hydrates it.

use maud::{Markup, html};

/// Visibility-observation options, mirroring `IntersectionObserver`'s.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyOptions {
    /// Fraction of the placeholder (0–1) that must be visible.
    pub threshold: f64,
    /// Margin grown around the viewport, in CSS margin syntax (`"200px"`).
    pub root_margin: String,
    /// Minimum height of the placeholder while pending (CSS length).
    pub placeholder_min_height: String,
}

impl Default for LazyOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "200px".to_string(),
            placeholder_min_height: "320px".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    Pending,
    Mounted,
}

/// One visibility observation of the placeholder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

#[derive(Debug, Clone)]
pub struct LazyMount {
    options: LazyOptions,
    state: MountState,
}

impl LazyMount {
    pub fn new(options: LazyOptions) -> Self {
        Self {
            options,
            state: MountState::Pending,
        }
    }

    /// A wrapper that renders its content straight away.
    pub fn eager(options: LazyOptions) -> Self {
        Self {
            options,
            state: MountState::Mounted,
        }
    }

    pub fn state(&self) -> MountState {
        self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.state == MountState::Mounted
    }

    pub fn options(&self) -> &LazyOptions {
        &self.options
    }

    /// Feed one observation. Returns `true` only for the observation that
    /// mounted the content.
    pub fn observe(&mut self, entry: Visibility) -> bool {
        if self.is_mounted() {
            return false;
        }
        let visible_enough = entry.is_intersecting
            && (self.options.threshold <= 0.0 || entry.intersection_ratio >= self.options.threshold);
        if visible_enough {
            self.state = MountState::Mounted;
        }
        visible_enough
    }

    pub fn render(&self, id: &str, content: Markup) -> Markup {
        match self.state {
            MountState::Mounted => html! {
                div.lazy-mount.is-mounted id=(id) { (content) }
            },
            MountState::Pending => html! {
                div.lazy-mount
                    id=(id)
                    data-threshold=(self.options.threshold.to_string())
                    data-root-margin=(self.options.root_margin)
                {
                    div.lazy-placeholder
                        style={ "min-height: " (self.options.placeholder_min_height) ";" }
                        aria-hidden="true" {}
                    template { (content) }
                }
            },
        }
    }
}

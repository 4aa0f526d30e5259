//! Presentational collaborators of the landing page.
//!
//! | Component | Role |
//! |-----------|------|
//! | [`lazy::LazyMount`] | Defers a section until it scrolls into view, mounts once |
//! | [`image::OptimizedImage`] | Placeholder until load, fallback on error |

pub mod image;
pub mod lazy;

pub use image::{ImageLoadState, LoadingHint, OptimizedImage};
pub use lazy::{LazyMount, LazyOptions, MountState, Visibility};

//! Image element with a loading placeholder and fallback substitution.
//!
//! The component shows a skeleton until the image reports either `load` or
//! `error`. On error it swaps its source to the fallback, once: if the
//! fallback fails too the element stays on it rather than looping.

use maud::{Markup, html};

/// How eagerly the browser should fetch the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingHint {
    #[default]
    Lazy,
    Eager,
    /// Above-the-fold image: eager and high fetch priority.
    Priority,
}

impl LoadingHint {
    fn loading_attr(self) -> &'static str {
        match self {
            LoadingHint::Lazy => "lazy",
            LoadingHint::Eager | LoadingHint::Priority => "eager",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLoadState {
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone)]
pub struct OptimizedImage {
    src: String,
    alt: String,
    fallback: Option<String>,
    loading: LoadingHint,
    width: Option<u32>,
    height: Option<u32>,
    class_name: Option<String>,
    current_src: String,
    state: ImageLoadState,
}

impl OptimizedImage {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        let src = src.into();
        Self {
            current_src: src.clone(),
            src,
            alt: alt.into(),
            fallback: None,
            loading: LoadingHint::default(),
            width: None,
            height: None,
            class_name: None,
            state: ImageLoadState::Loading,
        }
    }

    pub fn fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    pub fn loading(mut self, hint: LoadingHint) -> Self {
        self.loading = hint;
        self
    }

    pub fn dimensions(mut self, dimensions: Option<(u32, u32)>) -> Self {
        if let Some((w, h)) = dimensions {
            self.width = Some(w);
            self.height = Some(h);
        }
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// The source currently displayed: `src`, or the fallback after an error.
    pub fn current_src(&self) -> &str {
        &self.current_src
    }

    pub fn state(&self) -> ImageLoadState {
        self.state
    }

    pub fn on_load(&mut self) {
        if self.state == ImageLoadState::Loading {
            self.state = ImageLoadState::Loaded;
        }
    }

    /// Handle a load error. Returns `true` if the source was swapped to the
    /// fallback.
    pub fn on_error(&mut self) -> bool {
        self.state = ImageLoadState::Failed;
        match &self.fallback {
            Some(fallback) if *fallback != self.current_src => {
                self.current_src = fallback.clone();
                true
            }
            _ => false,
        }
    }

    pub fn render(&self) -> Markup {
        let loading = self.state == ImageLoadState::Loading;
        let aspect = match (self.width, self.height) {
            (Some(w), Some(h)) if h > 0 => Some(format!("aspect-ratio: {w} / {h};")),
            _ => None,
        };
        let classes = match &self.class_name {
            Some(extra) => format!("optimized-image {extra}"),
            None => "optimized-image".to_string(),
        };
        let priority = (self.loading == LoadingHint::Priority).then_some("high");

        html! {
            div class=(classes) data-state=(state_name(self.state)) style=[aspect] {
                @if loading {
                    div.image-placeholder aria-hidden="true" {}
                }
                img.is-loading[loading]
                    src=(self.current_src)
                    alt=(self.alt)
                    loading=(self.loading.loading_attr())
                    fetchpriority=[priority]
                    decoding="async"
                    width=[self.width]
                    height=[self.height]
                    data-fallback=[self.fallback.as_deref()];
            }
        }
    }
}

fn state_name(state: ImageLoadState) -> &'static str {
    match state {
        ImageLoadState::Loading => "loading",
        ImageLoadState::Loaded => "loaded",
        ImageLoadState::Failed => "failed",
    }
}

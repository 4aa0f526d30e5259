//! Landing page generation.
//!
//! Loads `landing.toml`, publishes assets and renders `index.html`.
//!
//! ## Page Structure
//!
//! ```text
//! header.site-header      logo + title + CTA
//! section.hero            tagline + comparison slider (position 50, idle)
//! section#how-it-works    numbered steps            ┐ wrapped in LazyMount
//! section#faq             details/summary accordion ┘ when lazy.enabled
//! footer.site-footer
//! ```
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── asset-manifest.json        # logical path → fingerprinted path
//! └── assets/
//!     ├── before.3f2a9c1e.jpg
//!     ├── after.77b0d412.jpg
//!     └── steps/
//!         └── upload.a01f9e3c.png
//! ```
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time and prefixed with the color
//! custom properties generated from config. The comparison widget's geometry
//! comes entirely from inline styles produced by
//! [`SliderView`](crate::slider::SliderView); the stylesheet only decorates it.
//!
//! ## Script
//!
//! `static/landing.js` is embedded the same way and runs at the end of the
//! body. It drives the slider with frame-coalesced pointer handling, mounts
//! deferred sections through an `IntersectionObserver` built from their
//! `data-` attributes, and settles image placeholders on load or error. It
//! tags `<html>` with `js`; styles that hide content until the script acts
//! are scoped under that class.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::assets::{self, AssetError, AssetManifest};
use crate::components::{LazyMount, LoadingHint, OptimizedImage};
use crate::config::{self, ComparisonConfig, ConfigError, LandingConfig};
use crate::content::{FaqEntry, Step, markdown_to_html};
use crate::slider::position::INITIAL_POSITION;
use crate::slider::{ComparisonProps, Phase, SliderView};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/landing.js");

/// Name of the published asset manifest.
pub const ASSET_MANIFEST_FILENAME: &str = "asset-manifest.json";

/// Summary of a finished build, consumed by [`crate::output`].
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub title: String,
    pub manifest: AssetManifest,
    pub step_count: usize,
    pub faq_count: usize,
    /// Section ids rendered behind a LazyMount placeholder.
    pub deferred_sections: Vec<&'static str>,
    pub page_bytes: usize,
}

/// Config and assets of a source directory, resolved but not written.
#[derive(Debug)]
pub struct Prepared {
    pub config: LandingConfig,
    pub manifest: AssetManifest,
}

/// Load config and plan assets, then check every image reference resolves.
pub fn prepare(source: &Path) -> Result<Prepared, GenerateError> {
    let config = config::load_config(source)?;
    let manifest = assets::plan_assets(source)?;
    for reference in image_references(&config) {
        manifest.resolve(reference)?;
    }
    Ok(Prepared { config, manifest })
}

/// Build the landing page from `source` into `output`.
pub fn generate(source: &Path, output: &Path) -> Result<BuildReport, GenerateError> {
    let Prepared { config, manifest } = prepare(source)?;

    fs::create_dir_all(output)?;
    assets::copy_assets(source, &manifest, output)?;
    info!(count = manifest.len(), "published assets");

    let css = format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC);
    let page = render_landing(&config, &manifest, &css)?.into_string();
    fs::write(output.join("index.html"), &page)?;
    debug!(bytes = page.len(), "wrote index.html");

    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(output.join(ASSET_MANIFEST_FILENAME), json)?;

    let deferred_sections = if config.lazy.enabled {
        vec!["how-it-works", "faq"]
    } else {
        Vec::new()
    };

    Ok(BuildReport {
        output_dir: output.to_path_buf(),
        title: config.site.title.clone(),
        manifest,
        step_count: config.steps.len(),
        faq_count: config.faq.len(),
        deferred_sections,
        page_bytes: page.len(),
    })
}

/// Every image reference the page will render.
fn image_references(config: &LandingConfig) -> Vec<&str> {
    let mut refs = vec![
        config.comparison.before_image.as_str(),
        config.comparison.after_image.as_str(),
    ];
    refs.extend(config.site.logo.as_deref());
    refs.extend(config.images.fallback.as_deref());
    refs.extend(config.steps.iter().filter_map(|s| s.image.as_deref()));
    refs
}

/// Resolve the comparison config's image references into widget props.
pub fn comparison_props(
    comparison: &ComparisonConfig,
    manifest: &AssetManifest,
) -> Result<ComparisonProps, AssetError> {
    Ok(ComparisonProps {
        before_image: manifest.resolve(&comparison.before_image)?,
        after_image: manifest.resolve(&comparison.after_image)?,
        before_alt: comparison.before_alt.clone(),
        after_alt: comparison.after_alt.clone(),
        class_name: comparison.class_name.clone(),
    })
}

/// Render just the comparison widget at an arbitrary state.
///
/// Out-of-range positions are clamped by the projection.
pub fn render_slider_snapshot(props: &ComparisonProps, position: f64, phase: Phase) -> Markup {
    SliderView::project(position, phase).render(props)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, description: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(description);
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Build an [`OptimizedImage`] for a page image reference.
fn page_image(
    reference: &str,
    alt: &str,
    hint: LoadingHint,
    config: &LandingConfig,
    manifest: &AssetManifest,
) -> Result<OptimizedImage, AssetError> {
    let mut image = OptimizedImage::new(manifest.resolve(reference)?, alt)
        .loading(hint)
        .dimensions(manifest.dimensions(reference));
    if let Some(fallback) = &config.images.fallback {
        image = image.fallback(manifest.resolve(fallback)?);
    }
    Ok(image)
}

fn site_header(config: &LandingConfig, manifest: &AssetManifest) -> Result<Markup, AssetError> {
    let logo = match &config.site.logo {
        Some(reference) => Some(
            page_image(reference, &config.site.title, LoadingHint::Priority, config, manifest)?
                .class_name("site-logo"),
        ),
        None => None,
    };
    Ok(html! {
        header.site-header {
            a.brand href="/" {
                @if let Some(logo) = &logo {
                    (logo.render())
                }
                span.brand-name { (config.site.title) }
            }
            a.cta.cta-small href=(config.site.cta_href) { (config.site.cta_label) }
        }
    })
}

fn hero(config: &LandingConfig, props: &ComparisonProps) -> Markup {
    html! {
        section.hero {
            div.hero-copy {
                h1 { (config.site.title) }
                p.tagline { (config.site.tagline) }
                a.cta href=(config.site.cta_href) { (config.site.cta_label) }
            }
            div.hero-compare {
                (render_slider_snapshot(props, INITIAL_POSITION, Phase::Idle))
            }
        }
    }
}

fn how_it_works(
    steps: &[Step],
    config: &LandingConfig,
    manifest: &AssetManifest,
) -> Result<Markup, AssetError> {
    let images = steps
        .iter()
        .map(|step| {
            step.image
                .as_deref()
                .map(|r| page_image(r, &step.title, LoadingHint::Lazy, config, manifest))
                .transpose()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(html! {
        section.how-it-works {
            h2 { "How it works" }
            ol.steps {
                @for (idx, (step, image)) in steps.iter().zip(&images).enumerate() {
                    li.step {
                        span.step-number aria-hidden="true" { (idx + 1) }
                        @if let Some(image) = image {
                            (image.render())
                        }
                        h3 { (step.title) }
                        div.step-description { (PreEscaped(markdown_to_html(&step.description))) }
                    }
                }
            }
        }
    })
}

fn faq_section(entries: &[FaqEntry]) -> Markup {
    html! {
        section.faq {
            h2 { "Frequently asked questions" }
            div.faq-list {
                @for entry in entries {
                    details.faq-item {
                        summary { (entry.question) }
                        div.faq-answer { (PreEscaped(markdown_to_html(&entry.answer))) }
                    }
                }
            }
        }
    }
}

fn site_footer(config: &LandingConfig) -> Markup {
    html! {
        footer.site-footer {
            p { (config.site.footer) }
        }
    }
}

/// Wrap a section in a LazyMount, pending or eager per config.
fn deferred(config: &LandingConfig, id: &str, content: Markup) -> Markup {
    let options = config.lazy.options();
    let mount = if config.lazy.enabled {
        LazyMount::new(options)
    } else {
        LazyMount::eager(options)
    };
    mount.render(id, content)
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Renders the full landing page.
pub fn render_landing(
    config: &LandingConfig,
    manifest: &AssetManifest,
    css: &str,
) -> Result<Markup, AssetError> {
    let props = comparison_props(&config.comparison, manifest)?;
    let header = site_header(config, manifest)?;
    let steps = how_it_works(&config.steps, config, manifest)?;

    let content = html! {
        (header)
        main.landing {
            (hero(config, &props))
            (deferred(config, "how-it-works", steps))
            (deferred(config, "faq", faq_section(&config.faq)))
        }
        (site_footer(config))
    };

    Ok(base_document(&config.site.title, &config.site.tagline, css, content))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_site_fixture;
    use tempfile::TempDir;

    fn render_default(config: &LandingConfig) -> String {
        let manifest = manifest_for(config);
        render_landing(config, &manifest, "").unwrap().into_string()
    }

    /// A manifest that knows every local reference of `config`.
    fn manifest_for(config: &LandingConfig) -> AssetManifest {
        let mut manifest = AssetManifest::default();
        for reference in image_references(config) {
            if assets::is_local_reference(reference) {
                manifest.entries.insert(
                    reference.to_string(),
                    assets::AssetEntry {
                        output: assets::fingerprinted_name(reference, "deadbeefcafe"),
                        hash: "deadbeefcafe".to_string(),
                        dimensions: Some((800, 600)),
                        bytes: 1,
                    },
                );
            }
        }
        manifest
    }

    #[test]
    fn base_document_includes_doctype() {
        let doc = base_document("T", "d", "body {}", html! { p { "x" } }).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<style>body {}</style>"));
    }

    #[test]
    fn base_document_runs_script_after_content() {
        let doc = base_document("T", "d", "", html! { p { "x" } }).into_string();
        let content = doc.find("<p>x</p>").unwrap();
        let script = doc.find("<script>").unwrap();
        assert!(script > content);
        assert!(doc.contains("classList.add('js')"));
    }

    #[test]
    fn script_hydrates_every_deferred_hook() {
        // Attributes rendered by the components must be the ones the script reads.
        for hook in [
            "data-threshold",
            "data-root-margin",
            "data-fallback",
            "data-position",
            ".lazy-mount",
            ".comparison-after",
            ".comparison-handle",
            "requestAnimationFrame",
            "cancelAnimationFrame",
            "IntersectionObserver",
        ] {
            assert!(JS.contains(hook), "script does not handle {hook}");
        }
    }

    #[test]
    fn loading_images_stay_visible_without_script() {
        for (idx, line) in CSS_STATIC.lines().enumerate() {
            let selector = line.trim_start();
            if selector.contains("is-loading") {
                assert!(selector.starts_with(".js "), "line {}: {line}", idx + 1);
            }
        }
        assert!(CSS_STATIC.contains(".image-placeholder {\n    display: none;"));
    }

    #[test]
    fn landing_contains_all_sections() {
        let html = render_default(&LandingConfig::default());
        assert!(html.contains("site-header"));
        assert!(html.contains(r#"class="hero""#));
        assert!(html.contains(r#"id="how-it-works""#));
        assert!(html.contains(r#"id="faq""#));
        assert!(html.contains("site-footer"));
        assert!(html.contains("<title>Retouch</title>"));
    }

    #[test]
    fn hero_slider_starts_at_fifty_idle() {
        let html = render_default(&LandingConfig::default());
        assert!(html.contains(r#"data-phase="idle""#));
        assert!(html.contains(r#"data-position="50""#));
        assert!(html.contains("clip-path: inset(0 0 0 50%);"));
        assert!(html.contains(">50%</span>"));
    }

    #[test]
    fn slider_uses_fingerprinted_images() {
        let html = render_default(&LandingConfig::default());
        assert!(html.contains(r#"src="assets/before.deadbeef.jpg""#));
        assert!(html.contains(r#"src="assets/after.deadbeef.jpg""#));
    }

    #[test]
    fn lazy_sections_render_templates() {
        let html = render_default(&LandingConfig::default());
        assert!(html.contains("lazy-placeholder"));
        assert!(html.contains("<template>"));
    }

    #[test]
    fn eager_sections_when_lazy_disabled() {
        let mut config = LandingConfig::default();
        config.lazy.enabled = false;
        let html = render_default(&config);
        assert!(!html.contains("<template>"));
        assert!(html.contains("faq-item"));
    }

    #[test]
    fn faq_renders_markdown_answers_and_escapes_questions() {
        let mut config = LandingConfig::default();
        config.faq = vec![FaqEntry {
            question: "<script>alert('q')</script>".to_string(),
            answer: "Absolutely **yes**.".to_string(),
        }];
        let html = render_default(&config);
        assert!(html.contains("<strong>yes</strong>"));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<summary>"));
    }

    #[test]
    fn steps_are_numbered_with_images() {
        let mut config = LandingConfig::default();
        config.steps[1].image = Some("assets/steps/look.png".to_string());
        let html = render_default(&config);
        assert!(html.contains(r#"aria-hidden="true">3</span>"#));
        assert!(html.contains("assets/steps/look.deadbeef.png"));
        assert!(html.contains(r#"width="800""#));
        assert!(html.contains(r#"loading="lazy""#));
    }

    #[test]
    fn logo_is_priority_image() {
        let mut config = LandingConfig::default();
        config.site.logo = Some("assets/logo.png".to_string());
        let html = render_default(&config);
        assert!(html.contains(r#"fetchpriority="high""#));
        assert!(html.contains("site-logo"));
    }

    #[test]
    fn fallback_is_resolved() {
        let mut config = LandingConfig::default();
        config.images.fallback = Some("https://cdn.example.com/missing.svg".to_string());
        config.steps[0].image = Some("assets/steps/a.png".to_string());
        let html = render_default(&config);
        assert!(html.contains(r#"data-fallback="https://cdn.example.com/missing.svg""#));
    }

    #[test]
    fn missing_asset_fails_render() {
        let config = LandingConfig::default();
        let result = render_landing(&config, &AssetManifest::default(), "");
        assert!(matches!(result, Err(AssetError::Missing(_))));
    }

    #[test]
    fn snapshot_clamps_position() {
        let props = ComparisonProps::new("a.jpg", "b.jpg");
        let html = render_slider_snapshot(&props, 180.0, Phase::Hovering).into_string();
        assert!(html.contains(r#"data-position="100""#));
        assert!(html.contains(r#"data-phase="hovering""#));
        assert!(html.contains("comparison-label-after inverted"));
    }

    #[test]
    fn generated_page_is_hydrated() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_site_fixture(src.path());
        generate(src.path(), out.path()).unwrap();

        let index = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert_eq!(index.matches("<script>").count(), 1);
        assert_eq!(index.matches("<template>").count(), 2);
        assert!(index.contains("new IntersectionObserver"));
        assert!(index.contains(".js .optimized-image img.is-loading"));
    }

    #[test]
    fn generate_writes_site() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_site_fixture(src.path());

        let report = generate(src.path(), out.path()).unwrap();
        assert_eq!(report.title, "Retouch");
        assert_eq!(report.step_count, 2);
        assert_eq!(report.faq_count, 4);
        assert_eq!(report.manifest.len(), 5);
        assert_eq!(report.deferred_sections, vec!["how-it-works", "faq"]);

        let index = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert_eq!(index.len(), report.page_bytes);
        let before = &report.manifest.get("assets/before.png").unwrap().output;
        assert!(index.contains(before.as_str()));
        assert!(out.path().join(before).is_file());

        let manifest_json = fs::read_to_string(out.path().join(ASSET_MANIFEST_FILENAME)).unwrap();
        let parsed: AssetManifest = serde_json::from_str(&manifest_json).unwrap();
        assert_eq!(parsed, report.manifest);
    }

    #[test]
    fn prepare_reports_missing_reference() {
        let src = TempDir::new().unwrap();
        write_site_fixture(src.path());
        fs::remove_file(src.path().join("assets/after.png")).unwrap();
        let err = prepare(src.path()).unwrap_err();
        assert!(err.to_string().contains("assets/after.png"));
    }

    #[test]
    fn generate_rejects_bad_config() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_site_fixture(src.path());
        fs::write(src.path().join("landing.toml"), "[lazy]\nthreshold = 3.0\n").unwrap();
        assert!(matches!(
            generate(src.path(), out.path()),
            Err(GenerateError::Config(ConfigError::Validation(_)))
        ));
    }
}

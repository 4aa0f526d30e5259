//! CLI output formatting for `build` and `check`.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each entity (asset,
//! step, question) is listed by its positional index and identity first;
//! published paths and sizes follow as secondary context.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Assets
//! 001 assets/after.png → assets/after.77b0d412.png (64×48, 1.2 KB)
//! 002 assets/robots.txt → assets/robots.0c6e1a9f.txt (14 B)
//!
//! Sections
//!     hero (slider at 50%)
//!     how-it-works: 2 steps (deferred)
//!     faq: 4 questions (deferred)
//!
//! Retouch → index.html (18.3 KB), 5 assets
//! ```
//!
//! ## Check
//!
//! ```text
//! Site
//!     Retouch
//!     Comparison: assets/before.png ↔ assets/after.png
//!
//! Steps
//! 001 Upload
//!     Image: assets/steps/upload.png
//! 002 Download
//!
//! FAQ
//! 001 Is my original photo changed?
//!
//! Assets
//! 001 assets/after.png (64×48, 1.2 KB)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::assets::{AssetEntry, AssetManifest};
use crate::generate::{BuildReport, Prepared};
use crate::slider::position::INITIAL_POSITION;

/// Longest FAQ question shown before truncation.
const QUESTION_WIDTH: usize = 60;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Human-readable byte count: `14 B`, `1.2 KB`, `3.4 MB`.
fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / MB)
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

/// Size detail of an asset: dimensions for rasters, then bytes.
fn asset_detail(entry: &AssetEntry) -> String {
    match entry.dimensions {
        Some((w, h)) => format!("{w}\u{d7}{h}, {}", format_bytes(entry.bytes)),
        None => format_bytes(entry.bytes),
    }
}

fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

// ============================================================================
// Build
// ============================================================================

fn format_assets(manifest: &AssetManifest, show_output: bool) -> Vec<String> {
    let mut lines = vec!["Assets".to_string()];
    if manifest.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, (reference, entry)) in manifest.entries.iter().enumerate() {
        if show_output {
            lines.push(format!(
                "{} {} \u{2192} {} ({})",
                format_index(i + 1),
                reference,
                entry.output,
                asset_detail(entry)
            ));
        } else {
            lines.push(format!(
                "{} {} ({})",
                format_index(i + 1),
                reference,
                asset_detail(entry)
            ));
        }
    }
    lines
}

/// Format the result of a build.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = format_assets(&report.manifest, true);

    let deferred = |id: &str| {
        if report.deferred_sections.iter().any(|s| *s == id) {
            " (deferred)"
        } else {
            ""
        }
    };

    lines.push(String::new());
    lines.push("Sections".to_string());
    lines.push(format!("{}hero (slider at {}%)", indent(1), INITIAL_POSITION));
    lines.push(format!(
        "{}how-it-works: {}{}",
        indent(1),
        pluralize(report.step_count, "step", "steps"),
        deferred("how-it-works")
    ));
    lines.push(format!(
        "{}faq: {}{}",
        indent(1),
        pluralize(report.faq_count, "question", "questions"),
        deferred("faq")
    ));

    lines.push(String::new());
    lines.push(format!(
        "{} \u{2192} index.html ({}), {}",
        report.title,
        format_bytes(report.page_bytes as u64),
        pluralize(report.manifest.len(), "asset", "assets")
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the resolved content of a source directory.
pub fn format_check_output(prepared: &Prepared) -> Vec<String> {
    let config = &prepared.config;
    let mut lines = vec!["Site".to_string()];
    lines.push(format!("{}{}", indent(1), config.site.title));
    lines.push(format!(
        "{}Comparison: {} \u{2194} {}",
        indent(1),
        config.comparison.before_image,
        config.comparison.after_image
    ));
    if let Some(logo) = &config.site.logo {
        lines.push(format!("{}Logo: {}", indent(1), logo));
    }

    lines.push(String::new());
    lines.push("Steps".to_string());
    for (i, step) in config.steps.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), step.title));
        if let Some(image) = &step.image {
            lines.push(format!("{}Image: {}", indent(1), image));
        }
    }

    lines.push(String::new());
    lines.push("FAQ".to_string());
    for (i, entry) in config.faq.iter().enumerate() {
        lines.push(format!(
            "{} {}",
            format_index(i + 1),
            truncate_desc(&entry.question, QUESTION_WIDTH)
        ));
    }

    lines.push(String::new());
    lines.extend(format_assets(&prepared.manifest, false));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(prepared: &Prepared) {
    for line in format_check_output(prepared) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

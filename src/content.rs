//! Static page content: FAQ entries and "how it works" steps.
//!
//! Both are plain lists configured in `landing.toml` (`[[faq]]`, `[[steps]]`).
//! Answers and step descriptions are Markdown; questions and titles are plain
//! text and escaped like any other interpolated value.

use pulldown_cmark::{Parser, html as md_html};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaqEntry {
    pub question: String,
    /// Markdown.
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub title: String,
    /// Markdown.
    pub description: String,
    /// Optional illustration, `assets/…` or a URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

pub fn default_steps() -> Vec<Step> {
    [
        ("Upload your photo", "Drag a JPEG, PNG or WebP into the editor. Files up to 25 MB are fine."),
        ("Pick a look", "Choose a preset or describe the edit you want in plain words."),
        ("Download the result", "Preview the before and after side by side, then save it in full resolution."),
    ]
    .into_iter()
    .map(|(title, description)| Step {
        title: title.to_string(),
        description: description.to_string(),
        image: None,
    })
    .collect()
}

pub fn default_faq() -> Vec<FaqEntry> {
    [
        ("Is my original photo changed?", "No. Edits are applied to a copy; your original is never modified."),
        ("Which formats are supported?", "JPEG, PNG and WebP in, JPEG or PNG out."),
        ("How long does an edit take?", "Most photos are ready in a few seconds."),
        ("Can I use the results commercially?", "Yes, edited photos are yours to use however you like."),
    ]
    .into_iter()
    .map(|(question, answer)| FaqEntry {
        question: question.to_string(),
        answer: answer.to_string(),
    })
    .collect()
}

/// Render Markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_populated() {
        assert_eq!(default_steps().len(), 3);
        assert_eq!(default_faq().len(), 4);
        assert!(default_faq().iter().all(|f| !f.question.is_empty()));
    }

    #[test]
    fn markdown_renders_inline_markup() {
        let html = markdown_to_html("This is **bold** and *italic*.");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn step_image_is_optional() {
        let step: Step = toml::from_str("title = \"a\"\ndescription = \"b\"").unwrap();
        assert_eq!(step.image, None);
    }

    #[test]
    fn faq_rejects_unknown_keys() {
        let result: Result<FaqEntry, _> = toml::from_str("question = \"a\"\nanwser = \"b\"");
        assert!(result.is_err());
    }
}

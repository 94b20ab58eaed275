//! Markdown pages: front matter, titles, HTML conversion.
//!
//! Pages may open with a YAML block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: About the Institute
//! subtitle: Who we are
//! ---
//! # About
//!
//! Body text…
//! ```
//!
//! Only `title` and `subtitle` are read; other keys are ignored.

use pulldown_cmark::{Options, Parser, html as md_html};
use serde::Deserialize;
use tracing::debug;

const DELIMITER: &str = "---\n";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FrontMatter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
}

/// Split a document into front matter and body.
///
/// The text is split on `---\n`; with fewer than three parts there is no
/// front matter and the body is the whole input. Otherwise the second part
/// is parsed as YAML and the rest, re-joined and trimmed, is the body. A
/// block that is not valid YAML yields `None` but is still stripped.
pub fn parse_front_matter(content: &str) -> (Option<FrontMatter>, String) {
    let parts: Vec<&str> = content.split(DELIMITER).collect();
    if parts.len() < 3 {
        return (None, content.to_string());
    }
    let body = parts[2..].join(DELIMITER).trim().to_string();
    let front_matter = match serde_yaml::from_str::<Option<FrontMatter>>(parts[1]) {
        Ok(fm) => fm,
        Err(e) => {
            debug!(error = %e, "invalid front matter");
            None
        }
    };
    (front_matter, body)
}

/// Page title: front matter, then the first `# ` heading, then `fallback`.
pub fn page_title(front_matter: Option<&FrontMatter>, body: &str, fallback: &str) -> String {
    if let Some(title) = front_matter.and_then(|fm| fm.title.as_deref()) {
        return title.to_string();
    }
    body.lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string())
        .unwrap_or_else(|| fallback.to_string())
}

/// Convert markdown to HTML (tables, footnotes, and strikethrough enabled).
pub fn render_markdown(body: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(body, options);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_front_matter() {
        let (fm, body) = parse_front_matter("# Title\n\nText");
        assert!(fm.is_none());
        assert_eq!(body, "# Title\n\nText");
    }

    #[test]
    fn front_matter_parsed_and_stripped() {
        let doc = "---\ntitle: About Us\nsubtitle: Who\nauthor: ignored\n---\n\n# About\n\nText\n";
        let (fm, body) = parse_front_matter(doc);
        let fm = fm.unwrap();
        assert_eq!(fm.title.as_deref(), Some("About Us"));
        assert_eq!(fm.subtitle.as_deref(), Some("Who"));
        assert_eq!(body, "# About\n\nText");
    }

    #[test]
    fn body_keeps_later_rules() {
        let doc = "---\ntitle: T\n---\nabove\n---\nbelow\n";
        let (_, body) = parse_front_matter(doc);
        assert_eq!(body, "above\n---\nbelow");
    }

    #[test]
    fn invalid_yaml_stripped_without_front_matter() {
        let doc = "---\ntitle: [unclosed\n---\nBody";
        let (fm, body) = parse_front_matter(doc);
        assert!(fm.is_none());
        assert_eq!(body, "Body");
    }

    #[test]
    fn empty_front_matter_block() {
        let (fm, body) = parse_front_matter("---\n---\nBody");
        assert!(fm.is_none());
        assert_eq!(body, "Body");
    }

    #[test]
    fn title_prefers_front_matter() {
        let fm = FrontMatter {
            title: Some("From YAML".to_string()),
            subtitle: None,
        };
        assert_eq!(page_title(Some(&fm), "# Heading", "slug"), "From YAML");
    }

    #[test]
    fn title_from_heading_then_fallback() {
        assert_eq!(page_title(None, "intro\n# Heading \nmore", "slug"), "Heading");
        assert_eq!(page_title(None, "no heading here", "about"), "about");
        let untitled = FrontMatter::default();
        assert_eq!(page_title(Some(&untitled), "# H", "x"), "H");
    }

    #[test]
    fn markdown_to_html() {
        let html = render_markdown("This is **bold** and *italic*.");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn markdown_tables_enabled() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}

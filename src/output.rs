//! CLI output formatting.
//!
//! Output is grouped by locale: one header line per locale, with the pages
//! or inputs that belong to it indented underneath. Each command has a
//! `format_*` function (returns `Vec<String>`) for testability and a
//! `print_*` wrapper that writes to stdout. Format functions are pure.
//!
//! ## Build
//!
//! ```text
//! en English (8 pages)
//!     en/about/index.html
//!     en/index.html
//!     ...
//! es Español (8 pages)
//!     ...
//!     Untranslated: about
//!
//! Generated 16 pages in 2 locales
//! ```
//!
//! ## Check
//!
//! ```text
//! Pages
//!     001 about
//!
//! Locales
//! en English
//!     Library: 12 documents
//!     Series: 3
//!     Translations: 0/32 messages, 1/1 pages
//!
//! Forum threads: 40
//! Forum posts: 512
//! ```

use crate::generate::{BuildReport, Inventory};
use crate::locale::Locale;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn locale_header(locale: Locale, detail: Option<String>) -> String {
    match detail {
        Some(d) => format!("{} {} ({})", locale, locale.native_name(), d),
        None => format!("{} {}", locale, locale.native_name()),
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Format the result of a site build.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    for locale in &report.locales {
        lines.push(locale_header(
            locale.locale,
            Some(plural(locale.pages.len(), "page", "pages")),
        ));
        for page in &locale.pages {
            lines.push(format!("    {}", page.display()));
        }
        if !locale.untranslated.is_empty() {
            lines.push(format!("    Untranslated: {}", locale.untranslated.join(", ")));
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} in {}",
        plural(report.total_pages(), "page", "pages"),
        plural(report.locales.len(), "locale", "locales")
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

/// Format the inventory produced by `check`.
pub fn format_check_output(inventory: &Inventory) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    if inventory.page_slugs.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, slug) in inventory.page_slugs.iter().enumerate() {
        lines.push(format!("    {} {}", format_index(i + 1), slug));
    }

    lines.push(String::new());
    lines.push("Locales".to_string());
    let page_total = inventory.page_slugs.len();
    for locale in &inventory.locales {
        lines.push(locale_header(locale.locale, None));
        lines.push(format!(
            "    Library: {}",
            plural(locale.library_docs, "document", "documents")
        ));
        lines.push(format!("    Series: {}", locale.series));
        lines.push(format!(
            "    Translations: {}/{} messages, {}/{} pages",
            locale.translated_messages, inventory.message_count, locale.translated_pages, page_total
        ));
    }

    lines.push(String::new());
    lines.push(format!("Forum threads: {}", inventory.thread_count));
    lines.push(format!("Forum posts: {}", inventory.post_count));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(inventory: &Inventory) {
    for line in format_check_output(inventory) {
        println!("{}", line);
    }
}

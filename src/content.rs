//! Localized content resolution.
//!
//! Static pages are markdown files stored per locale:
//!
//! ```text
//! content/
//! └── pages/
//!     ├── en/
//!     │   ├── about.md        # default locale: the canonical set of pages
//!     │   └── donate.md
//!     ├── es/
//!     │   └── about.md        # translated
//!     └── fr/                 # nothing translated yet
//! ```
//!
//! A lookup for `(pages, about, fr)` reads `pages/fr/about.md`; when that is
//! not there it reads `pages/en/about.md` instead. When neither is readable
//! the result is the empty string, which page renderers treat as "not
//! available in this language".
//!
//! Every read failure (missing file, permissions, invalid UTF-8) collapses
//! into that one outcome. The cause is still logged at `debug` level so a
//! misconfigured deployment can be diagnosed with `RUST_LOG=debug`.

use crate::locale::Locale;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A named partition of the content tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentDirectory {
    Pages,
}

impl ContentDirectory {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentDirectory::Pages => "pages",
        }
    }
}

/// Path of a localized document: `<root>/<directory>/<locale>/<slug>.md`.
pub fn content_path(
    root: &Path,
    directory: ContentDirectory,
    slug: &str,
    locale: Locale,
) -> PathBuf {
    root.join(directory.as_str())
        .join(locale.as_str())
        .join(format!("{slug}.md"))
}

/// Read one localized document. `None` for any failure.
pub fn read_directory_file(
    root: &Path,
    directory: ContentDirectory,
    slug: &str,
    locale: Locale,
) -> Option<String> {
    let path = content_path(root, directory, slug, locale);
    match fs::read_to_string(&path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "content file not found");
            None
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "content file unreadable");
            None
        }
    }
}

/// Resolve a document for `locale`, falling back to the default locale.
///
/// Returns the empty string when no locale has the document. An empty file
/// counts as missing, so an empty translation stub still shows the default
/// text.
pub fn resolve(root: &Path, directory: ContentDirectory, slug: &str, locale: Locale) -> String {
    let primary = read_directory_file(root, directory, slug, locale).filter(|t| !t.is_empty());
    if let Some(text) = primary {
        return text;
    }
    if locale.is_default() {
        return String::new();
    }
    debug!(
        directory = directory.as_str(),
        slug,
        locale = %locale,
        "falling back to default locale"
    );
    read_directory_file(root, directory, slug, Locale::DEFAULT).unwrap_or_default()
}

/// Resolve a static page.
pub fn get_page(root: &Path, slug: &str, locale: Locale) -> String {
    resolve(root, ContentDirectory::Pages, slug, locale)
}

/// Slugs of every document the default locale has in `directory`, sorted.
///
/// The default locale defines which documents exist; other locales only
/// translate them.
pub fn page_slugs(root: &Path, directory: ContentDirectory) -> Vec<String> {
    let dir = root.join(directory.as_str()).join(Locale::DEFAULT.as_str());
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "no content directory");
            return Vec::new();
        }
    };

    let mut slugs: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().to_string()))
        .filter(|s| !s.starts_with('.'))
        .collect();

    slugs.sort();
    slugs
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_page(root: &Path, locale: &str, slug: &str, text: &str) {
        let dir = root.join("pages").join(locale);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{slug}.md")), text).unwrap();
    }

    #[test]
    fn content_path_layout() {
        let path = content_path(
            Path::new("content"),
            ContentDirectory::Pages,
            "about",
            Locale::Fr,
        );
        assert_eq!(path, Path::new("content/pages/fr/about.md"));
    }

    #[test]
    fn returns_requested_locale_when_present() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "en", "about", "# About");
        write_page(tmp.path(), "es", "about", "# Acerca de");

        let text = resolve(tmp.path(), ContentDirectory::Pages, "about", Locale::Es);
        assert_eq!(text, "# Acerca de");
    }

    #[test]
    fn default_locale_file_returned_verbatim() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "en", "about", "# About\n\nBody text.\n");

        let text = get_page(tmp.path(), "about", Locale::En);
        assert_eq!(text, "# About\n\nBody text.\n");
    }

    #[test]
    fn falls_back_to_default_locale() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "en", "about", "English about");

        let text = resolve(tmp.path(), ContentDirectory::Pages, "about", Locale::Fr);
        assert_eq!(text, "English about");
    }

    #[test]
    fn missing_everywhere_is_empty() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "en", "about", "English about");

        assert_eq!(get_page(tmp.path(), "missing", Locale::En), "");
        assert_eq!(get_page(tmp.path(), "missing", Locale::Ja), "");
    }

    #[test]
    fn missing_content_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("does-not-exist");
        assert_eq!(get_page(&root, "about", Locale::De), "");
    }

    #[test]
    fn empty_translation_falls_back() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "en", "about", "English about");
        write_page(tmp.path(), "de", "about", "");

        assert_eq!(get_page(tmp.path(), "about", Locale::De), "English about");
    }

    #[test]
    fn invalid_utf8_treated_as_missing() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "en", "about", "English about");
        let es_dir = tmp.path().join("pages/es");
        fs::create_dir_all(&es_dir).unwrap();
        fs::write(es_dir.join("about.md"), [0xff, 0xfe, 0xfd]).unwrap();

        assert!(read_directory_file(tmp.path(), ContentDirectory::Pages, "about", Locale::Es).is_none());
        assert_eq!(get_page(tmp.path(), "about", Locale::Es), "English about");
    }

    #[test]
    fn directory_in_place_of_file_treated_as_missing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("pages/en/about.md")).unwrap();

        assert_eq!(get_page(tmp.path(), "about", Locale::En), "");
    }

    #[test]
    fn page_slugs_lists_default_locale_markdown() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "en", "donate", "x");
        write_page(tmp.path(), "en", "about", "x");
        write_page(tmp.path(), "es", "only-spanish", "x");
        fs::write(tmp.path().join("pages/en/notes.txt"), "x").unwrap();

        let slugs = page_slugs(tmp.path(), ContentDirectory::Pages);
        assert_eq!(slugs, vec!["about", "donate"]);
    }

    #[test]
    fn page_slugs_empty_without_directory() {
        let tmp = TempDir::new().unwrap();
        assert!(page_slugs(tmp.path(), ContentDirectory::Pages).is_empty());
    }

    #[test]
    fn fixture_pages_resolve_with_fallback() {
        let tmp = crate::test_helpers::setup_fixtures();
        let root = tmp.path();

        assert!(get_page(root, "about", Locale::Es).contains("Acerca de"));
        assert!(get_page(root, "donate", Locale::Es).contains("Support the institute"));
        assert_eq!(get_page(root, "missing", Locale::Es), "");
        assert_eq!(page_slugs(root, ContentDirectory::Pages), vec!["about", "donate"]);
    }
}

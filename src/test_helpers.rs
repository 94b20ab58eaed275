//! Shared test utilities for the sni-site test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let (output, report) = build_fixture_site(tmp.path());
//! assert_page_contains(&output, "es/library/index.html", "Biblioteca");
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::api::FileContentApi;
use crate::config;
use crate::generate::{self, BuildReport};
use crate::i18n::Catalog;

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir_recursive(&fixtures_root(), tmp.path()).unwrap();
    tmp
}

/// The fixture site's translations (Spanish), read in place.
pub fn fixture_catalog() -> Catalog {
    Catalog::load(&fixtures_root().join("locales")).unwrap()
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Build the site from a fixture copy into `<root>/dist`.
pub fn build_fixture_site(root: &Path) -> (PathBuf, BuildReport) {
    let site_config = config::load_config(root).unwrap();
    let api = FileContentApi::new(site_config.data_path(root));
    let output = root.join("dist");
    let report = generate::generate(root, &output, &site_config, &api).unwrap();
    (output, report)
}

// =========================================================================
// Output assertions
// =========================================================================

/// Read a generated page. Panics if it was not written.
pub fn read_page(output: &Path, rel: &str) -> String {
    let path = output.join(rel);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("page '{}' not readable: {e}", path.display()))
}

/// Assert a generated page contains `needle`.
pub fn assert_page_contains(output: &Path, rel: &str, needle: &str) {
    let html = read_page(output, rel);
    assert!(
        html.contains(needle),
        "page '{rel}' does not contain {needle:?}"
    );
}

//! Locale-aware URL generation.
//!
//! Every page lives under its locale's tag:
//!
//! ```text
//! /en                                         Home
//! /en/library                                 Library index
//! /en/library/{slug}                          Library document
//! /en/mempool                                 Mempool (blog) index
//! /en/mempool/{slug}                          Mempool post
//! /en/mempool/series                          Series index
//! /en/mempool/series/{slug}                   Series detail
//! /en/satoshi/posts                           All forum posts
//! /en/satoshi/posts/{source}                  Posts from one forum
//! /en/satoshi/posts/threads                   All threads
//! /en/satoshi/posts/{source}/threads          Threads from one forum
//! /en/satoshi/posts/{source}/threads/{id}     One thread
//! /en/{slug}                                  Static page (about, donate, …)
//! ```
//!
//! URLs carry no trailing slash. [`output_path`] maps the same routes to the
//! files the generator writes, so a link and its target cannot disagree.

use crate::api::{ForumPostSource, Translation};
use crate::locale::Locale;
use std::path::PathBuf;

/// Logical identifier of a page, independent of locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    LibraryIndex,
    LibraryDoc { slug: String },
    MempoolIndex,
    MempoolPost { slug: String },
    MempoolSeriesIndex,
    MempoolSeriesDetail { slug: String },
    ForumPostsIndex,
    ForumPostSourceIndex { source: ForumPostSource },
    ForumThreadsIndex,
    ForumSourceThreadsIndex { source: ForumPostSource },
    ForumThreadDetail { source: ForumPostSource, id: u32 },
    Page { slug: String },
}

impl Route {
    /// Path below the locale prefix, without a leading slash. Empty for home.
    fn path(&self) -> String {
        match self {
            Route::Home => String::new(),
            Route::LibraryIndex => "library".to_string(),
            Route::LibraryDoc { slug } => format!("library/{slug}"),
            Route::MempoolIndex => "mempool".to_string(),
            Route::MempoolPost { slug } => format!("mempool/{slug}"),
            Route::MempoolSeriesIndex => "mempool/series".to_string(),
            Route::MempoolSeriesDetail { slug } => format!("mempool/series/{slug}"),
            Route::ForumPostsIndex => "satoshi/posts".to_string(),
            Route::ForumPostSourceIndex { source } => format!("satoshi/posts/{}", source.as_str()),
            Route::ForumThreadsIndex => "satoshi/posts/threads".to_string(),
            Route::ForumSourceThreadsIndex { source } => {
                format!("satoshi/posts/{}/threads", source.as_str())
            }
            Route::ForumThreadDetail { source, id } => {
                format!("satoshi/posts/{}/threads/{id}", source.as_str())
            }
            Route::Page { slug } => slug.clone(),
        }
    }
}

/// First path segments owned by site sections. A static page whose slug is
/// one of these would be written over the section's index.
pub const SECTION_SEGMENTS: [&str; 3] = ["library", "mempool", "satoshi"];

/// Whether `slug` collides with a section when used as a static page.
pub fn is_section_slug(slug: &str) -> bool {
    SECTION_SEGMENTS
        .iter()
        .any(|segment| segment.eq_ignore_ascii_case(slug))
}

/// Canonical URL of `route` in `locale`.
pub fn href(locale: Locale, route: &Route) -> String {
    let path = route.path();
    if path.is_empty() {
        format!("/{locale}")
    } else {
        format!("/{locale}/{path}")
    }
}

/// Apply `f` to each locale, producing alternate links.
///
/// Input order is preserved; a locale listed twice appears once, at its first
/// position.
pub fn href_langs<F>(locales: &[Locale], f: F) -> Vec<(Locale, String)>
where
    F: Fn(Locale) -> String,
{
    let mut out: Vec<(Locale, String)> = Vec::with_capacity(locales.len());
    for &locale in locales {
        if out.iter().any(|(l, _)| *l == locale) {
            continue;
        }
        out.push((locale, f(locale)));
    }
    out
}

/// Link to a translatable record in `locale`.
///
/// Uses the record's own slug for its own locale and the translated slug
/// where a translation exists. Otherwise links to `index` so that switching
/// language never lands on a missing page.
pub fn translated_href<D>(
    locale: Locale,
    record_locale: Locale,
    record_slug: &str,
    translations: &[Translation],
    detail: D,
    index: &Route,
) -> String
where
    D: Fn(String) -> Route,
{
    let slug = if locale == record_locale {
        Some(record_slug.to_string())
    } else {
        translations
            .iter()
            .find(|t| t.locale == locale)
            .map(|t| t.slug.clone())
    };
    match slug {
        Some(slug) => href(locale, &detail(slug)),
        None => href(locale, index),
    }
}

/// Output file for `route` in `locale`, relative to the site root.
pub fn output_path(locale: Locale, route: &Route) -> PathBuf {
    let url = href(locale, route);
    PathBuf::from(url.trim_start_matches('/')).join("index.html")
}

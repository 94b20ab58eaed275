//! Content records and the collaborator that supplies them.
//!
//! Library documents, mempool series, and forum threads come from a content
//! API. The site only consumes them, so the API is a trait: [`FileContentApi`]
//! reads JSON exports from disk, and tests plug in their own.
//!
//! ## Data Layout
//!
//! ```text
//! data/
//! ├── library/
//! │   ├── en.json              # [LibraryDoc] for one locale
//! │   └── es.json
//! ├── mempool/
//! │   └── series.json          # [SeriesDetail] across all locales
//! └── satoshi/
//!     ├── threads.json         # [ForumThread]
//!     └── posts.json           # [ForumPost]
//! ```
//!
//! A locale without a library file has an empty library. A file that exists
//! but does not parse is an error.

use crate::locale::Locale;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed records in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown forum source: {0}")]
pub struct UnknownSource(pub String);

/// Where a forum post or thread was originally published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForumPostSource {
    P2pfoundation,
    Bitcointalk,
}

impl ForumPostSource {
    /// Declaration order, which is also display order on index pages.
    pub const ALL: [ForumPostSource; 2] =
        [ForumPostSource::P2pfoundation, ForumPostSource::Bitcointalk];

    /// Path segment, e.g. `bitcointalk`.
    pub fn as_str(self) -> &'static str {
        match self {
            ForumPostSource::P2pfoundation => "p2pfoundation",
            ForumPostSource::Bitcointalk => "bitcointalk",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ForumPostSource::P2pfoundation => "P2P Foundation",
            ForumPostSource::Bitcointalk => "BitcoinTalk",
        }
    }
}

impl FromStr for ForumPostSource {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ForumPostSource::ALL
            .into_iter()
            .find(|src| src.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSource(s.to_string()))
    }
}

/// A record's slug in another locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub locale: Locale,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryDoc {
    pub slug: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub translations: Vec<Translation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    pub slug: String,
    pub title: String,
    pub locale: Locale,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub translations: Vec<Translation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MempoolPost {
    pub slug: String,
    pub title: String,
    pub date: NaiveDate,
}

/// A series together with its posts, in one locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesDetail {
    pub series: Series,
    #[serde(default)]
    pub posts: Vec<MempoolPost>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumThread {
    pub id: u32,
    pub title: String,
    pub date: NaiveDate,
    pub source: ForumPostSource,
}

/// One archived forum post. `thread_id` names a [`ForumThread`] of the same
/// source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: u32,
    pub thread_id: u32,
    pub source: ForumPostSource,
    pub subject: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub text: String,
}

/// Supplier of the records pages are rendered from.
///
/// Implementations must be shareable across the locale workers.
pub trait ContentApi: Sync {
    /// Library documents available in `locale`.
    fn library_docs(&self, locale: Locale) -> Result<Vec<LibraryDoc>, ApiError>;

    /// The series with `slug` in `locale`, if it exists there.
    fn mempool_series(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<SeriesDetail>, ApiError>;

    /// Every `(locale, slug)` pair a series detail page exists for.
    fn mempool_series_params(&self) -> Result<Vec<(Locale, String)>, ApiError>;

    /// Every series published in `locale`, in export order.
    fn mempool_series_in(&self, locale: Locale) -> Result<Vec<SeriesDetail>, ApiError> {
        let mut out = Vec::new();
        for (_, slug) in self
            .mempool_series_params()?
            .into_iter()
            .filter(|(l, _)| *l == locale)
        {
            out.extend(self.mempool_series(&slug, locale)?);
        }
        Ok(out)
    }

    /// All forum threads, in source order.
    fn forum_threads(&self) -> Result<Vec<ForumThread>, ApiError>;

    /// All archived forum posts, in source order.
    fn forum_posts(&self) -> Result<Vec<ForumPost>, ApiError>;
}

/// [`ContentApi`] over JSON exports in a data directory.
#[derive(Debug, Clone)]
pub struct FileContentApi {
    root: PathBuf,
}

impl FileContentApi {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Parse a JSON array, treating a missing file as empty.
    fn read_records<T: DeserializeOwned>(&self, rel: &Path) -> Result<Vec<T>, ApiError> {
        let path = self.root.join(rel);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no records file");
                return Ok(Vec::new());
            }
            Err(source) => return Err(ApiError::Io { path, source }),
        };
        serde_json::from_str(&text).map_err(|source| ApiError::Json { path, source })
    }

    fn all_series(&self) -> Result<Vec<SeriesDetail>, ApiError> {
        self.read_records(Path::new("mempool/series.json"))
    }
}

impl ContentApi for FileContentApi {
    fn library_docs(&self, locale: Locale) -> Result<Vec<LibraryDoc>, ApiError> {
        let rel = Path::new("library").join(format!("{locale}.json"));
        let mut docs: Vec<LibraryDoc> = self.read_records(&rel)?;
        docs.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));
        Ok(docs)
    }

    fn mempool_series(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<SeriesDetail>, ApiError> {
        Ok(self
            .all_series()?
            .into_iter()
            .find(|d| d.series.slug == slug && d.series.locale == locale))
    }

    fn mempool_series_params(&self) -> Result<Vec<(Locale, String)>, ApiError> {
        Ok(self
            .all_series()?
            .into_iter()
            .map(|d| (d.series.locale, d.series.slug))
            .collect())
    }

    fn mempool_series_in(&self, locale: Locale) -> Result<Vec<SeriesDetail>, ApiError> {
        let mut series = self.all_series()?;
        series.retain(|d| d.series.locale == locale);
        Ok(series)
    }

    fn forum_threads(&self) -> Result<Vec<ForumThread>, ApiError> {
        self.read_records(Path::new("satoshi/threads.json"))
    }

    fn forum_posts(&self) -> Result<Vec<ForumPost>, ApiError> {
        self.read_records(Path::new("satoshi/posts.json"))
    }
}

/// Group records by the forum they came from.
///
/// One group per [`ForumPostSource`] in declaration order, present even when
/// empty. Records keep their input order within a group.
pub fn group_by_source<T, F>(items: Vec<T>, source: F) -> Vec<(ForumPostSource, Vec<T>)>
where
    F: Fn(&T) -> ForumPostSource,
{
    let mut groups: Vec<(ForumPostSource, Vec<T>)> = ForumPostSource::ALL
        .into_iter()
        .map(|s| (s, Vec::new()))
        .collect();
    for item in items {
        let key = source(&item);
        if let Some((_, group)) = groups.iter_mut().find(|(s, _)| *s == key) {
            group.push(item);
        }
    }
    groups
}

pub fn group_threads_by_source(
    threads: Vec<ForumThread>,
) -> Vec<(ForumPostSource, Vec<ForumThread>)> {
    group_by_source(threads, |t| t.source)
}

pub fn group_posts_by_source(posts: Vec<ForumPost>) -> Vec<(ForumPostSource, Vec<ForumPost>)> {
    group_by_source(posts, |p| p.source)
}

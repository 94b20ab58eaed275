//! Site generation.
//!
//! Renders every page of the site once per enabled locale and writes it to
//! the output directory at the path its URL names.
//!
//! ## Generated Pages
//!
//! For each locale `L`:
//!
//! - **Home** (`/L/index.html`)
//! - **Library** (`/L/library/index.html`): documents available in `L`
//! - **Series index** (`/L/mempool/series/index.html`)
//! - **Series detail** (`/L/mempool/series/{slug}/index.html`): one per series
//!   published in `L`
//! - **Forum threads** (`/L/satoshi/posts/threads/index.html`), one thread
//!   list per source, and one page per archived thread
//! - **Forum posts** (`/L/satoshi/posts/index.html`) and one post list per
//!   source
//! - **Static pages** (`/L/{slug}/index.html`): every markdown page of the
//!   default locale, translated where a translation exists
//!
//! Plus `/index.html` (forwards to the default locale) and `/style.css`.
//!
//! Library documents and mempool posts are listed by title only; their own
//! pages are not part of this site.
//!
//! ## Parallelism
//!
//! Locales are independent of each other, so they render on a rayon pool
//! sized by `processing.max_processes`. Shared inputs (translations, threads,
//! posts) are loaded once up front and only read by the workers.

use crate::api::{self, ApiError, ContentApi, ForumPost, ForumPostSource, ForumThread};
use crate::config::{self, SiteConfig};
use crate::content::{self, ContentDirectory};
use crate::i18n::{Catalog, I18nError, MESSAGE_IDS, RenderContext};
use crate::locale::Locale;
use crate::markdown;
use crate::render;
use crate::urls::{self, Route};
use maud::Markup;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Content API error: {0}")]
    Api(#[from] ApiError),
    #[error("Translation error: {0}")]
    I18n(#[from] I18nError),
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Static page '{0}' has the name of a site section; rename pages/{default}/{0}.md", default = Locale::DEFAULT)]
    SectionSlug(String),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Pages written for one locale.
#[derive(Debug, Clone)]
pub struct LocaleReport {
    pub locale: Locale,
    /// Written files, relative to the output directory, in render order.
    pub pages: Vec<PathBuf>,
    /// Static page slugs shown in the default locale's text.
    pub untranslated: Vec<String>,
}

/// Result of a full site build, locales in configured order.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub locales: Vec<LocaleReport>,
}

impl BuildReport {
    pub fn total_pages(&self) -> usize {
        self.locales.iter().map(|l| l.pages.len()).sum()
    }
}

/// What a build would produce, without writing anything.
#[derive(Debug, Clone)]
pub struct Inventory {
    pub page_slugs: Vec<String>,
    pub thread_count: usize,
    pub post_count: usize,
    /// Messages the templates use; the denominator of `translated_messages`.
    pub message_count: usize,
    pub locales: Vec<LocaleInventory>,
}

#[derive(Debug, Clone)]
pub struct LocaleInventory {
    pub locale: Locale,
    pub library_docs: usize,
    pub series: usize,
    pub translated_messages: usize,
    pub translated_pages: usize,
}

/// Inputs shared read-only by every locale worker.
struct SiteData<'a> {
    content_root: &'a Path,
    config: &'a SiteConfig,
    api: &'a dyn ContentApi,
    catalog: Catalog,
    threads: Vec<ForumThread>,
    thread_groups: Vec<(ForumPostSource, Vec<ForumThread>)>,
    post_groups: Vec<(ForumPostSource, Vec<ForumPost>)>,
    page_slugs: Vec<String>,
}

impl<'a> SiteData<'a> {
    fn load(
        content_root: &'a Path,
        config: &'a SiteConfig,
        api: &'a dyn ContentApi,
    ) -> Result<Self, GenerateError> {
        let page_slugs = content::page_slugs(content_root, ContentDirectory::Pages);
        if let Some(slug) = page_slugs.iter().find(|slug| urls::is_section_slug(slug)) {
            return Err(GenerateError::SectionSlug(slug.clone()));
        }
        let threads = api.forum_threads()?;
        Ok(Self {
            content_root,
            config,
            api,
            catalog: Catalog::load(&config.locales_path(content_root))?,
            thread_groups: api::group_threads_by_source(threads.clone()),
            post_groups: api::group_posts_by_source(api.forum_posts()?),
            threads,
            page_slugs,
        })
    }

    /// Whether `locale` shows its own text for `slug`. Mirrors
    /// [`content::resolve`]: an unreadable or empty file falls back.
    fn is_translated(&self, slug: &str, locale: Locale) -> bool {
        locale.is_default()
            || content::read_directory_file(self.content_root, ContentDirectory::Pages, slug, locale)
                .is_some_and(|text| !text.is_empty())
    }

    fn posts_in_thread(&self, thread: &ForumThread) -> Vec<ForumPost> {
        self.post_groups
            .iter()
            .filter(|(source, _)| *source == thread.source)
            .flat_map(|(_, posts)| posts)
            .filter(|post| post.thread_id == thread.id)
            .cloned()
            .collect()
    }
}

/// Build the whole site into `output_dir`.
pub fn generate(
    content_root: &Path,
    output_dir: &Path,
    config: &SiteConfig,
    api: &dyn ContentApi,
) -> Result<BuildReport, GenerateError> {
    let data = SiteData::load(content_root, config, api)?;

    fs::create_dir_all(output_dir)?;
    let css = format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC);
    fs::write(output_dir.join("style.css"), css)?;
    let redirect = render::render_root_redirect(Locale::DEFAULT);
    fs::write(output_dir.join("index.html"), redirect.into_string())?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config::effective_threads(&config.processing))
        .build()?;

    let locales = pool.install(|| {
        config
            .locales
            .enabled
            .par_iter()
            .map(|&locale| generate_locale(&data, locale, output_dir))
            .collect::<Result<Vec<_>, _>>()
    })?;

    info!(
        pages = locales.iter().map(|l| l.pages.len()).sum::<usize>(),
        output = %output_dir.display(),
        "site generated"
    );
    Ok(BuildReport { locales })
}

fn generate_locale(
    data: &SiteData,
    locale: Locale,
    output_dir: &Path,
) -> Result<LocaleReport, GenerateError> {
    let ctx = RenderContext::new(
        data.catalog.translator(locale),
        data.config,
        &data.config.locales.enabled,
    );
    let mut report = LocaleReport {
        locale,
        pages: Vec::new(),
        untranslated: Vec::new(),
    };
    let mut write = |route: Route, markup: Markup| -> Result<(), GenerateError> {
        report.pages.push(write_page(output_dir, locale, &route, markup)?);
        Ok(())
    };

    // Static pages first: the home page lists their titles.
    let mut static_pages = Vec::new();
    let mut untranslated = Vec::new();
    for slug in &data.page_slugs {
        let raw = content::get_page(data.content_root, slug, locale);
        if !data.is_translated(slug, locale) {
            untranslated.push(slug.clone());
        }
        let (front_matter, body) = markdown::parse_front_matter(&raw);
        let title = markdown::page_title(front_matter.as_ref(), &body, slug);
        write(
            Route::Page { slug: slug.clone() },
            render::render_static_page(&ctx, slug, &raw),
        )?;
        static_pages.push((slug.clone(), title));
    }

    write(Route::Home, render::render_home(&ctx, &static_pages))?;

    let docs = data.api.library_docs(locale)?;
    write(Route::LibraryIndex, render::render_library_index(&ctx, &docs))?;

    let series = data.api.mempool_series_in(locale)?;
    let series_list: Vec<_> = series.iter().map(|d| d.series.clone()).collect();
    write(
        Route::MempoolSeriesIndex,
        render::render_series_index(&ctx, &series_list),
    )?;
    for detail in &series {
        write(
            Route::MempoolSeriesDetail {
                slug: detail.series.slug.clone(),
            },
            render::render_series_detail(&ctx, detail),
        )?;
    }

    write(
        Route::ForumThreadsIndex,
        render::render_threads_index(&ctx, &data.thread_groups),
    )?;
    for (source, threads) in &data.thread_groups {
        write(
            Route::ForumSourceThreadsIndex { source: *source },
            render::render_source_threads_index(&ctx, *source, threads),
        )?;
    }
    for thread in &data.threads {
        write(
            Route::ForumThreadDetail {
                source: thread.source,
                id: thread.id,
            },
            render::render_thread_detail(&ctx, thread, &data.posts_in_thread(thread)),
        )?;
    }

    write(
        Route::ForumPostsIndex,
        render::render_posts_index(&ctx, &data.post_groups, &data.threads),
    )?;
    for (source, posts) in &data.post_groups {
        write(
            Route::ForumPostSourceIndex { source: *source },
            render::render_source_posts_index(&ctx, *source, posts, &data.threads),
        )?;
    }

    report.untranslated = untranslated;
    debug!(locale = %locale, pages = report.pages.len(), "locale rendered");
    Ok(report)
}

/// Write a rendered page at its route's output path; returns that path.
fn write_page(
    output_dir: &Path,
    locale: Locale,
    route: &Route,
    markup: Markup,
) -> Result<PathBuf, GenerateError> {
    let rel = urls::output_path(locale, route);
    let path = output_dir.join(&rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, markup.into_string())?;
    Ok(rel)
}

/// Load every input a build reads and summarize it.
pub fn check(
    content_root: &Path,
    config: &SiteConfig,
    api: &dyn ContentApi,
) -> Result<Inventory, GenerateError> {
    let data = SiteData::load(content_root, config, api)?;
    let mut locales = Vec::new();
    for &locale in &config.locales.enabled {
        locales.push(LocaleInventory {
            locale,
            library_docs: api.library_docs(locale)?.len(),
            series: api.mempool_series_in(locale)?.len(),
            translated_messages: data.catalog.translated_count(locale),
            translated_pages: data
                .page_slugs
                .iter()
                .filter(|slug| data.is_translated(slug, locale))
                .count(),
        });
    }
    Ok(Inventory {
        thread_count: data.threads.len(),
        post_count: data.post_groups.iter().map(|(_, p)| p.len()).sum(),
        message_count: MESSAGE_IDS.len(),
        page_slugs: data.page_slugs,
        locales,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{LibraryDoc, MempoolPost, Series, SeriesDetail, Translation};
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// In-memory content API.
    #[derive(Default)]
    struct StubApi {
        docs: HashMap<Locale, Vec<LibraryDoc>>,
        series: Vec<SeriesDetail>,
        threads: Vec<ForumThread>,
        posts: Vec<ForumPost>,
    }

    impl ContentApi for StubApi {
        fn library_docs(&self, locale: Locale) -> Result<Vec<LibraryDoc>, ApiError> {
            Ok(self.docs.get(&locale).cloned().unwrap_or_default())
        }

        fn mempool_series(
            &self,
            slug: &str,
            locale: Locale,
        ) -> Result<Option<SeriesDetail>, ApiError> {
            Ok(self
                .series
                .iter()
                .find(|d| d.series.slug == slug && d.series.locale == locale)
                .cloned())
        }

        fn mempool_series_params(&self) -> Result<Vec<(Locale, String)>, ApiError> {
            Ok(self
                .series
                .iter()
                .map(|d| (d.series.locale, d.series.slug.clone()))
                .collect())
        }

        fn forum_threads(&self) -> Result<Vec<ForumThread>, ApiError> {
            Ok(self.threads.clone())
        }

        fn forum_posts(&self) -> Result<Vec<ForumPost>, ApiError> {
            Ok(self.posts.clone())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stub_api() -> StubApi {
        let mut docs = HashMap::new();
        docs.insert(
            Locale::En,
            vec![LibraryDoc {
                slug: "bitcoin".to_string(),
                title: "Bitcoin: A Peer-to-Peer Electronic Cash System".to_string(),
                date: date(2008, 10, 31),
                source: None,
                translations: vec![],
            }],
        );
        StubApi {
            docs,
            series: vec![
                SeriesDetail {
                    series: Series {
                        slug: "gold".to_string(),
                        title: "Gold".to_string(),
                        locale: Locale::En,
                        translations: vec![Translation {
                            locale: Locale::Es,
                            slug: "oro".to_string(),
                        }],
                    },
                    posts: vec![MempoolPost {
                        slug: "gold-1".to_string(),
                        title: "Gold, part 1".to_string(),
                        date: date(2021, 3, 1),
                    }],
                },
                SeriesDetail {
                    series: Series {
                        slug: "oro".to_string(),
                        title: "Oro".to_string(),
                        locale: Locale::Es,
                        translations: vec![],
                    },
                    posts: vec![],
                },
            ],
            threads: vec![ForumThread {
                id: 1,
                title: "Bitcoin open source implementation of P2P currency".to_string(),
                date: date(2009, 2, 11),
                source: ForumPostSource::P2pfoundation,
            }],
            posts: vec![ForumPost {
                id: 1,
                thread_id: 1,
                source: ForumPostSource::P2pfoundation,
                subject: "Bitcoin open source implementation of P2P currency".to_string(),
                date: date(2009, 2, 11),
                text: "I've developed a new open source P2P e-cash system.".to_string(),
            }],
        }
    }

    fn two_locale_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.locales.enabled = vec![Locale::En, Locale::Es];
        config.processing.max_processes = Some(2);
        config
    }

    fn content_with_about(root: &Path) {
        let en = root.join("pages/en");
        fs::create_dir_all(&en).unwrap();
        fs::write(en.join("about.md"), "# About\n\nEnglish text.").unwrap();
    }

    #[test]
    fn generate_writes_every_locale() {
        let content = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        content_with_about(content.path());
        let config = two_locale_config();

        let report = generate(content.path(), out.path(), &config, &stub_api()).unwrap();

        assert_eq!(report.locales.len(), 2);
        assert_eq!(report.locales[0].locale, Locale::En);
        assert_eq!(report.locales[1].locale, Locale::Es);
        for locale in ["en", "es"] {
            for page in [
                "index.html",
                "about/index.html",
                "library/index.html",
                "mempool/series/index.html",
                "satoshi/posts/threads/index.html",
                "satoshi/posts/p2pfoundation/threads/index.html",
                "satoshi/posts/bitcointalk/threads/index.html",
                "satoshi/posts/p2pfoundation/threads/1/index.html",
                "satoshi/posts/index.html",
                "satoshi/posts/p2pfoundation/index.html",
                "satoshi/posts/bitcointalk/index.html",
            ] {
                let path = out.path().join(locale).join(page);
                assert!(path.is_file(), "missing {}", path.display());
            }
        }
        assert!(out.path().join("en/mempool/series/gold/index.html").is_file());
        assert!(out.path().join("es/mempool/series/oro/index.html").is_file());
        assert!(!out.path().join("es/mempool/series/gold").exists());
        assert!(out.path().join("style.css").is_file());
        assert!(out.path().join("index.html").is_file());
    }

    #[test]
    fn report_counts_pages_and_untranslated() {
        let content = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        content_with_about(content.path());
        let config = two_locale_config();

        let report = generate(content.path(), out.path(), &config, &stub_api()).unwrap();

        // about, home, library, series index, 1 series, threads + 2 sources,
        // 1 thread, posts + 2 sources
        assert_eq!(report.locales[0].pages.len(), 12);
        assert_eq!(report.locales[1].pages.len(), 12);
        assert_eq!(report.total_pages(), 24);
        assert!(report.locales[0].untranslated.is_empty());
        assert_eq!(report.locales[1].untranslated, vec!["about"]);
    }

    #[test]
    fn untranslated_page_shows_default_text() {
        let content = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        content_with_about(content.path());
        let config = two_locale_config();

        generate(content.path(), out.path(), &config, &stub_api()).unwrap();

        let html = fs::read_to_string(out.path().join("es/about/index.html")).unwrap();
        assert!(html.contains("English text."));
        assert!(html.contains(r#"lang="es""#));
    }

    #[test]
    fn stylesheet_includes_config_colors() {
        let content = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let mut config = two_locale_config();
        config.colors.light.link = "#abcdef".to_string();

        generate(content.path(), out.path(), &config, &stub_api()).unwrap();

        let css = fs::read_to_string(out.path().join("style.css")).unwrap();
        assert!(css.contains("--color-link: #abcdef;"));
        assert!(css.contains(".site-header"));
    }

    #[test]
    fn empty_translation_counts_as_untranslated() {
        let content = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        content_with_about(content.path());
        let es = content.path().join("pages/es");
        fs::create_dir_all(&es).unwrap();
        fs::write(es.join("about.md"), "").unwrap();

        let report = generate(content.path(), out.path(), &two_locale_config(), &stub_api()).unwrap();

        assert_eq!(report.locales[1].untranslated, vec!["about"]);
        let html = fs::read_to_string(out.path().join("es/about/index.html")).unwrap();
        assert!(html.contains("English text."));

        let inventory = check(content.path(), &two_locale_config(), &stub_api()).unwrap();
        assert_eq!(inventory.locales[1].translated_pages, 0);
    }

    #[test]
    fn static_page_named_after_section_is_rejected() {
        let content = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        content_with_about(content.path());
        fs::write(content.path().join("pages/en/library.md"), "# Library\n").unwrap();

        let result = generate(content.path(), out.path(), &two_locale_config(), &stub_api());
        assert!(matches!(result, Err(GenerateError::SectionSlug(ref slug)) if slug == "library"));
        assert!(!out.path().join("en/library/index.html").exists());

        let result = check(content.path(), &two_locale_config(), &stub_api());
        assert!(matches!(result, Err(GenerateError::SectionSlug(_))));
    }

    #[test]
    fn thread_page_holds_its_posts() {
        let content = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        generate(content.path(), out.path(), &two_locale_config(), &stub_api()).unwrap();

        let html = fs::read_to_string(
            out.path().join("es/satoshi/posts/p2pfoundation/threads/1/index.html"),
        )
        .unwrap();
        assert!(html.contains(r#"id="post-1""#));
        assert!(html.contains("new open source P2P e-cash system"));
    }

    #[test]
    fn check_summarizes_inputs() {
        let content = TempDir::new().unwrap();
        content_with_about(content.path());
        let es = content.path().join("locales/es");
        fs::create_dir_all(&es).unwrap();
        fs::write(es.join("site.ftl"), "nav-library = Biblioteca\n").unwrap();

        let inventory = check(content.path(), &two_locale_config(), &stub_api()).unwrap();

        assert_eq!(inventory.page_slugs, vec!["about"]);
        assert_eq!(inventory.thread_count, 1);
        assert_eq!(inventory.post_count, 1);
        assert_eq!(inventory.message_count, MESSAGE_IDS.len());
        let en = &inventory.locales[0];
        assert_eq!((en.library_docs, en.series, en.translated_pages), (1, 1, 1));
        let es = &inventory.locales[1];
        assert_eq!(
            (es.library_docs, es.series, es.translated_messages, es.translated_pages),
            (0, 1, 1, 0)
        );
    }

    #[test]
    fn fixture_site_builds_every_enabled_locale() {
        use crate::test_helpers::*;

        let tmp = setup_fixtures();
        let (output, report) = build_fixture_site(tmp.path());

        let locales: Vec<Locale> = report.locales.iter().map(|l| l.locale).collect();
        assert_eq!(locales, vec![Locale::En, Locale::Es, Locale::Fa]);
        assert_eq!(report.locales[1].untranslated, vec!["donate"]);
        assert_page_contains(&output, "es/satoshi/posts/index.html", "Publicaciones del foro");
        assert_page_contains(&output, "es/library/index.html", "Biblioteca");
        assert_page_contains(&output, "fa/index.html", r#"dir="rtl""#);
    }
}

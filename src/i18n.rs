//! Interface translations and the per-render context.
//!
//! UI strings are Fluent messages. The English text ships inside the binary
//! from `locales/en/site.ftl`; a site adds languages, or rewords English, with
//! FTL files in its own locales directory:
//!
//! ```text
//! content/locales/
//! ├── es/
//! │   └── site.ftl      nav-library = Biblioteca
//! └── fr/
//!     └── site.ftl
//! ```
//!
//! A message is looked up in the site's files for the page locale, then the
//! site's English, then the built-in English, and finally renders as its own
//! id. A site without a locales directory renders entirely in built-in English.
//!
//! There is no global translator. Each render receives a [`RenderContext`]
//! carrying its locale and catalog.

use crate::config::SiteConfig;
use crate::locale::Locale;
use fluent_templates::fluent_bundle::FluentValue;
use fluent_templates::{ArcLoader, LanguageIdentifier, Loader, static_loader};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use unic_langid::langid;

static_loader! {
    static BUILTIN = {
        locales: "./locales",
        fallback_language: "en",
        customise: |bundle| bundle.set_use_isolating(false),
    };
}

/// Every message id the page templates use.
pub const MESSAGE_IDS: &[&str] = &[
    "nav-library",
    "nav-mempool-series",
    "nav-forum-threads",
    "nav-forum-posts",
    "library-intro",
    "library-empty",
    "series-empty",
    "series-no-posts",
    "view-posts",
    "view-threads",
    "posts",
    "threads",
    "all-threads",
    "all-posts",
    "source-threads",
    "source-posts",
    "posts-empty",
    "in-thread",
    "page-unavailable-title",
    "page-unavailable",
    "month-january",
    "month-february",
    "month-march",
    "month-april",
    "month-may",
    "month-june",
    "month-july",
    "month-august",
    "month-september",
    "month-october",
    "month-november",
    "month-december",
];

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("Failed to load translations from {path}: {message}")]
    Load { path: PathBuf, message: String },
}

fn language_id(locale: Locale) -> LanguageIdentifier {
    match locale {
        Locale::En => langid!("en"),
        Locale::Ar => langid!("ar"),
        Locale::De => langid!("de"),
        Locale::Es => langid!("es"),
        Locale::Fa => langid!("fa"),
        Locale::Fi => langid!("fi"),
        Locale::Fr => langid!("fr"),
        Locale::He => langid!("he"),
        Locale::Hi => langid!("hi"),
        Locale::It => langid!("it"),
        Locale::Ja => langid!("ja"),
        Locale::Ko => langid!("ko"),
        Locale::Pt => langid!("pt"),
        Locale::Ru => langid!("ru"),
        Locale::Tr => langid!("tr"),
        Locale::Zh => langid!("zh"),
    }
}

/// Fluent arguments keyed by placeable name.
pub type Args<'a> = HashMap<Cow<'static, str>, FluentValue<'a>>;

/// The site's own FTL files, if it has any.
pub struct Catalog {
    site: Option<ArcLoader>,
}

impl Catalog {
    /// A catalog with only the built-in English messages.
    pub fn builtin() -> Self {
        Self { site: None }
    }

    /// Load `<dir>/<locale>/*.ftl`. A missing directory yields
    /// [`Catalog::builtin`].
    pub fn load(dir: &Path) -> Result<Self, I18nError> {
        if !dir.is_dir() {
            debug!(path = %dir.display(), "no translations directory");
            return Ok(Self::builtin());
        }
        // `und` has no bundle, so a site lookup never leaves the locale asked
        // for; the English fallback is explicit in `Translator::lookup`.
        let site = ArcLoader::builder(dir, langid!("und"))
            .customize(|bundle| bundle.set_use_isolating(false))
            .build()
            .map_err(|e| I18nError::Load {
                path: dir.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self { site: Some(site) })
    }

    pub fn translator(&self, locale: Locale) -> Translator<'_> {
        Translator {
            locale,
            site: self.site.as_ref(),
        }
    }

    /// How many of [`MESSAGE_IDS`] the site translates into `locale` itself.
    pub fn translated_count(&self, locale: Locale) -> usize {
        let Some(site) = &self.site else {
            return 0;
        };
        let lang = language_id(locale);
        let no_args = Args::new();
        MESSAGE_IDS
            .iter()
            .filter(|id| site.try_lookup_with_args(&lang, id, &no_args).is_some())
            .count()
    }
}

/// Message lookup for one locale.
#[derive(Clone, Copy)]
pub struct Translator<'a> {
    locale: Locale,
    site: Option<&'a ArcLoader>,
}

impl<'a> Translator<'a> {
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Translate message `id`, or return the id when no catalog has it.
    pub fn t(&self, id: &str) -> String {
        self.lookup(id, &Args::new())
    }

    /// Translate message `id`, filling its `{ $name }` placeables.
    pub fn t_with(&self, id: &str, args: &[(&'static str, &str)]) -> String {
        let args: Args = args
            .iter()
            .map(|&(name, value)| (Cow::Borrowed(name), FluentValue::from(value)))
            .collect();
        self.lookup(id, &args)
    }

    fn lookup(&self, id: &str, args: &Args) -> String {
        let lang = language_id(self.locale);
        let default = language_id(Locale::DEFAULT);
        self.site
            .and_then(|site| {
                site.try_lookup_with_args(&lang, id, args)
                    .or_else(|| site.try_lookup_with_args(&default, id, args))
            })
            .or_else(|| BUILTIN.try_lookup_with_args(&default, id, args))
            .unwrap_or_else(|| {
                debug!(locale = %self.locale, id, "untranslated message");
                id.to_string()
            })
    }
}

/// Everything a page renderer needs besides its records.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub locale: Locale,
    pub translator: Translator<'a>,
    pub config: &'a SiteConfig,
    /// Locales the site is generated in; alternates and the language
    /// switcher list exactly these.
    pub locales: &'a [Locale],
}

impl<'a> RenderContext<'a> {
    pub fn new(translator: Translator<'a>, config: &'a SiteConfig, locales: &'a [Locale]) -> Self {
        Self {
            locale: translator.locale(),
            translator,
            config,
            locales,
        }
    }

    pub fn t(&self, id: &str) -> String {
        self.translator.t(id)
    }

    pub fn t_with(&self, id: &str, args: &[(&'static str, &str)]) -> String {
        self.translator.t_with(id, args)
    }
}

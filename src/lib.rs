//! # sni-site
//!
//! A static site generator for a multilingual content site: a library of
//! documents, blog series, a mirror of forum threads, and translated static
//! pages. Every page is generated once per enabled locale under `/<locale>/`.
//!
//! # Architecture
//!
//! ```text
//! config.toml ───────────┐
//! locales/<locale>/*.ftl ┼──► RenderContext ──┐
//! data/*.json ───────────┴──► ContentApi ─────┼──► render (maud) ──► dist/<locale>/…/index.html
//! pages/<locale>/*.md ──► content ────────────┘
//! ```
//!
//! Two pieces carry the localization logic; everything else is templating:
//!
//! - **Content resolution** ([`content`]): `pages/<locale>/<slug>.md`, falling
//!   back to the default locale, degrading to an empty string when no locale
//!   has the page.
//! - **Link building** ([`urls`]): a pure mapping from `(locale, route)` to a
//!   URL, plus the alternate-language link sets every page advertises.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`locale`] | The closed set of supported locales; English is the default |
//! | [`content`] | Localized markdown lookup with default-locale fallback |
//! | [`urls`] | Route descriptors, URL building, alternates, output paths |
//! | [`api`] | Content records, the `ContentApi` seam, JSON-file implementation |
//! | [`i18n`] | Fluent message catalog and the per-render `RenderContext` |
//! | [`markdown`] | Front matter, page titles, markdown → HTML |
//! | [`dates`] | Localized date display |
//! | [`render`] | Maud page templates |
//! | [`generate`] | Renders every locale in parallel and writes the site |
//! | [`config`] | `config.toml` loading, validation, and color CSS |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Render Context
//!
//! There is no process-wide translator. Each render call receives a
//! [`i18n::RenderContext`] holding its locale and message catalog, so a
//! locale is a plain value and locales render concurrently without shared
//! mutable state.
//!
//! ## One Failure Kind for Content
//!
//! A static page that cannot be read in the requested or the default locale
//! renders a "not available in this language" notice. Read errors are not
//! surfaced to callers; they are logged at `debug` level with their cause.
//!
//! ## Links Never Dead-End on Language Switch
//!
//! Records that only exist in some languages (a translated series with its
//! own slug) advertise their translation where there is one and the
//! section index everywhere else. Records whose pages the site does not
//! generate (library documents, mempool posts) are listed without links.

pub mod api;
pub mod config;
pub mod content;
pub mod dates;
pub mod generate;
pub mod i18n;
pub mod locale;
pub mod markdown;
pub mod output;
pub mod render;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_helpers;

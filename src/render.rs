//! HTML page templates.
//!
//! Every renderer takes a [`RenderContext`] (locale, translations, config)
//! plus the records it displays, and returns [`Markup`]. Renderers do no I/O;
//! [`crate::generate`] fetches records and writes the results.
//!
//! Each page declares how it is reached in other languages. Most pages exist
//! in every locale, so their alternates are `href_langs` over the same route.
//! A series detail page only exists where the series is translated, and its
//! alternates fall back to the series index elsewhere.

use crate::api::{ForumPost, ForumPostSource, ForumThread, LibraryDoc, Series, SeriesDetail};
use crate::dates::format_date;
use crate::i18n::RenderContext;
use crate::locale::Locale;
use crate::markdown;
use crate::urls::{Route, href, href_langs, translated_href};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Alternate URL of the current page for each enabled locale.
pub type Alternates = Vec<(Locale, String)>;

/// Alternates for a page that exists at `route` in every locale.
pub fn route_alternates(ctx: &RenderContext, route: &Route) -> Alternates {
    href_langs(ctx.locales, |l| href(l, route))
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
pub fn base_document(
    ctx: &RenderContext,
    title: &str,
    alternates: &[(Locale, String)],
    content: Markup,
) -> Markup {
    let full_title = if title.is_empty() {
        ctx.config.site_title.clone()
    } else {
        format!("{} | {}", title, ctx.config.site_title)
    };
    html! {
        (DOCTYPE)
        html lang=(ctx.locale.as_str()) dir=(ctx.locale.direction().as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                link rel="stylesheet" href="/style.css";
                @for (locale, url) in alternates {
                    link rel="alternate" hreflang=(locale.as_str()) href=(url);
                }
            }
            body {
                (site_header(ctx, alternates))
                (content)
            }
        }
    }
}

/// Renders the site header: brand, section nav, language switcher
fn site_header(ctx: &RenderContext, alternates: &[(Locale, String)]) -> Markup {
    let locale = ctx.locale;
    html! {
        header.site-header {
            a.brand href=(href(locale, &Route::Home)) { (ctx.config.site_title) }
            nav.site-nav {
                ul {
                    li { a href=(href(locale, &Route::LibraryIndex)) { (ctx.t("nav-library")) } }
                    li { a href=(href(locale, &Route::MempoolSeriesIndex)) { (ctx.t("nav-mempool-series")) } }
                    li { a href=(href(locale, &Route::ForumThreadsIndex)) { (ctx.t("nav-forum-threads")) } }
                }
            }
            (language_switcher(locale, alternates))
        }
    }
}

/// Renders links to the current page in every other language
fn language_switcher(current: Locale, alternates: &[(Locale, String)]) -> Markup {
    html! {
        @if alternates.len() > 1 {
            nav.language-switcher {
                ul {
                    @for (locale, url) in alternates {
                        @let is_current = *locale == current;
                        li class=[is_current.then_some("current")] {
                            a href=(url) hreflang=(locale.as_str()) lang=(locale.as_str()) {
                                (locale.native_name())
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders a page heading with optional intro content
fn page_header(title: &str, intro: Option<Markup>) -> Markup {
    html! {
        header.page-header {
            h1 { (title) }
            @if let Some(intro) = intro {
                div.page-intro { (intro) }
            }
        }
    }
}

/// A main link with an optional secondary link, as used in index nav bars.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub text: String,
    pub href: String,
    pub sublink: Option<Box<NavLink>>,
}

fn render_nav_links(links: &[NavLink]) -> Markup {
    html! {
        nav.index-nav {
            ul {
                @for link in links {
                    li {
                        a href=(link.href) { (link.text) }
                        @if let Some(sub) = &link.sublink {
                            " "
                            a.sublink href=(sub.href) { "(" (sub.text) ")" }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the locale home page
pub fn render_home(ctx: &RenderContext, static_pages: &[(String, String)]) -> Markup {
    let locale = ctx.locale;
    let alternates = route_alternates(ctx, &Route::Home);
    let content = html! {
        main.home-page {
            (page_header(&ctx.config.site_title, None))
            ul.section-list {
                li { a href=(href(locale, &Route::LibraryIndex)) { (ctx.t("nav-library")) } }
                li { a href=(href(locale, &Route::MempoolSeriesIndex)) { (ctx.t("nav-mempool-series")) } }
                li { a href=(href(locale, &Route::ForumThreadsIndex)) { (ctx.t("nav-forum-threads")) } }
                li { a href=(href(locale, &Route::ForumPostsIndex)) { (ctx.t("nav-forum-posts")) } }
                @for (slug, title) in static_pages {
                    li { a href=(href(locale, &Route::Page { slug: slug.clone() })) { (title) } }
                }
            }
        }
    };
    base_document(ctx, "", &alternates, content)
}

/// Renders the library listing, or an empty-library notice
pub fn render_library_index(ctx: &RenderContext, docs: &[LibraryDoc]) -> Markup {
    let title = ctx.t("nav-library");
    let alternates = route_alternates(ctx, &Route::LibraryIndex);
    let intro = html! {
        p {
            (ctx.t("library-intro"))
        }
    };
    let content = html! {
        main.library-page {
            (page_header(&title, Some(intro)))
            section {
                @if docs.is_empty() {
                    p.empty-notice { (ctx.t("library-empty")) }
                } @else {
                    ul.doc-list {
                        @for doc in docs {
                            li.doc-listing {
                                span.doc-title { (doc.title) }
                                " "
                                em.date { "(" (format_date(&ctx.translator, doc.date)) ")" }
                                @if let Some(source) = &doc.source {
                                    span.source { " · " (source) }
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    base_document(ctx, &title, &alternates, content)
}

/// Renders the list of mempool series available in this locale
pub fn render_series_index(ctx: &RenderContext, series: &[Series]) -> Markup {
    let locale = ctx.locale;
    let title = ctx.t("nav-mempool-series");
    let alternates = route_alternates(ctx, &Route::MempoolSeriesIndex);
    let content = html! {
        main.series-index-page {
            (page_header(&title, None))
            section {
                @if series.is_empty() {
                    p.empty-notice { (ctx.t("series-empty")) }
                } @else {
                    ul.series-list {
                        @for s in series {
                            li {
                                a href=(href(locale, &Route::MempoolSeriesDetail { slug: s.slug.clone() })) { (s.title) }
                            }
                        }
                    }
                }
            }
        }
    };
    base_document(ctx, &title, &alternates, content)
}

/// Renders one series with its posts
pub fn render_series_detail(ctx: &RenderContext, detail: &SeriesDetail) -> Markup {
    let series = &detail.series;
    let alternates = href_langs(ctx.locales, |l| {
        translated_href(
            l,
            series.locale,
            &series.slug,
            &series.translations,
            |slug| Route::MempoolSeriesDetail { slug },
            &Route::MempoolSeriesIndex,
        )
    });
    let content = html! {
        main.series-page {
            (page_header(&series.title, None))
            section {
                @if detail.posts.is_empty() {
                    p.empty-notice { (ctx.t("series-no-posts")) }
                } @else {
                    ul.post-list {
                        @for post in &detail.posts {
                            li.post-listing {
                                span.post-title { (post.title) }
                                " "
                                em.date { "(" (format_date(&ctx.translator, post.date)) ")" }
                            }
                        }
                    }
                }
            }
        }
    };
    base_document(ctx, &series.title, &alternates, content)
}

fn thread_list(ctx: &RenderContext, threads: &[ForumThread]) -> Markup {
    let locale = ctx.locale;
    html! {
        ul.thread-list {
            @for thread in threads {
                li {
                    a href=(href(locale, &Route::ForumThreadDetail { source: thread.source, id: thread.id })) {
                        (thread.title)
                    }
                    " "
                    em.date { "(" (format_date(&ctx.translator, thread.date)) ")" }
                }
            }
        }
    }
}

/// Renders all forum threads, one section per source
pub fn render_threads_index(
    ctx: &RenderContext,
    groups: &[(ForumPostSource, Vec<ForumThread>)],
) -> Markup {
    let locale = ctx.locale;
    let title = ctx.t("nav-forum-threads");
    let alternates = route_alternates(ctx, &Route::ForumThreadsIndex);

    let mut nav_links = vec![NavLink {
        text: ctx.t("view-posts"),
        href: href(locale, &Route::ForumPostsIndex),
        sublink: None,
    }];
    nav_links.extend(ForumPostSource::ALL.into_iter().map(|source| NavLink {
        text: source.display_name().to_string(),
        href: href(locale, &Route::ForumSourceThreadsIndex { source }),
        sublink: Some(Box::new(NavLink {
            text: ctx.t("posts"),
            href: href(locale, &Route::ForumPostSourceIndex { source }),
            sublink: None,
        })),
    }));

    let content = html! {
        main.threads-page {
            (page_header(&title, None))
            (render_nav_links(&nav_links))
            section {
                @for (source, threads) in groups {
                    div.source-group id=(source.as_str()) {
                        h2 { (source.display_name()) }
                        (thread_list(ctx, threads))
                    }
                }
            }
        }
    };
    base_document(ctx, &title, &alternates, content)
}

/// Renders the threads of a single forum
pub fn render_source_threads_index(
    ctx: &RenderContext,
    source: ForumPostSource,
    threads: &[ForumThread],
) -> Markup {
    let locale = ctx.locale;
    let title = ctx.t_with("source-threads", &[("source", source.display_name())]);
    let alternates = route_alternates(ctx, &Route::ForumSourceThreadsIndex { source });
    let nav_links = [
        NavLink {
            text: ctx.t("all-threads"),
            href: href(locale, &Route::ForumThreadsIndex),
            sublink: None,
        },
        NavLink {
            text: ctx.t("posts"),
            href: href(locale, &Route::ForumPostSourceIndex { source }),
            sublink: None,
        },
    ];
    let content = html! {
        main.threads-page {
            (page_header(&title, None))
            (render_nav_links(&nav_links))
            section { (thread_list(ctx, threads)) }
        }
    };
    base_document(ctx, &title, &alternates, content)
}

/// The archived thread `post` belongs to, if any.
fn thread_of<'t>(post: &ForumPost, threads: &'t [ForumThread]) -> Option<&'t ForumThread> {
    threads
        .iter()
        .find(|t| t.source == post.source && t.id == post.thread_id)
}

fn post_list(ctx: &RenderContext, posts: &[ForumPost], threads: &[ForumThread]) -> Markup {
    html! {
        @if posts.is_empty() {
            p.empty-notice { (ctx.t("posts-empty")) }
        } @else {
            ul.post-list {
                @for post in posts {
                    li {
                        @if let Some(thread) = thread_of(post, threads) {
                            @let route = Route::ForumThreadDetail { source: thread.source, id: thread.id };
                            a href={ (href(ctx.locale, &route)) "#post-" (post.id) } { (post.subject) }
                            " "
                            em.date { "(" (format_date(&ctx.translator, post.date)) ")" }
                            span.source { " " (ctx.t_with("in-thread", &[("thread", thread.title.as_str())])) }
                        } @else {
                            span.post-title { (post.subject) }
                            " "
                            em.date { "(" (format_date(&ctx.translator, post.date)) ")" }
                        }
                    }
                }
            }
        }
    }
}

/// Renders all archived forum posts, one section per source
pub fn render_posts_index(
    ctx: &RenderContext,
    groups: &[(ForumPostSource, Vec<ForumPost>)],
    threads: &[ForumThread],
) -> Markup {
    let locale = ctx.locale;
    let title = ctx.t("nav-forum-posts");
    let alternates = route_alternates(ctx, &Route::ForumPostsIndex);

    let mut nav_links = vec![NavLink {
        text: ctx.t("view-threads"),
        href: href(locale, &Route::ForumThreadsIndex),
        sublink: None,
    }];
    nav_links.extend(ForumPostSource::ALL.into_iter().map(|source| NavLink {
        text: source.display_name().to_string(),
        href: href(locale, &Route::ForumPostSourceIndex { source }),
        sublink: Some(Box::new(NavLink {
            text: ctx.t("threads"),
            href: href(locale, &Route::ForumSourceThreadsIndex { source }),
            sublink: None,
        })),
    }));

    let content = html! {
        main.posts-page {
            (page_header(&title, None))
            (render_nav_links(&nav_links))
            section {
                @for (source, posts) in groups {
                    div.source-group id=(source.as_str()) {
                        h2 { (source.display_name()) }
                        (post_list(ctx, posts, threads))
                    }
                }
            }
        }
    };
    base_document(ctx, &title, &alternates, content)
}

/// Renders the archived posts of a single forum
pub fn render_source_posts_index(
    ctx: &RenderContext,
    source: ForumPostSource,
    posts: &[ForumPost],
    threads: &[ForumThread],
) -> Markup {
    let locale = ctx.locale;
    let title = ctx.t_with("source-posts", &[("source", source.display_name())]);
    let alternates = route_alternates(ctx, &Route::ForumPostSourceIndex { source });
    let nav_links = [
        NavLink {
            text: ctx.t("all-posts"),
            href: href(locale, &Route::ForumPostsIndex),
            sublink: None,
        },
        NavLink {
            text: ctx.t("threads"),
            href: href(locale, &Route::ForumSourceThreadsIndex { source }),
            sublink: None,
        },
    ];
    let content = html! {
        main.posts-page {
            (page_header(&title, None))
            (render_nav_links(&nav_links))
            section { (post_list(ctx, posts, threads)) }
        }
    };
    base_document(ctx, &title, &alternates, content)
}

/// Renders one thread with every archived post in it
pub fn render_thread_detail(ctx: &RenderContext, thread: &ForumThread, posts: &[ForumPost]) -> Markup {
    let locale = ctx.locale;
    let source = thread.source;
    let alternates = route_alternates(
        ctx,
        &Route::ForumThreadDetail {
            source,
            id: thread.id,
        },
    );
    let nav_links = [
        NavLink {
            text: ctx.t_with("source-threads", &[("source", source.display_name())]),
            href: href(locale, &Route::ForumSourceThreadsIndex { source }),
            sublink: Some(Box::new(NavLink {
                text: ctx.t("posts"),
                href: href(locale, &Route::ForumPostSourceIndex { source }),
                sublink: None,
            })),
        },
    ];
    let content = html! {
        main.thread-page {
            (page_header(&thread.title, None))
            (render_nav_links(&nav_links))
            @for post in posts {
                article.forum-post id={ "post-" (post.id) } {
                    h2 { (post.subject) }
                    p.date { (format_date(&ctx.translator, post.date)) }
                    @for paragraph in post.text.split("\n\n").filter(|p| !p.trim().is_empty()) {
                        p { (paragraph.trim()) }
                    }
                }
            }
        }
    };
    base_document(ctx, &thread.title, &alternates, content)
}

/// Renders a static markdown page, or a notice when no locale has it
pub fn render_static_page(ctx: &RenderContext, slug: &str, raw: &str) -> Markup {
    let alternates = route_alternates(ctx, &Route::Page { slug: slug.to_string() });

    if raw.is_empty() {
        let title = ctx.t("page-unavailable-title");
        let content = html! {
            main.static-page {
                p.empty-notice { (ctx.t("page-unavailable")) }
            }
        };
        return base_document(ctx, &title, &alternates, content);
    }

    let (front_matter, body) = markdown::parse_front_matter(raw);
    let title = markdown::page_title(front_matter.as_ref(), &body, slug);
    let subtitle = front_matter.as_ref().and_then(|fm| fm.subtitle.clone());
    let body_html = markdown::render_markdown(&body);

    let content = html! {
        main.static-page {
            @if let Some(subtitle) = subtitle {
                p.subtitle { (subtitle) }
            }
            article.page-content {
                (PreEscaped(body_html))
            }
        }
    };
    base_document(ctx, &title, &alternates, content)
}

/// Renders the site root, which forwards to the default locale's home
pub fn render_root_redirect(locale: Locale) -> Markup {
    let target = href(locale, &Route::Home);
    html! {
        (DOCTYPE)
        html lang=(locale.as_str()) {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content={ "0; url=" (target) };
                link rel="canonical" href=(target);
                title { (target) }
            }
            body {
                a href=(target) { (target) }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

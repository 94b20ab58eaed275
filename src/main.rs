use clap::{Parser, Subcommand, ValueEnum};
use sni_site::api::{FileContentApi, ForumPostSource};
use sni_site::content::{self, ContentDirectory};
use sni_site::locale::Locale;
use sni_site::urls::{self, Route};
use sni_site::{config, generate, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sni-site")]
#[command(about = "Static site generator for a multilingual library and forum archive")]
#[command(long_about = "\
Static site generator for a multilingual library and forum archive

Every page is generated once per enabled locale under /<locale>/. Static
pages are markdown files per locale; a page missing in one language falls
back to the English text.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── pages/
  │   ├── en/about.md              # Default locale: defines which pages exist
  │   └── es/about.md              # Translation (optional)
  ├── locales/
  │   └── es/site.ftl              # UI strings: nav-library = Biblioteca
  └── data/                        # Content-API exports
      ├── library/en.json
      ├── mempool/series.json
      └── satoshi/
          ├── threads.json
          └── posts.json

Run 'sni-site gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log more detail to stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the site for every enabled locale
    Build,
    /// Validate content, translations, and data without writing
    Check,
    /// Print a localized page, falling back to the default locale
    Resolve {
        /// Page slug, e.g. `about`
        slug: String,
        /// Locale to resolve for
        #[arg(long, default_value = "en")]
        locale: Locale,
    },
    /// Print the URL of a route, or its alternates in every enabled locale
    Href {
        #[arg(value_enum)]
        route: RouteKind,
        /// Locale; omit to list every enabled locale
        #[arg(long)]
        locale: Option<Locale>,
        /// Slug for library, mempool, series, and page routes
        #[arg(long)]
        slug: Option<String>,
        /// Forum for per-source routes (p2pfoundation, bitcointalk)
        #[arg(long)]
        forum: Option<ForumPostSource>,
        /// Thread id for `thread`
        #[arg(long)]
        id: Option<u32>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum RouteKind {
    Home,
    Library,
    LibraryDoc,
    Mempool,
    MempoolPost,
    Series,
    SeriesDetail,
    Posts,
    SourcePosts,
    Threads,
    SourceThreads,
    Thread,
    Page,
}

fn build_route(
    kind: RouteKind,
    slug: Option<String>,
    forum: Option<ForumPostSource>,
    id: Option<u32>,
) -> Result<Route, String> {
    let need_slug = || slug.clone().ok_or("--slug is required for this route");
    let need_forum = || forum.ok_or("--forum is required for this route");
    Ok(match kind {
        RouteKind::Home => Route::Home,
        RouteKind::Library => Route::LibraryIndex,
        RouteKind::LibraryDoc => Route::LibraryDoc { slug: need_slug()? },
        RouteKind::Mempool => Route::MempoolIndex,
        RouteKind::MempoolPost => Route::MempoolPost { slug: need_slug()? },
        RouteKind::Series => Route::MempoolSeriesIndex,
        RouteKind::SeriesDetail => Route::MempoolSeriesDetail { slug: need_slug()? },
        RouteKind::Posts => Route::ForumPostsIndex,
        RouteKind::SourcePosts => Route::ForumPostSourceIndex { source: need_forum()? },
        RouteKind::Threads => Route::ForumThreadsIndex,
        RouteKind::SourceThreads => Route::ForumSourceThreadsIndex { source: need_forum()? },
        RouteKind::Thread => Route::ForumThreadDetail {
            source: need_forum()?,
            id: id.ok_or("--id is required for this route")?,
        },
        RouteKind::Page => Route::Page { slug: need_slug()? },
    })
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            let api = FileContentApi::new(site_config.data_path(&cli.source));
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let report = generate::generate(&cli.source, &cli.output, &site_config, &api)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            let api = FileContentApi::new(site_config.data_path(&cli.source));
            let inventory = generate::check(&cli.source, &site_config, &api)?;
            output::print_check_output(&inventory);
            println!("==> Content is valid");
        }
        Command::Resolve { slug, locale } => {
            let text = content::resolve(&cli.source, ContentDirectory::Pages, &slug, locale);
            if text.is_empty() {
                eprintln!("No page '{slug}' in {locale} or {}", Locale::DEFAULT);
            } else {
                print!("{text}");
            }
        }
        Command::Href {
            route,
            locale,
            slug,
            forum,
            id,
        } => {
            let route = build_route(route, slug, forum, id)?;
            match locale {
                Some(locale) => println!("{}", urls::href(locale, &route)),
                None => {
                    let site_config = config::load_config(&cli.source)?;
                    let langs = urls::href_langs(&site_config.locales.enabled, |l| {
                        urls::href(l, &route)
                    });
                    for (locale, url) in langs {
                        println!("{locale}\t{url}");
                    }
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

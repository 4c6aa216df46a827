use clap::{Parser, Subcommand};
use nomad_library::fetch::{FileSource, HttpSource, ManifestSource};
use nomad_library::filter::SearchQuery;
use nomad_library::page::{Container, PageQuery, PageSink, StaticPage};
use nomad_library::{Category, RenderOptions, ViewMode};
use nomad_library::{config, debug, generate, library, normalize, output};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Shared flags for commands that filter by search text.
#[derive(clap::Args, Clone)]
struct SearchArgs {
    /// Case-insensitive search over title and path
    #[arg(long, default_value = "")]
    search: String,
}

/// Where the config and the manifest come from.
#[derive(clap::Args, Clone)]
struct SourceArgs {
    /// Directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Read the manifest from a local file instead of over HTTP
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    /// Override source.base_url from config.toml
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Parser)]
#[command(name = "nomad-library")]
#[command(about = "Render media library pages from a JSON catalog manifest")]
#[command(long_about = "\
Render media library pages from a JSON catalog manifest

The manifest is free-form JSON. Any object carrying a `path`, `file`, or `url`
is a media item, wherever it sits in the tree:

  {
    \"movies\": [{\"path\": \"movies/Alien.mp4\", \"cover\": \"covers/alien.jpg\"}],
    \"shows\":  {\"episodes\": [{\"file\": \"shows/foo/e01.mkv\"}]},
    \"music\":  {\"albums\": [{\"tracks\": [{\"url\": \"music/01 Dawn.flac\"}]}]}
  }

Type resolution (first available wins):
  Explicit:    the item's own `type` field
  Key name:    enclosing key (movies, shows, music, gallery, books)
  Path:        /shows/ or /tv/ segment, then file extension

By default the manifest is fetched from <base_url>/media.json with a
cache-busting `v` parameter. Use --manifest to read a local file instead.

Run 'nomad-library gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one category page as a standalone HTML document
    Render {
        /// movie, show, music, image, book, or anything else for all items
        kind: Category,

        /// Layout; defaults to render.mode from config.toml
        #[arg(long, value_enum)]
        mode: Option<ViewMode>,

        #[command(flatten)]
        search: SearchArgs,

        /// Add the diagnostic panel to the page
        #[arg(long)]
        debug: bool,

        /// Write the page here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List every media item in the manifest, grouped by type
    Scan {
        /// Print the normalized items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the diagnostic report: response status and per-category counts
    Debug(SearchArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            kind,
            mode,
            search,
            debug,
            output,
        } => {
            let (site_config, source) = open_source(&cli.source)?;
            let mode = mode.unwrap_or(site_config.render.mode);
            let container = match mode {
                ViewMode::Grid => Container::Grid,
                ViewMode::List => Container::List,
            };
            let query = PageQuery {
                search_text: search.search,
                debug,
            };
            let options = RenderOptions {
                mode,
                placeholder: site_config.render.placeholder.clone(),
            };
            let mut page = StaticPage::with_container(container);

            if query.debug {
                let probe_query = query.search();
                let ((), report) = tokio::join!(
                    library::render_category(source.as_ref(), kind, &options, &query, &mut page),
                    debug::probe(source.as_ref(), &probe_query),
                );
                page.show_debug(&report.text());
            } else {
                library::render_category(source.as_ref(), kind, &options, &query, &mut page).await;
            }

            let html = generate::render_document(&page, &site_config, kind, &query).into_string();
            match output {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    println!("==> Wrote {}", path.display());
                }
                None => print!("{}", html),
            }
        }
        Command::Scan { json } => {
            let (_, source) = open_source(&cli.source)?;
            let manifest = source.fetch_manifest().await?;
            let items = normalize::normalize_items(&manifest);
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                output::print_items(&items);
            }
        }
        Command::Debug(search) => {
            let (_, source) = open_source(&cli.source)?;
            let report = debug::probe(source.as_ref(), &SearchQuery::new(&search.search)).await;
            println!("{}", report.text());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config.toml, apply command-line overrides, and pick the manifest
/// source: a local file when `--manifest` is given, HTTP otherwise.
fn open_source(
    args: &SourceArgs,
) -> Result<(config::LibraryConfig, Box<dyn ManifestSource>), Box<dyn std::error::Error>> {
    let mut site_config = config::load_config(&args.config_dir)?;
    if let Some(base_url) = &args.base_url {
        site_config.source.base_url = base_url.clone();
        site_config.validate()?;
    }
    let source: Box<dyn ManifestSource> = match &args.manifest {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(&site_config.source)?),
    };
    Ok((site_config, source))
}

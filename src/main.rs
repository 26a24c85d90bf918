use clap::{Parser, Subcommand};
use simple_news::config::{self, SiteConfig};
use simple_news::route::Route;
use simple_news::session::Session;
use simple_news::store::ArticleStore;
use simple_news::{output, site};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simple-news")]
#[command(about = "News reader front end: article listings, categories and article pages as HTML")]
#[command(long_about = "\
News reader front end: article listings, categories and article pages as HTML

Pages:

  /                        Featured article, latest news, category shortcuts
  /category/<category>     Articles in one category (case-insensitive)
  /article/<id>            Full article with related articles

Every page simulates a network fetch: it starts in a loading state and
resolves after a fixed delay (see [fetch] in the config). Use --no-delay to
skip the wait.

Without --articles, the bundled six-article sample dataset is used.

Run 'simple-news gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// JSON file with an array of articles (default: bundled sample)
    #[arg(long, global = true)]
    articles: Option<PathBuf>,

    /// Site config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Resolve pages immediately instead of simulating fetch delays
    #[arg(long, global = true)]
    no_delay: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the HTML of one page, e.g. `render /article/2`
    Render {
        /// Page path
        #[arg(default_value = "/")]
        path: String,
    },
    /// Write every page to a static site directory
    Build {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// List articles grouped by category
    List,
    /// Validate the dataset and config without rendering
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the article dataset and site config shared by every page command.
fn load_inputs(cli: &Cli) -> Result<(ArticleStore, SiteConfig), Box<dyn std::error::Error>> {
    let store = match &cli.articles {
        Some(path) => ArticleStore::from_json_file(path)?,
        None => ArticleStore::sample(),
    };
    let mut site_config = config::load_config(&cli.config)?;
    if cli.no_delay {
        site_config = site_config.without_delays();
    }
    Ok((store, site_config))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Command::Render { path } => {
            let route = Route::parse(path)?;
            let (store, site_config) = load_inputs(&cli)?;
            let mut session = Session::new(store, &site_config);
            let html = session.visit(route).await;
            println!("{}", html.into_string());
        }
        Command::Build { output: output_dir } => {
            let (store, site_config) = load_inputs(&cli)?;
            // Static pages are written settled.
            let build_config = site_config.without_delays();
            println!("==> Building site → {}", output_dir.display());
            let report = site::build_site(store.clone(), &build_config, output_dir).await?;
            output::print_build_output(&report, &store);
            println!("==> Build complete: {}", output_dir.display());
        }
        Command::List => {
            let (store, _) = load_inputs(&cli)?;
            output::print_inventory(&store);
        }
        Command::Check => {
            let (store, site_config) = load_inputs(&cli)?;
            output::print_check_output(&store, &site_config);
            println!("==> Dataset and config are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

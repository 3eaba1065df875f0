use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use recipe_press::controller::Controller;
use recipe_press::dataset::{self, Dataset};
use recipe_press::present::page::ErrorState;
use recipe_press::{config, output, query, render, telemetry};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "recipe-press")]
#[command(about = "Query and render a recipe site's pages from its JSON dataset")]
#[command(long_about = "\
Query and render a recipe site's pages from its JSON dataset

The data directory holds four documents:

  data/
  ├── site_config.json     # siteName, logo, itemsPerPage, description
  ├── recipes.json         # all recipes, drafts included (published: false)
  ├── categories.json
  └── authors.json

Pages are addressed by site URL, exactly as a browser would request them:

  /                                   home listing
  /?search=choc&sort=popular&page=2   home listing, filtered
  /recipe.html?slug=lemon-tart        recipe detail
  /category.html?slug=desserts        category page, scoped listing
  /author.html?slug=ana-lima          author page, scoped listing

Run 'recipe-press gen-config' to generate a documented recipe-press.toml.")]
#[command(version)]
struct Cli {
    /// Data directory (overrides data_dir from the config file)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Config file
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Site origin for absolute URLs (overrides origin from the config file)
    #[arg(long, global = true)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum PageFormat {
    /// Content region only
    Html,
    /// Complete document with head meta and JSON-LD
    Document,
    /// The page model as JSON
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Load and validate the dataset, then print an inventory
    Check,
    /// Resolve a URL and print the matching recipes for its page
    Query {
        /// Site URL, e.g. "/category.html?slug=desserts&sort=alphabetical"
        url: String,
    },
    /// Synthesize the page for a URL
    Page {
        url: String,
        #[arg(long, value_enum, default_value = "html")]
        format: PageFormat,
        /// Reference date for relative dates (YYYY-MM-DD), defaults to now
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Print SEO meta tags and structured data for a URL
    Seo { url: String },
    /// Print a stock recipe-press.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let command = match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(ExitCode::SUCCESS);
        }
        command => command,
    };

    let config = resolve_config(&cli.config, cli.origin.as_deref())?;
    telemetry::init(&config.logging)?;
    let data_dir = cli.data.unwrap_or_else(|| PathBuf::from(&config.data_dir));

    match command {
        Command::Check => {
            let dataset = dataset::load_dataset(&data_dir)?;
            output::print_check_output(&dataset);
        }
        Command::Query { url } => {
            let dataset = dataset::load_dataset(&data_dir)?;
            let controller = Controller::enter(&dataset, &config, &url, Utc::now())?;
            let result = query::query(&dataset, controller.state());
            output::print_query_output(&result, controller.state());
        }
        Command::Page { url, format, today } => {
            let Some(dataset) = load_or_report(&data_dir, format) else {
                return Ok(ExitCode::FAILURE);
            };
            let now = today.map_or_else(Utc::now, start_of_day);
            let controller = Controller::enter(&dataset, &config, &url, now)?;
            let page = controller.render();
            match format {
                PageFormat::Html => println!("{}", render::render_body(&page.body).into_string()),
                PageFormat::Document => println!("{}", render::render_document(&page).into_string()),
                PageFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
            }
        }
        Command::Seo { url } => {
            let dataset = dataset::load_dataset(&data_dir)?;
            let controller = Controller::enter(&dataset, &config, &url, Utc::now())?;
            let page = controller.render();
            output::print_seo_output(&page.seo, page.structured_data.as_ref());
        }
        Command::GenConfig => {}
    }

    Ok(ExitCode::SUCCESS)
}

/// Config file values with command-line overrides applied on top.
fn resolve_config(
    path: &Path,
    origin: Option<&str>,
) -> Result<config::PressConfig, config::ConfigError> {
    let mut config = config::load_config(path)?;
    if let Some(origin) = origin {
        config.origin = origin.to_string();
        config.validate()?;
    }
    Ok(config)
}

/// Load the dataset for `page`. On failure, log the cause and print the
/// error state in the requested format instead of a page.
fn load_or_report(data_dir: &Path, format: PageFormat) -> Option<Dataset> {
    match dataset::load_dataset(data_dir) {
        Ok(dataset) => {
            info!(recipes = dataset.recipes().len(), "dataset ready");
            Some(dataset)
        }
        Err(e) => {
            error!(error = %e, dir = %data_dir.display(), "failed to load dataset");
            let state = ErrorState::load_failure();
            match format {
                PageFormat::Html => println!("{}", render::render_error(&state).into_string()),
                PageFormat::Document => {
                    println!("{}", render::render_error_document(&state).into_string())
                }
                PageFormat::Json => match serde_json::to_string_pretty(&state) {
                    Ok(json) => println!("{json}"),
                    Err(e) => error!(error = %e, "failed to serialize error state"),
                },
            }
            None
        }
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

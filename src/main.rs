use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use infimovies_api::config::Config;
use infimovies_api::db;
use infimovies_api::models::{SearchCriteria, SortBy};
use infimovies_api::services::providers::{DocumentStoreCatalog, RemoteCatalog};
use infimovies_api::services::{
    generate_filter_options, FallbackPolicy, Recommendations, Recommender, ResultSource,
    MAX_RESULTS,
};

#[derive(Parser, Debug)]
#[command(name = "infimovies")]
#[command(about = "Movie catalog and recommendation server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Derive the filter-options document from a catalog file
    FilterOptions {
        #[arg(long, default_value = "data/movies.json")]
        catalog: PathBuf,
        #[arg(long, default_value = "public/filter-options.json")]
        out: PathBuf,
    },
    /// Load a catalog file into the document store
    Import {
        #[arg(long, default_value = "data/movies.json")]
        catalog: PathBuf,
    },
    /// Fetch a remote catalog and print one page of recommendations
    Recommend(RecommendArgs),
}

#[derive(Args, Debug)]
struct RecommendArgs {
    /// Base URL of a running backend
    #[arg(long, default_value = "http://localhost:5000")]
    catalog_url: String,
    #[arg(long, default_value = "")]
    language: String,
    #[arg(long, default_value_t = 0.0)]
    min_rating: f64,
    #[arg(long)]
    adult: bool,
    #[arg(long, default_value = "")]
    country: String,
    #[arg(long)]
    release_year: Option<i64>,
    #[arg(long)]
    runtime: Option<i64>,
    #[arg(long, default_value = "")]
    genre: String,
    /// rating, title, release_date or runtime
    #[arg(long, default_value = "rating")]
    sort_by: String,
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Use the sample set if the catalog cannot be fetched
    #[arg(long)]
    fallback: bool,
}

impl RecommendArgs {
    fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            language: self.language.clone(),
            min_rating: self.min_rating,
            adult: self.adult,
            country: self.country.clone(),
            release_year: self.release_year,
            runtime: self.runtime,
            genre: self.genre.clone(),
            sort_by: SortBy::from(Some(self.sort_by.clone())),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "infimovies_api=info,infimovies=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(e) = dispatch(cli.command.unwrap_or(Command::Serve)).await {
        tracing::error!(error = %e, "Fatal error");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn dispatch(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve => {
            let config = Config::from_env()?;
            infimovies_api::run(config).await
        }
        Command::FilterOptions { catalog, out } => {
            generate_filter_options(&catalog, &out).await?;
            Ok(())
        }
        Command::Import { catalog } => {
            let config = Config::from_env()?;
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for import"))?;
            let pool = db::connect_document_store(url).await?;

            let data = tokio::fs::read_to_string(&catalog).await?;
            let documents: Vec<serde_json::Value> = serde_json::from_str(&data)?;
            let written = DocumentStoreCatalog::new(pool).import(&documents).await?;
            println!("Imported {} movies from {}", written, catalog.display());
            Ok(())
        }
        Command::Recommend(args) => {
            let fallback = if args.fallback {
                FallbackPolicy::SampleData
            } else {
                FallbackPolicy::Surface
            };
            let recommender = Recommender::new(
                Arc::new(RemoteCatalog::new(args.catalog_url.clone())),
                fallback,
                MAX_RESULTS,
            );
            let results = recommender.recommend(&args.criteria(), args.page).await?;
            print_recommendations(&results);
            Ok(())
        }
    }
}

fn print_recommendations(results: &Recommendations) {
    println!("Search criteria: {}", results.criteria_summary.join(" | "));
    println!(
        "Found {} {}{}",
        results.total_matches,
        if results.total_matches == 1 { "movie" } else { "movies" },
        if results.capped { " (showing top matches)" } else { "" }
    );
    if results.source == ResultSource::Fallback {
        println!("Catalog unavailable, showing sample data");
    }
    println!();

    if results.movies.is_empty() {
        println!("No movies found. Try adjusting your search criteria.");
        return;
    }

    for movie in &results.movies {
        let rating = if movie.average_rating > 0.0 {
            format!("{:.1}", movie.average_rating)
        } else {
            "N/A".to_string()
        };
        let year = movie
            .release_year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let runtime = if movie.runtime > 0 {
            format!("{} min", movie.runtime)
        } else {
            "N/A".to_string()
        };
        let language = movie.original_language.as_deref().unwrap_or("N/A");

        println!("* {} [{}]  {} | {} | {}", movie.title, rating, year, runtime, language);
        let genres: Vec<&str> = movie.genres.iter().take(3).map(String::as_str).collect();
        if !genres.is_empty() {
            println!("  {}", genres.join(", "));
        }
        println!(
            "  {}",
            movie
                .overview
                .as_deref()
                .unwrap_or("No description available.")
        );
    }

    println!();
    println!(
        "Page {} of {}  [{}]",
        results.page,
        results.total_pages,
        results
            .page_numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
}

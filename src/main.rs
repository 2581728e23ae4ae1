use anyhow::Result;
use dotenvy::dotenv;
use std::env;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cinecache::model::{GenreRecord, MovieRecord};
use cinecache::repo::MovieRepository;
use cinecache::store::MemoryStore;
use cinecache::tmdb::TmdbClient;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    match dotenv() {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}) - relying on environment", e),
    }

    let client = Arc::new(TmdbClient::from_env()?);
    let movies = MovieRepository::new(
        client,
        Arc::new(MemoryStore::<MovieRecord>::new()),
        Arc::new(MemoryStore::<GenreRecord>::new()),
    );

    let page = match env::args().nth(1) {
        Some(query) => {
            info!("Searching movies for '{}'", query);
            movies.search(&query, 1).await?
        }
        None => {
            info!("Fetching popular movies, page 1");
            movies.popular(1).await?
        }
    };

    for movie in &page {
        let date = movie
            .release_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unreleased".to_string());
        let genres: Vec<&str> = movie.genres.iter().map(|g| g.name.as_str()).collect();
        info!("{} ({}) [{}]", movie.title, date, genres.join(", "));
    }

    Ok(())
}

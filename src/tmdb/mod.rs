use async_trait::async_trait;

use crate::error::TmdbError;

pub mod dto;
mod client;

pub use client::TmdbClient;
pub use dto::{GenreDto, MovieDto, Page, TvShowDto};

/// Window parameter of the trending endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

/// Remote catalog API surface. Repositories hold this as a trait object so
/// tests can substitute scripted fakes for the HTTP client.
#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn movies(&self, category: &str, page: i64) -> Result<Page<MovieDto>, TmdbError>;
    async fn tv_shows(&self, category: &str, page: i64) -> Result<Page<TvShowDto>, TmdbError>;
    async fn trending_movies(
        &self,
        window: TimeWindow,
        page: i64,
    ) -> Result<Page<MovieDto>, TmdbError>;
    async fn trending_tv_shows(
        &self,
        window: TimeWindow,
        page: i64,
    ) -> Result<Page<TvShowDto>, TmdbError>;
    async fn movie_details(&self, id: i32) -> Result<MovieDto, TmdbError>;
    async fn tv_show_details(&self, id: i32) -> Result<TvShowDto, TmdbError>;
    async fn search_movies(&self, query: &str, page: i64) -> Result<Page<MovieDto>, TmdbError>;
    async fn search_tv_shows(&self, query: &str, page: i64)
        -> Result<Page<TvShowDto>, TmdbError>;
    async fn movie_genres(&self) -> Result<Vec<GenreDto>, TmdbError>;
    async fn tv_show_genres(&self) -> Result<Vec<GenreDto>, TmdbError>;
}

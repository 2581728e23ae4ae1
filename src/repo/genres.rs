use std::sync::Arc;

use tracing::warn;

use crate::error::Result;
use crate::mapper;
use crate::model::Genre;
use crate::store::GenreStore;
use crate::tmdb::TmdbApi;

/// Genre taxonomy accessors. Unlike the collection fetches, these absorb
/// remote failures and fall back to the local genre cache, re-raising only
/// when the local read fails too.
pub struct GenreRepository {
    remote: Arc<dyn TmdbApi>,
    store: Arc<dyn GenreStore>,
}

impl GenreRepository {
    pub fn new(remote: Arc<dyn TmdbApi>, store: Arc<dyn GenreStore>) -> Self {
        Self { remote, store }
    }

    pub async fn movie_genres(&self) -> Result<Vec<Genre>> {
        match self.sync_movie_genres().await {
            Ok(genres) => Ok(genres),
            Err(err) => {
                warn!("remote movie genre fetch failed, serving local cache: {err}");
                self.local_genres().await
            }
        }
    }

    pub async fn tv_show_genres(&self) -> Result<Vec<Genre>> {
        match self.sync_tv_show_genres().await {
            Ok(genres) => Ok(genres),
            Err(err) => {
                warn!("remote TV genre fetch failed, serving local cache: {err}");
                self.local_genres().await
            }
        }
    }

    async fn sync_movie_genres(&self) -> Result<Vec<Genre>> {
        let genres: Vec<Genre> = self
            .remote
            .movie_genres()
            .await?
            .into_iter()
            .map(mapper::genre_from_dto)
            .collect();
        self.store
            .upsert_many(genres.iter().map(mapper::genre_to_record).collect())?;
        Ok(genres)
    }

    async fn sync_tv_show_genres(&self) -> Result<Vec<Genre>> {
        let genres: Vec<Genre> = self
            .remote
            .tv_show_genres()
            .await?
            .into_iter()
            .map(mapper::genre_from_dto)
            .collect();
        self.store
            .upsert_many(genres.iter().map(mapper::genre_to_record).collect())?;
        Ok(genres)
    }

    pub async fn local_genres(&self) -> Result<Vec<Genre>> {
        Ok(self
            .store
            .all()?
            .into_iter()
            .map(mapper::genre_from_record)
            .collect())
    }

    pub async fn save(&self, genre: &Genre) -> Result<()> {
        self.store.upsert(mapper::genre_to_record(genre))?;
        Ok(())
    }
}

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::mapper;
use crate::model::{Movie, MovieRecord};
use crate::store::{GenreStore, MediaStore};
use crate::tmdb::{MovieDto, Page, TimeWindow, TmdbApi};

pub struct MovieRepository {
    remote: Arc<dyn TmdbApi>,
    store: Arc<dyn MediaStore<MovieRecord>>,
    genre_store: Arc<dyn GenreStore>,
}

impl MovieRepository {
    pub fn new(
        remote: Arc<dyn TmdbApi>,
        store: Arc<dyn MediaStore<MovieRecord>>,
        genre_store: Arc<dyn GenreStore>,
    ) -> Self {
        Self {
            remote,
            store,
            genre_store,
        }
    }

    /// Refreshes the local genre table before any entity is built. Genres
    /// are fully remote-owned, so every fetched entry overwrites by id.
    /// Failure aborts the caller's fetch; there is no fallback on this path.
    async fn sync_genres(&self) -> Result<()> {
        let records = self
            .remote
            .movie_genres()
            .await?
            .into_iter()
            .map(mapper::genre_from_dto)
            .map(|genre| mapper::genre_to_record(&genre))
            .collect();
        self.genre_store.upsert_many(records)?;
        Ok(())
    }

    /// Builds an entity from a DTO, resolving genres against the current
    /// local genre table. The DTO's own `genre_ids` are not consulted: all
    /// cached entities reference the same authoritative local genre set.
    fn build_entity(&self, dto: MovieDto) -> Result<Movie> {
        let genres = self
            .genre_store
            .all()?
            .into_iter()
            .map(mapper::genre_from_record)
            .collect();
        Ok(mapper::movie_from_dto(dto, genres))
    }

    /// Shared persistence step for every collection and detail path:
    /// remote-sourced fields always overwrite the cached record, only the
    /// locally-owned favorite flag is carried forward.
    fn merge_and_upsert(&self, movie: &mut Movie) -> Result<()> {
        if let Some(existing) = self.store.get(movie.id)? {
            movie.is_favorite = existing.is_favorite;
        }
        self.store.upsert(mapper::movie_to_record(movie))?;
        Ok(())
    }

    async fn sync_page(&self, payload: Page<MovieDto>) -> Result<Vec<Movie>> {
        let mut movies = Vec::with_capacity(payload.results.len());
        for dto in payload.results {
            let mut movie = self.build_entity(dto)?;
            self.merge_and_upsert(&mut movie)?;
            movies.push(movie);
        }
        info!(count = movies.len(), "synced movie page");
        Ok(movies)
    }

    pub async fn popular(&self, page: i64) -> Result<Vec<Movie>> {
        self.sync_genres().await?;
        let payload = self.remote.movies("popular", page).await?;
        self.sync_page(payload).await
    }

    pub async fn trending(&self, page: i64) -> Result<Vec<Movie>> {
        self.sync_genres().await?;
        let payload = self
            .remote
            .trending_movies(TimeWindow::default(), page)
            .await?;
        self.sync_page(payload).await
    }

    pub async fn search(&self, query: &str, page: i64) -> Result<Vec<Movie>> {
        self.sync_genres().await?;
        let payload = self.remote.search_movies(query, page).await?;
        self.sync_page(payload).await
    }

    pub async fn details(&self, id: i32) -> Result<Movie> {
        self.sync_genres().await?;
        let dto = self.remote.movie_details(id).await?;
        let mut movie = self.build_entity(dto)?;
        self.merge_and_upsert(&mut movie)?;
        Ok(movie)
    }

    /// Cache-first variant: a page 1 request without forced refresh is
    /// served from the local favorites set when that set is non-empty.
    /// Favorites stand in for a real page-1 cache here.
    pub async fn popular_cached(&self, page: i64, force_refresh: bool) -> Result<Vec<Movie>> {
        if !force_refresh && page == 1 {
            let cached = self.favorites().await?;
            if !cached.is_empty() {
                return Ok(cached);
            }
        }
        self.popular(page).await
    }

    /// Offline-first variant: any failure of the network path degrades to
    /// the local favorites set.
    pub async fn popular_offline_first(&self, page: i64) -> Result<Vec<Movie>> {
        match self.popular(page).await {
            Ok(movies) => Ok(movies),
            Err(err) => {
                warn!("network path failed, serving local favorites: {err}");
                self.favorites().await
            }
        }
    }

    pub async fn save(&self, movie: &Movie) -> Result<()> {
        self.store.upsert(mapper::movie_to_record(movie))?;
        Ok(())
    }

    pub async fn update(&self, movie: &Movie) -> Result<()> {
        self.save(movie).await
    }

    pub async fn local(&self, id: i32) -> Result<Option<Movie>> {
        Ok(self.store.get(id)?.map(mapper::movie_from_record))
    }

    pub async fn favorites(&self) -> Result<Vec<Movie>> {
        Ok(self
            .store
            .favorites()?
            .into_iter()
            .map(mapper::movie_from_record)
            .collect())
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        self.store.delete(id)?;
        Ok(())
    }
}

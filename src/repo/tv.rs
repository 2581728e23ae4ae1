use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::mapper;
use crate::model::{TvShow, TvShowRecord};
use crate::store::{GenreStore, MediaStore};
use crate::tmdb::{Page, TimeWindow, TmdbApi, TvShowDto};

pub struct TvShowRepository {
    remote: Arc<dyn TmdbApi>,
    store: Arc<dyn MediaStore<TvShowRecord>>,
    genre_store: Arc<dyn GenreStore>,
}

impl TvShowRepository {
    pub fn new(
        remote: Arc<dyn TmdbApi>,
        store: Arc<dyn MediaStore<TvShowRecord>>,
        genre_store: Arc<dyn GenreStore>,
    ) -> Self {
        Self {
            remote,
            store,
            genre_store,
        }
    }

    async fn sync_genres(&self) -> Result<()> {
        let records = self
            .remote
            .tv_show_genres()
            .await?
            .into_iter()
            .map(mapper::genre_from_dto)
            .map(|genre| mapper::genre_to_record(&genre))
            .collect();
        self.genre_store.upsert_many(records)?;
        Ok(())
    }

    fn build_entity(&self, dto: TvShowDto) -> Result<TvShow> {
        let genres = self
            .genre_store
            .all()?
            .into_iter()
            .map(mapper::genre_from_record)
            .collect();
        Ok(mapper::tv_show_from_dto(dto, genres))
    }

    fn merge_and_upsert(&self, show: &mut TvShow) -> Result<()> {
        if let Some(existing) = self.store.get(show.id)? {
            show.is_favorite = existing.is_favorite;
        }
        self.store.upsert(mapper::tv_show_to_record(show))?;
        Ok(())
    }

    async fn sync_page(&self, payload: Page<TvShowDto>) -> Result<Vec<TvShow>> {
        let mut shows = Vec::with_capacity(payload.results.len());
        for dto in payload.results {
            let mut show = self.build_entity(dto)?;
            self.merge_and_upsert(&mut show)?;
            shows.push(show);
        }
        info!(count = shows.len(), "synced TV show page");
        Ok(shows)
    }

    pub async fn popular(&self, page: i64) -> Result<Vec<TvShow>> {
        self.sync_genres().await?;
        let payload = self.remote.tv_shows("popular", page).await?;
        self.sync_page(payload).await
    }

    pub async fn trending(&self, page: i64) -> Result<Vec<TvShow>> {
        self.sync_genres().await?;
        let payload = self
            .remote
            .trending_tv_shows(TimeWindow::default(), page)
            .await?;
        self.sync_page(payload).await
    }

    pub async fn search(&self, query: &str, page: i64) -> Result<Vec<TvShow>> {
        self.sync_genres().await?;
        let payload = self.remote.search_tv_shows(query, page).await?;
        self.sync_page(payload).await
    }

    pub async fn details(&self, id: i32) -> Result<TvShow> {
        self.sync_genres().await?;
        let dto = self.remote.tv_show_details(id).await?;
        let mut show = self.build_entity(dto)?;
        self.merge_and_upsert(&mut show)?;
        Ok(show)
    }

    /// Cache-first variant; favorites stand in for a real page-1 cache.
    pub async fn popular_cached(&self, page: i64, force_refresh: bool) -> Result<Vec<TvShow>> {
        if !force_refresh && page == 1 {
            let cached = self.favorites().await?;
            if !cached.is_empty() {
                return Ok(cached);
            }
        }
        self.popular(page).await
    }

    pub async fn popular_offline_first(&self, page: i64) -> Result<Vec<TvShow>> {
        match self.popular(page).await {
            Ok(shows) => Ok(shows),
            Err(err) => {
                warn!("network path failed, serving local favorites: {err}");
                self.favorites().await
            }
        }
    }

    /// Static recommendation heuristic: trending when the user has any
    /// favorites, popular page 1 otherwise.
    pub async fn recommended(&self) -> Result<Vec<TvShow>> {
        let favorites = self.favorites().await?;
        if favorites.is_empty() {
            self.popular(1).await
        } else {
            self.trending(1).await
        }
    }

    /// Flags every given show as a favorite and persists it, one at a time.
    pub async fn add_favorites(&self, shows: Vec<TvShow>) -> Result<()> {
        for mut show in shows {
            show.is_favorite = true;
            self.update(&show).await?;
        }
        Ok(())
    }

    pub async fn save(&self, show: &TvShow) -> Result<()> {
        self.store.upsert(mapper::tv_show_to_record(show))?;
        Ok(())
    }

    pub async fn update(&self, show: &TvShow) -> Result<()> {
        self.save(show).await
    }

    pub async fn local(&self, id: i32) -> Result<Option<TvShow>> {
        Ok(self.store.get(id)?.map(mapper::tv_show_from_record))
    }

    pub async fn favorites(&self) -> Result<Vec<TvShow>> {
        Ok(self
            .store
            .favorites()?
            .into_iter()
            .map(mapper::tv_show_from_record)
            .collect())
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        self.store.delete(id)?;
        Ok(())
    }
}

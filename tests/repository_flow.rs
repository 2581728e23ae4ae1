use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use cinecache::error::{Error, StoreError, TmdbError};
use cinecache::model::{Genre, GenreRecord, MovieRecord, TvShowRecord};
use cinecache::repo::{GenreRepository, MovieRepository, TvShowRepository};
use cinecache::store::{GenreStore, MediaStore, MemoryStore};
use cinecache::tmdb::{GenreDto, MovieDto, Page, TimeWindow, TmdbApi, TvShowDto};

fn movie_dto(id: i32, title: &str) -> MovieDto {
    MovieDto {
        id,
        title: title.to_string(),
        overview: Some(format!("Overview of {title}")),
        poster_path: Some("/poster.jpg".to_string()),
        backdrop_path: None,
        release_date: Some("2023-01-01".to_string()),
        vote_average: Some(7.5),
        genre_ids: Some(vec![1, 2]),
    }
}

fn tv_dto(id: i32, name: &str) -> TvShowDto {
    TvShowDto {
        id,
        name: name.to_string(),
        overview: None,
        poster_path: None,
        backdrop_path: None,
        first_air_date: Some("2024-06-15".to_string()),
        vote_average: Some(8.1),
        genre_ids: Some(vec![1]),
    }
}

fn genre_dto(id: i32, name: &str) -> GenreDto {
    GenreDto {
        id,
        name: name.to_string(),
    }
}

fn page_of<T>(results: Vec<T>) -> Page<T> {
    let total = results.len() as i64;
    Page {
        page: 1,
        results,
        total_pages: Some(1),
        total_results: Some(total),
    }
}

fn remote_down() -> TmdbError {
    TmdbError::Api {
        status_code: 503,
        message: Some("remote unavailable".to_string()),
    }
}

/// Scripted remote: responses are plain data, failure switches flip whole
/// endpoint groups, counters record what the repositories actually called.
#[derive(Default)]
struct FakeTmdb {
    movies: Mutex<Vec<MovieDto>>,
    tv_shows: Mutex<Vec<TvShowDto>>,
    genres: Mutex<Vec<GenreDto>>,
    fail_genres: AtomicBool,
    fail_lists: AtomicBool,
    genre_calls: AtomicUsize,
    list_calls: AtomicUsize,
    trending_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl FakeTmdb {
    fn seeded() -> Arc<Self> {
        let fake = Self::default();
        *fake.movies.lock().unwrap() = vec![movie_dto(1, "Test Movie 1")];
        *fake.tv_shows.lock().unwrap() = vec![tv_dto(10, "Test Show 1")];
        *fake.genres.lock().unwrap() = vec![genre_dto(1, "Action"), genre_dto(2, "Comedy")];
        Arc::new(fake)
    }

    fn check_lists(&self) -> Result<(), TmdbError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lists.load(Ordering::SeqCst) {
            Err(remote_down())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TmdbApi for FakeTmdb {
    async fn movies(&self, _category: &str, _page: i64) -> Result<Page<MovieDto>, TmdbError> {
        self.check_lists()?;
        Ok(page_of(self.movies.lock().unwrap().clone()))
    }

    async fn tv_shows(&self, _category: &str, _page: i64) -> Result<Page<TvShowDto>, TmdbError> {
        self.check_lists()?;
        Ok(page_of(self.tv_shows.lock().unwrap().clone()))
    }

    async fn trending_movies(
        &self,
        _window: TimeWindow,
        _page: i64,
    ) -> Result<Page<MovieDto>, TmdbError> {
        self.trending_calls.fetch_add(1, Ordering::SeqCst);
        self.check_lists()?;
        Ok(page_of(self.movies.lock().unwrap().clone()))
    }

    async fn trending_tv_shows(
        &self,
        _window: TimeWindow,
        _page: i64,
    ) -> Result<Page<TvShowDto>, TmdbError> {
        self.trending_calls.fetch_add(1, Ordering::SeqCst);
        self.check_lists()?;
        Ok(page_of(self.tv_shows.lock().unwrap().clone()))
    }

    async fn movie_details(&self, id: i32) -> Result<MovieDto, TmdbError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.movies
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(TmdbError::Api {
                status_code: 404,
                message: Some("The resource you requested could not be found.".to_string()),
            })
    }

    async fn tv_show_details(&self, id: i32) -> Result<TvShowDto, TmdbError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.tv_shows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(TmdbError::Api {
                status_code: 404,
                message: Some("The resource you requested could not be found.".to_string()),
            })
    }

    async fn search_movies(
        &self,
        query: &str,
        _page: i64,
    ) -> Result<Page<MovieDto>, TmdbError> {
        self.check_lists()?;
        let matches = self
            .movies
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.title.contains(query))
            .cloned()
            .collect();
        Ok(page_of(matches))
    }

    async fn search_tv_shows(
        &self,
        query: &str,
        _page: i64,
    ) -> Result<Page<TvShowDto>, TmdbError> {
        self.check_lists()?;
        let matches = self
            .tv_shows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.name.contains(query))
            .cloned()
            .collect();
        Ok(page_of(matches))
    }

    async fn movie_genres(&self) -> Result<Vec<GenreDto>, TmdbError> {
        self.genre_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_genres.load(Ordering::SeqCst) {
            return Err(remote_down());
        }
        Ok(self.genres.lock().unwrap().clone())
    }

    async fn tv_show_genres(&self) -> Result<Vec<GenreDto>, TmdbError> {
        self.genre_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_genres.load(Ordering::SeqCst) {
            return Err(remote_down());
        }
        Ok(self.genres.lock().unwrap().clone())
    }
}

/// Genre store whose backend is permanently broken.
struct BrokenGenreStore;

impl GenreStore for BrokenGenreStore {
    fn upsert(&self, _record: GenreRecord) -> Result<(), StoreError> {
        Err(StoreError::Backend("disk gone".to_string()))
    }
    fn upsert_many(&self, _records: Vec<GenreRecord>) -> Result<(), StoreError> {
        Err(StoreError::Backend("disk gone".to_string()))
    }
    fn all(&self) -> Result<Vec<GenreRecord>, StoreError> {
        Err(StoreError::Backend("disk gone".to_string()))
    }
    fn get(&self, _id: i32) -> Result<Option<GenreRecord>, StoreError> {
        Err(StoreError::Backend("disk gone".to_string()))
    }
    fn delete_all(&self) -> Result<(), StoreError> {
        Err(StoreError::Backend("disk gone".to_string()))
    }
}

struct Harness {
    remote: Arc<FakeTmdb>,
    movie_store: Arc<MemoryStore<MovieRecord>>,
    tv_store: Arc<MemoryStore<TvShowRecord>>,
    genre_store: Arc<MemoryStore<GenreRecord>>,
    movies: MovieRepository,
    tv: TvShowRepository,
    genres: GenreRepository,
}

fn harness() -> Harness {
    let remote = FakeTmdb::seeded();
    let movie_store = Arc::new(MemoryStore::<MovieRecord>::new());
    let tv_store = Arc::new(MemoryStore::<TvShowRecord>::new());
    let genre_store = Arc::new(MemoryStore::<GenreRecord>::new());
    Harness {
        movies: MovieRepository::new(
            remote.clone(),
            movie_store.clone(),
            genre_store.clone(),
        ),
        tv: TvShowRepository::new(remote.clone(), tv_store.clone(), genre_store.clone()),
        genres: GenreRepository::new(remote.clone(), genre_store.clone()),
        remote,
        movie_store,
        tv_store,
        genre_store,
    }
}

#[tokio::test]
async fn collection_fetch_resolves_genres_from_the_local_table() {
    let h = harness();
    let movies = h.movies.popular(1).await.unwrap();

    assert_eq!(movies.len(), 1);
    let expected = vec![
        Genre {
            id: 1,
            name: "Action".to_string(),
        },
        Genre {
            id: 2,
            name: "Comedy".to_string(),
        },
    ];
    // resolved against the freshly synced local table, not the DTO id list
    assert_eq!(movies[0].genres, expected);
    assert!(!movies[0].is_favorite);
    assert_eq!(GenreStore::all(h.genre_store.as_ref()).unwrap().len(), 2);
    assert!(MediaStore::get(h.movie_store.as_ref(), 1).unwrap().is_some());
}

#[tokio::test]
async fn collection_refetch_updates_fields_and_preserves_favorite() {
    let h = harness();
    h.movies.popular(1).await.unwrap();

    let mut movie = h.movies.local(1).await.unwrap().unwrap();
    movie.is_favorite = true;
    h.movies.update(&movie).await.unwrap();

    *h.remote.movies.lock().unwrap() = vec![movie_dto(1, "Renamed Movie")];
    let refreshed = h.movies.popular(1).await.unwrap();

    assert_eq!(refreshed[0].title, "Renamed Movie");
    assert!(refreshed[0].is_favorite);

    let record = MediaStore::get(h.movie_store.as_ref(), 1).unwrap().unwrap();
    assert_eq!(record.title, "Renamed Movie");
    assert!(record.is_favorite);
}

#[tokio::test]
async fn detail_refetch_preserves_favorite_flag() {
    let h = harness();
    h.movies.details(1).await.unwrap();

    let mut movie = h.movies.local(1).await.unwrap().unwrap();
    movie.is_favorite = true;
    h.movies.update(&movie).await.unwrap();

    let refreshed = h.movies.details(1).await.unwrap();
    assert!(refreshed.is_favorite);
    let record = MediaStore::get(h.movie_store.as_ref(), 1).unwrap().unwrap();
    assert!(record.is_favorite);
}

#[tokio::test]
async fn collection_fetch_aborts_when_genre_sync_fails() {
    let h = harness();
    h.remote.fail_genres.store(true, Ordering::SeqCst);

    let err = h.movies.popular(1).await.unwrap_err();
    assert!(matches!(err, Error::Remote(_)));
    // the page fetch never happened: genres come first
    assert_eq!(h.remote.list_calls.load(Ordering::SeqCst), 0);
    assert!(MediaStore::all(h.movie_store.as_ref()).unwrap().is_empty());
}

#[tokio::test]
async fn genre_accessor_falls_back_to_the_local_cache() {
    let h = harness();
    let fresh = h.genres.movie_genres().await.unwrap();
    assert_eq!(fresh.len(), 2);

    h.remote.fail_genres.store(true, Ordering::SeqCst);
    let cached = h.genres.movie_genres().await.unwrap();
    assert_eq!(cached, fresh);
    assert_eq!(h.remote.genre_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn genre_accessor_reraises_when_the_local_read_also_fails() {
    let remote = FakeTmdb::seeded();
    remote.fail_genres.store(true, Ordering::SeqCst);
    let repo = GenreRepository::new(remote, Arc::new(BrokenGenreStore));

    let err = repo.movie_genres().await.unwrap_err();
    assert!(matches!(err, Error::Store(_)));
}

#[tokio::test]
async fn offline_first_returns_exactly_the_local_favorites() {
    let h = harness();
    h.movies.popular(1).await.unwrap();
    let mut movie = h.movies.local(1).await.unwrap().unwrap();
    movie.is_favorite = true;
    h.movies.update(&movie).await.unwrap();

    h.remote.fail_lists.store(true, Ordering::SeqCst);
    let fallback = h.movies.popular_offline_first(1).await.unwrap();
    assert_eq!(fallback, h.movies.favorites().await.unwrap());
    assert_eq!(fallback.len(), 1);
    assert!(fallback[0].is_favorite);
}

#[tokio::test]
async fn cached_variant_serves_favorites_for_page_one() {
    let h = harness();
    h.movies.popular(1).await.unwrap();
    let mut movie = h.movies.local(1).await.unwrap().unwrap();
    movie.is_favorite = true;
    h.movies.update(&movie).await.unwrap();
    let lists_before = h.remote.list_calls.load(Ordering::SeqCst);

    let cached = h.movies.popular_cached(1, false).await.unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(h.remote.list_calls.load(Ordering::SeqCst), lists_before);

    // forced refresh and deeper pages both go to the network
    h.movies.popular_cached(1, true).await.unwrap();
    h.movies.popular_cached(2, false).await.unwrap();
    assert_eq!(
        h.remote.list_calls.load(Ordering::SeqCst),
        lists_before + 2
    );
}

#[tokio::test]
async fn cached_variant_without_favorites_goes_to_the_network() {
    let h = harness();
    let result = h.movies.popular_cached(1, false).await.unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(h.remote.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn recommendations_depend_on_having_favorites() {
    let h = harness();

    let without = h.tv.recommended().await.unwrap();
    assert_eq!(without.len(), 1);
    assert_eq!(h.remote.trending_calls.load(Ordering::SeqCst), 0);

    let mut show = h.tv.local(10).await.unwrap().unwrap();
    show.is_favorite = true;
    h.tv.update(&show).await.unwrap();

    h.tv.recommended().await.unwrap();
    assert_eq!(h.remote.trending_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn bulk_add_favorites_flags_every_show() {
    let h = harness();
    let shows = h.tv.popular(1).await.unwrap();
    h.tv.add_favorites(shows).await.unwrap();

    let favorites = h.tv.favorites().await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert!(favorites.iter().all(|s| s.is_favorite));
    let record = MediaStore::get(h.tv_store.as_ref(), 10).unwrap().unwrap();
    assert!(record.is_favorite);
}

#[tokio::test]
async fn delete_of_a_never_stored_id_is_a_noop() {
    let h = harness();
    h.movies.delete(12345).await.unwrap();
    assert!(h.movies.local(12345).await.unwrap().is_none());
}

#[tokio::test]
async fn favorites_excludes_unflagged_records() {
    let h = harness();
    *h.remote.movies.lock().unwrap() = vec![
        movie_dto(1, "Kept"),
        movie_dto(2, "Flagged"),
        movie_dto(3, "Skipped"),
    ];
    h.movies.popular(1).await.unwrap();

    let mut flagged = h.movies.local(2).await.unwrap().unwrap();
    flagged.is_favorite = true;
    h.movies.update(&flagged).await.unwrap();

    let favorites = h.movies.favorites().await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, 2);
}

#[tokio::test]
async fn search_path_persists_results_like_other_collection_fetches() {
    let h = harness();
    let found = h.movies.search("Test", 1).await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(MediaStore::get(h.movie_store.as_ref(), 1).unwrap().is_some());

    let shows = h.tv.search("Show", 1).await.unwrap();
    assert_eq!(shows.len(), 1);
    assert!(MediaStore::get(h.tv_store.as_ref(), 10).unwrap().is_some());
}

#[tokio::test]
async fn detail_fetch_of_unknown_id_surfaces_the_api_error() {
    let h = harness();
    let err = h.movies.details(99999).await.unwrap_err();
    match err {
        Error::Remote(TmdbError::Api {
            status_code,
            message,
        }) => {
            assert_eq!(status_code, 404);
            assert_eq!(
                message.as_deref(),
                Some("The resource you requested could not be found.")
            );
        }
        other => panic!("expected remote Api error, got {other:?}"),
    }
}

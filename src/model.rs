use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Shared classification taxonomy, remote-owned. Referenced by both movies
/// and TV shows; name corrections aside, entries are immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// In-memory movie entity used by business logic. `is_favorite` is owned
/// locally and never appears in remote payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub vote_average: Option<f64>,
    pub is_favorite: bool,
    pub genres: Vec<Genre>,
}

/// In-memory TV show entity. Structurally a [`Movie`] with a `name` and a
/// first-air date instead of a title and a release date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShow {
    pub id: i32,
    pub name: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<NaiveDate>,
    pub vote_average: Option<f64>,
    pub is_favorite: bool,
    pub genres: Vec<Genre>,
}

/// Persisted genre row, keyed by the remote id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreRecord {
    pub id: i32,
    pub name: String,
}

/// Persisted movie row. Carries the locally-owned favorite flag and the
/// genre sub-records the entity's genres are rebuilt from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: i32,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub vote_average: Option<f64>,
    pub is_favorite: bool,
    pub genres: Vec<GenreRecord>,
}

/// Persisted TV show row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShowRecord {
    pub id: i32,
    pub name: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<NaiveDate>,
    pub vote_average: Option<f64>,
    pub is_favorite: bool,
    pub genres: Vec<GenreRecord>,
}

//! Wire-format records decoded straight from TMDB JSON payloads.

use serde::Deserialize;

/// Envelope for every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub page: i64,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: Option<i64>,
    #[serde(default)]
    pub total_results: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieDto {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Present on the wire, but genre resolution goes through the local
    /// genre table instead of this list.
    #[serde(default)]
    pub genre_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvShowDto {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenreDto {
    pub id: i32,
    pub name: String,
}

/// Envelope of the two `/genre/{kind}/list` endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreListDto {
    pub genres: Vec<GenreDto>,
}

/// Standard error envelope returned with non-2xx statuses. Every field is
/// optional; an undecodable envelope degrades to a message-less API error.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status_code: Option<i32>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

//! Pure conversions between wire DTOs, domain entities, and persisted
//! records. No I/O and no reads of existing state: the favorites-preserving
//! merge is the repositories' job, not the mapper's.

use chrono::NaiveDate;

use crate::model::{Genre, GenreRecord, Movie, MovieRecord, TvShow, TvShowRecord};
use crate::tmdb::dto::{GenreDto, MovieDto, TvShowDto};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a wire date; unparseable input maps to `None` rather than an error.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

pub fn genre_from_dto(dto: GenreDto) -> Genre {
    Genre {
        id: dto.id,
        name: dto.name,
    }
}

pub fn genre_from_record(record: GenreRecord) -> Genre {
    Genre {
        id: record.id,
        name: record.name,
    }
}

pub fn genre_to_record(genre: &Genre) -> GenreRecord {
    GenreRecord {
        id: genre.id,
        name: genre.name.clone(),
    }
}

/// Builds a fresh entity from a wire DTO. The caller supplies the resolved
/// genre set (the DTO's raw `genre_ids` are not consulted); the favorite
/// flag always starts false.
pub fn movie_from_dto(dto: MovieDto, genres: Vec<Genre>) -> Movie {
    Movie {
        id: dto.id,
        title: dto.title,
        overview: dto.overview,
        poster_path: dto.poster_path,
        backdrop_path: dto.backdrop_path,
        release_date: dto.release_date.as_deref().and_then(parse_date),
        vote_average: dto.vote_average,
        is_favorite: false,
        genres,
    }
}

pub fn movie_from_record(record: MovieRecord) -> Movie {
    Movie {
        id: record.id,
        title: record.title,
        overview: record.overview,
        poster_path: record.poster_path,
        backdrop_path: record.backdrop_path,
        release_date: record.release_date,
        vote_average: record.vote_average,
        is_favorite: record.is_favorite,
        genres: record.genres.into_iter().map(genre_from_record).collect(),
    }
}

pub fn movie_to_record(movie: &Movie) -> MovieRecord {
    MovieRecord {
        id: movie.id,
        title: movie.title.clone(),
        overview: movie.overview.clone(),
        poster_path: movie.poster_path.clone(),
        backdrop_path: movie.backdrop_path.clone(),
        release_date: movie.release_date,
        vote_average: movie.vote_average,
        is_favorite: movie.is_favorite,
        genres: movie.genres.iter().map(genre_to_record).collect(),
    }
}

pub fn tv_show_from_dto(dto: TvShowDto, genres: Vec<Genre>) -> TvShow {
    TvShow {
        id: dto.id,
        name: dto.name,
        overview: dto.overview,
        poster_path: dto.poster_path,
        backdrop_path: dto.backdrop_path,
        first_air_date: dto.first_air_date.as_deref().and_then(parse_date),
        vote_average: dto.vote_average,
        is_favorite: false,
        genres,
    }
}

pub fn tv_show_from_record(record: TvShowRecord) -> TvShow {
    TvShow {
        id: record.id,
        name: record.name,
        overview: record.overview,
        poster_path: record.poster_path,
        backdrop_path: record.backdrop_path,
        first_air_date: record.first_air_date,
        vote_average: record.vote_average,
        is_favorite: record.is_favorite,
        genres: record.genres.into_iter().map(genre_from_record).collect(),
    }
}

pub fn tv_show_to_record(show: &TvShow) -> TvShowRecord {
    TvShowRecord {
        id: show.id,
        name: show.name.clone(),
        overview: show.overview.clone(),
        poster_path: show.poster_path.clone(),
        backdrop_path: show.backdrop_path.clone(),
        first_air_date: show.first_air_date,
        vote_average: show.vote_average,
        is_favorite: show.is_favorite,
        genres: show.genres.iter().map(genre_to_record).collect(),
    }
}

//! Sync repositories: the only layer that talks to both the remote client
//! and the local stores. Every collection fetch runs genre freshness →
//! remote fetch → entity construction → merge-and-upsert, in that order;
//! the remote source is authoritative for everything except the favorite
//! flag, which is carried forward from the existing local record.

mod genres;
mod movies;
mod tv;

pub use genres::GenreRepository;
pub use movies::MovieRepository;
pub use tv::TvShowRepository;

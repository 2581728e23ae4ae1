//! Local store contract.
//!
//! The concrete storage engine is an external collaborator; only the CRUD
//! contract below matters to the sync layer. Calls are synchronous and
//! atomic per call. Single-writer discipline is the engine's: concurrent
//! upserts to the same id from separate repository calls are last-write-wins.

use crate::error::StoreError;
use crate::model::{GenreRecord, MovieRecord, TvShowRecord};

mod memory;

pub use memory::MemoryStore;

/// Record addressable by its remote-assigned primary id.
pub trait Keyed {
    fn key(&self) -> i32;
}

/// Record carrying the locally-owned favorite flag.
pub trait Favoritable: Keyed {
    fn is_favorite(&self) -> bool;
}

impl Keyed for MovieRecord {
    fn key(&self) -> i32 {
        self.id
    }
}

impl Keyed for TvShowRecord {
    fn key(&self) -> i32 {
        self.id
    }
}

impl Keyed for GenreRecord {
    fn key(&self) -> i32 {
        self.id
    }
}

impl Favoritable for MovieRecord {
    fn is_favorite(&self) -> bool {
        self.is_favorite
    }
}

impl Favoritable for TvShowRecord {
    fn is_favorite(&self) -> bool {
        self.is_favorite
    }
}

/// Per-kind store contract for movies and TV shows. `upsert` replaces the
/// whole record (never a partial merge); `delete` of an absent id is a
/// no-op.
pub trait MediaStore<R>: Send + Sync {
    fn upsert(&self, record: R) -> Result<(), StoreError>;
    fn upsert_many(&self, records: Vec<R>) -> Result<(), StoreError>;
    fn all(&self) -> Result<Vec<R>, StoreError>;
    fn get(&self, id: i32) -> Result<Option<R>, StoreError>;
    fn favorites(&self) -> Result<Vec<R>, StoreError>;
    fn delete(&self, id: i32) -> Result<(), StoreError>;
    fn delete_all(&self) -> Result<(), StoreError>;
}

/// Store contract for the shared genre taxonomy. Genres are fully
/// remote-owned, so there is no favorite filter here.
pub trait GenreStore: Send + Sync {
    fn upsert(&self, record: GenreRecord) -> Result<(), StoreError>;
    fn upsert_many(&self, records: Vec<GenreRecord>) -> Result<(), StoreError>;
    fn all(&self) -> Result<Vec<GenreRecord>, StoreError>;
    fn get(&self, id: i32) -> Result<Option<GenreRecord>, StoreError>;
    fn delete_all(&self) -> Result<(), StoreError>;
}

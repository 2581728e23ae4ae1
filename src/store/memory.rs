use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::error::StoreError;
use crate::model::GenreRecord;

use super::{Favoritable, GenreStore, Keyed, MediaStore};

/// In-memory keyed table standing in for the embedded object database.
/// Each method takes the lock once, so individual calls are atomic with
/// respect to each other.
#[derive(Debug, Default)]
pub struct MemoryStore<R> {
    rows: RwLock<BTreeMap<i32, R>>,
}

impl<R> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<R> MemoryStore<R>
where
    R: Keyed + Clone,
{
    fn put(&self, record: R) {
        self.rows.write().insert(record.key(), record);
    }

    fn put_many(&self, records: Vec<R>) {
        let mut rows = self.rows.write();
        for record in records {
            rows.insert(record.key(), record);
        }
    }

    fn fetch_all(&self) -> Vec<R> {
        self.rows.read().values().cloned().collect()
    }

    fn fetch(&self, id: i32) -> Option<R> {
        self.rows.read().get(&id).cloned()
    }

    fn remove(&self, id: i32) {
        self.rows.write().remove(&id);
    }

    fn clear(&self) {
        self.rows.write().clear();
    }
}

impl<R> MediaStore<R> for MemoryStore<R>
where
    R: Favoritable + Clone + Send + Sync,
{
    fn upsert(&self, record: R) -> Result<(), StoreError> {
        self.put(record);
        Ok(())
    }

    fn upsert_many(&self, records: Vec<R>) -> Result<(), StoreError> {
        self.put_many(records);
        Ok(())
    }

    fn all(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.fetch_all())
    }

    fn get(&self, id: i32) -> Result<Option<R>, StoreError> {
        Ok(self.fetch(id))
    }

    fn favorites(&self) -> Result<Vec<R>, StoreError> {
        Ok(self
            .fetch_all()
            .into_iter()
            .filter(Favoritable::is_favorite)
            .collect())
    }

    fn delete(&self, id: i32) -> Result<(), StoreError> {
        self.remove(id);
        Ok(())
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        self.clear();
        Ok(())
    }
}

impl GenreStore for MemoryStore<GenreRecord> {
    fn upsert(&self, record: GenreRecord) -> Result<(), StoreError> {
        self.put(record);
        Ok(())
    }

    fn upsert_many(&self, records: Vec<GenreRecord>) -> Result<(), StoreError> {
        self.put_many(records);
        Ok(())
    }

    fn all(&self) -> Result<Vec<GenreRecord>, StoreError> {
        Ok(self.fetch_all())
    }

    fn get(&self, id: i32) -> Result<Option<GenreRecord>, StoreError> {
        Ok(self.fetch(id))
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        self.clear();
        Ok(())
    }
}

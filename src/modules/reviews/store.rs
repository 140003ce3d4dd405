use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

pub type Record = Map<String, Value>;

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create(&self, record: Record) -> anyhow::Result<Record>;

    async fn create_many(&self, records: Vec<Record>) -> anyhow::Result<Vec<Record>>;

    async fn list(&self) -> anyhow::Result<Vec<Record>>;

    async fn get(&self, id: i64) -> anyhow::Result<Option<Record>>;

    /// `None` when no record has this id.
    async fn replace(&self, id: i64, record: Record) -> anyhow::Result<Option<Record>>;

    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}

#[derive(Debug)]
pub struct InMemoryRecordStore {
    next_id: AtomicI64,
    records: RwLock<BTreeMap<i64, Record>>,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn stamp(id: i64, mut record: Record) -> Record {
        record.insert("id".to_string(), Value::from(id));
        record
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create(&self, record: Record) -> anyhow::Result<Record> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let record = Self::stamp(id, record);
        self.records.write().await.insert(id, record.clone());
        Ok(record)
    }

    async fn create_many(&self, records: Vec<Record>) -> anyhow::Result<Vec<Record>> {
        let mut stored = self.records.write().await;
        let created = records
            .into_iter()
            .map(|record| {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let record = Self::stamp(id, record);
                stored.insert(id, record.clone());
                record
            })
            .collect();
        Ok(created)
    }

    async fn list(&self) -> anyhow::Result<Vec<Record>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Record>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn replace(&self, id: i64, record: Record) -> anyhow::Result<Option<Record>> {
        let mut stored = self.records.write().await;
        match stored.get_mut(&id) {
            Some(existing) => {
                *existing = Self::stamp(id, record);
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        Ok(self.records.write().await.remove(&id).is_some())
    }
}

//! Shared test doubles for the range index

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use iplocations::errors::{IpLocationsError, Result};
use iplocations::store::{IpRangeStore, MemoryRangeIndex, RangeIndex, ShardId};

/// 记录调用次数的索引，内部委托给 MemoryRangeIndex
#[derive(Default)]
pub struct CountingIndex {
    inner: MemoryRangeIndex,
    pub inserts: AtomicUsize,
    pub queries: AtomicUsize,
}

impl CountingIndex {
    pub fn calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst) + self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RangeIndex for CountingIndex {
    async fn insert(&self, shard: &ShardId, score: u32, payload: &str) -> Result<()> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(shard, score, payload).await
    }

    async fn predecessor(&self, shard: &ShardId, score: u32) -> Result<Option<String>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.predecessor(shard, score).await
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// 所有往返都失败的索引，模拟存储不可用
pub struct UnavailableIndex;

#[async_trait]
impl RangeIndex for UnavailableIndex {
    async fn insert(&self, _shard: &ShardId, _score: u32, _payload: &str) -> Result<()> {
        Err(IpLocationsError::store_connection("connection refused"))
    }

    async fn predecessor(&self, _shard: &ShardId, _score: u32) -> Result<Option<String>> {
        Err(IpLocationsError::store_connection("connection refused"))
    }

    async fn ping(&self) -> Result<()> {
        Err(IpLocationsError::store_connection("connection refused"))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

pub fn memory_store() -> IpRangeStore {
    IpRangeStore::new(Arc::new(MemoryRangeIndex::new()))
}

pub fn counting_store() -> (IpRangeStore, Arc<CountingIndex>) {
    let index = Arc::new(CountingIndex::default());
    (IpRangeStore::new(index.clone()), index)
}

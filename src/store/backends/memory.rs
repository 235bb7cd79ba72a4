use std::collections::BTreeSet;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::trace;

use crate::errors::Result;
use crate::store::index::RangeIndex;
use crate::store::shard::ShardId;

/// 进程内的范围索引
///
/// 每个分片一个 `BTreeSet<(score, payload)>`，语义与 Redis sorted set 相同：
/// 相同 (score, payload) 只保留一份，相同 score 按 payload 排序。
/// score 用 u64 存放，方便构造 `score + 1` 的开区间上界。
#[derive(Default)]
pub struct MemoryRangeIndex {
    shards: DashMap<ShardId, BTreeSet<(u64, String)>>,
}

impl MemoryRangeIndex {
    pub fn new() -> Self {
        Self {
            shards: DashMap::new(),
        }
    }

    /// 分片中的条目数
    pub fn shard_len(&self, shard: &ShardId) -> usize {
        self.shards.get(shard).map(|set| set.len()).unwrap_or(0)
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }
}

#[async_trait]
impl RangeIndex for MemoryRangeIndex {
    async fn insert(&self, shard: &ShardId, score: u32, payload: &str) -> Result<()> {
        let inserted = self
            .shards
            .entry(shard.clone())
            .or_default()
            .insert((u64::from(score), payload.to_string()));
        trace!(
            "MemoryRangeIndex insert shard={} score={} new={}",
            shard, score, inserted
        );
        Ok(())
    }

    async fn predecessor(&self, shard: &ShardId, score: u32) -> Result<Option<String>> {
        let Some(set) = self.shards.get(shard) else {
            return Ok(None);
        };

        let upper = (u64::from(score) + 1, String::new());
        Ok(set
            .range(..upper)
            .next_back()
            .map(|(_, payload)| payload.clone()))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

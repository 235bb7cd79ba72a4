use async_trait::async_trait;

use crate::errors::Result;
use crate::store::shard::ShardId;

/// 有序范围索引（按分片划分的 score → payload 多重集合）
///
/// 同一分片内允许多个条目使用相同 score；相同 score 的条目按 payload
/// 字典序排列，与 Redis sorted set 一致。
#[async_trait]
pub trait RangeIndex: Send + Sync {
    /// 写入一个条目
    async fn insert(&self, shard: &ShardId, score: u32, payload: &str) -> Result<()>;

    /// 返回分片内 score <= `score` 的最大条目
    async fn predecessor(&self, shard: &ShardId, score: u32) -> Result<Option<String>>;

    /// 连通性检查（用于健康检查和启动）
    async fn ping(&self) -> Result<()>;

    /// 后端名称（用于日志）
    fn name(&self) -> &'static str;
}

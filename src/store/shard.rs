//! 分片键推导
//!
//! 序数左补零到 10 位十进制（`u32::MAX` = 4294967295 正好 10 位），
//! 取前 3 位作为分片 ID。每个分片覆盖一段连续的十进制区间
//! `[p * 10^7, p * 10^7 + 9_999_999]`，最后一个分片 `429` 截断到 `u32::MAX`。
//!
//! 分片 ID 会出现在持久化的 key 中，改动推导方式等于改动存储布局。

use std::fmt;

/// 序数补零后的宽度
pub const ORDINAL_WIDTH: usize = 10;
/// 分片前缀长度
pub const SHARD_PREFIX_LEN: usize = 3;

/// 每个分片覆盖的序数个数（10^(10-3)）
const SHARD_SPAN: u64 = 10u64.pow((ORDINAL_WIDTH - SHARD_PREFIX_LEN) as u32);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShardId(String);

impl ShardId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 分片覆盖的闭区间 `[lower, upper]`
    pub fn bounds(&self) -> (u32, u32) {
        // ShardId 只能由 shard_for 构造，前缀必然是合法数字
        let prefix: u64 = self.0.parse().unwrap_or(0);
        let lower = prefix * SHARD_SPAN;
        let upper = (lower + SHARD_SPAN - 1).min(u64::from(u32::MAX));
        (lower as u32, upper as u32)
    }

    #[inline]
    pub fn contains(&self, ordinal: u32) -> bool {
        let (lower, upper) = self.bounds();
        lower <= ordinal && ordinal <= upper
    }
}

impl fmt::Display for ShardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 计算序数所属分片
pub fn shard_for(ordinal: u32) -> ShardId {
    let padded = format!("{:0width$}", ordinal, width = ORDINAL_WIDTH);
    ShardId(padded[..SHARD_PREFIX_LEN].to_string())
}

/// `[start, end]` 是否落在同一个分片内
#[inline]
pub fn same_shard(start: u32, end: u32) -> bool {
    shard_for(start) == shard_for(end)
}

//! IP 范围存储
//!
//! - `shard`: 序数 → 分片 ID
//! - `range`: 范围实体与 payload 编解码
//! - `index`: 范围索引抽象（Redis / 内存）
//! - `resolver`: 加载与查询

pub mod backends;
pub mod index;
pub mod range;
pub mod resolver;
pub mod seed;
pub mod shard;

pub use backends::{MemoryRangeIndex, RangeIndexFactory, RedisRangeIndex};
pub use index::RangeIndex;
pub use range::IpRange;
pub use resolver::{IpRangeStore, LoadOutcome, Lookup, WarmUpReport};
pub use seed::{SeedRange, builtin_seed, read_seed_file, resolve_seed};
pub use shard::{ShardId, shard_for};

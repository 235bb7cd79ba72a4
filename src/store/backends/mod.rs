pub mod memory;
pub mod redis;

use std::sync::Arc;

use tracing::info;

use crate::config::StaticConfig;
use crate::errors::{IpLocationsError, Result};
use crate::store::index::RangeIndex;

pub use memory::MemoryRangeIndex;
pub use self::redis::RedisRangeIndex;

pub struct RangeIndexFactory;

impl RangeIndexFactory {
    /// 根据 `store.backend` 创建范围索引
    pub async fn create(config: &StaticConfig) -> Result<Arc<dyn RangeIndex>> {
        let index: Arc<dyn RangeIndex> = match config.store.backend.as_str() {
            "redis" => Arc::new(RedisRangeIndex::connect(&config.redis).await?),
            "memory" => Arc::new(MemoryRangeIndex::new()),
            other => {
                return Err(IpLocationsError::store_plugin_not_found(format!(
                    "Unknown store backend: '{}'. Valid: redis, memory",
                    other
                )));
            }
        };

        info!("Using range index backend: {}", index.name());
        Ok(index)
    }
}

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::{SeedConfig, StaticConfig};
use crate::runtime::lifetime::Readiness;
use crate::store::{IpRangeStore, RangeIndexFactory, WarmUpReport, resolve_seed};

pub struct StartupContext {
    pub store: Arc<IpRangeStore>,
    pub readiness: Readiness,
}

/// 创建范围索引并包装为 IpRangeStore
///
/// 连接在这里建立一次，之后通过 Arc 共享；最后一个引用释放时连接随之关闭。
pub async fn build_store(config: &StaticConfig) -> Result<Arc<IpRangeStore>> {
    let index = RangeIndexFactory::create(config)
        .await
        .context("Failed to create range index")?;

    let store = IpRangeStore::new(index).with_overlap_check(config.store.reject_overlaps);
    if !config.store.reject_overlaps {
        warn!("Overlap check is disabled, overlapping ranges will resolve unpredictably");
    }
    Ok(Arc::new(store))
}

/// 加载种子数据，任何一条失败都让启动失败
pub async fn warm_up_store(store: &IpRangeStore, seed: &SeedConfig) -> Result<WarmUpReport> {
    let seeds = resolve_seed(seed).context("Failed to read seed ranges")?;
    debug!("Warming up with {} seed ranges", seeds.len());

    store
        .warm_up(&seeds)
        .await
        .context("Failed to load seed ranges")
}

/// 准备服务器启动的上下文
///
/// 只建立存储连接，readiness 保持 not-ready，预热交给 [`finish_startup`]。
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    debug!("Starting pre-startup processing...");

    let store = build_store(config).await?;

    Ok(StartupContext {
        store,
        readiness: Readiness::new(),
    })
}

/// 预热完成后切换为 ready；失败时保持 not-ready
pub async fn finish_startup(startup: &StartupContext, config: &StaticConfig) -> Result<()> {
    let start_time = std::time::Instant::now();

    if config.seed.enabled {
        warm_up_store(&startup.store, &config.seed).await?;
    } else {
        info!("Seed warm-up is disabled by configuration");
    }
    startup.readiness.mark_ready();

    debug!(
        "Warm-up completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> StaticConfig {
        let mut config = StaticConfig::default();
        config.store.backend = "memory".to_string();
        config
    }

    #[tokio::test]
    async fn test_ready_only_after_warm_up() {
        let config = memory_config();
        let startup = prepare_server_startup(&config).await.unwrap();

        assert!(!startup.readiness.is_ready());
        assert_eq!(startup.store.resolve("1.160.0.0").await.unwrap(), None);

        finish_startup(&startup, &config).await.unwrap();

        assert!(startup.readiness.is_ready());
        assert_eq!(
            startup.store.resolve("1.160.0.0").await.unwrap().as_deref(),
            Some("TW")
        );
    }

    #[tokio::test]
    async fn test_warm_up_disabled() {
        let mut config = memory_config();
        config.seed.enabled = false;

        let startup = prepare_server_startup(&config).await.unwrap();
        finish_startup(&startup, &config).await.unwrap();

        assert!(startup.readiness.is_ready());
        assert_eq!(startup.store.resolve("1.160.0.0").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_bad_seed_file_keeps_not_ready() {
        let mut config = memory_config();
        config.seed.file = Some("/nonexistent/ranges.csv".to_string());

        let startup = prepare_server_startup(&config).await.unwrap();

        assert!(finish_startup(&startup, &config).await.is_err());
        assert!(!startup.readiness.is_ready());
    }

    #[tokio::test]
    async fn test_unknown_backend_fails_startup() {
        let mut config = memory_config();
        config.store.backend = "sled".to_string();

        assert!(build_store(&config).await.is_err());
    }
}

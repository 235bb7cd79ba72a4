//! Redis sorted set 实现
//!
//! 每个分片一个 sorted set：`{key_prefix}ip2country:{shard}`，
//! score 为 start 序数，member 为 `{start_ip}-{end_ip}:{country}`。

use std::sync::Arc;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use tokio::sync::RwLock;
use tracing::{debug, error, trace};

use crate::config::RedisConfig;
use crate::errors::{IpLocationsError, Result};
use crate::store::index::RangeIndex;
use crate::store::shard::ShardId;

const INDEX_KEY: &str = "ip2country";

pub struct RedisRangeIndex {
    client: redis::Client,
    /// 持久化连接，使用 RwLock 保护
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
    key_prefix: String,
}

impl RedisRangeIndex {
    /// 创建客户端并 PING 一次，连不上直接失败
    pub async fn connect(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            IpLocationsError::config(format!("Invalid Redis URL '{}': {}", config.url, e))
        })?;

        let index = Self {
            client,
            connection: Arc::new(RwLock::new(None)),
            key_prefix: config.key_prefix.clone(),
        };

        index.ping().await.map_err(|e| {
            error!(
                "Failed to ping Redis server: {}. Check Redis server status and URL: {}",
                e, config.url
            );
            e
        })?;

        debug!(
            "RedisRangeIndex created with prefix: '{}'",
            index.key_prefix
        );
        Ok(index)
    }

    /// 获取或建立持久连接
    async fn get_connection(&self) -> Result<MultiplexedConnection> {
        {
            let conn_guard = self.connection.read().await;
            if let Some(ref conn) = *conn_guard {
                return Ok(conn.clone());
            }
        }

        let mut conn_guard = self.connection.write().await;

        // 双重检查，避免竞态条件
        if let Some(ref conn) = *conn_guard {
            return Ok(conn.clone());
        }

        let new_conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| IpLocationsError::store_connection(e.to_string()))?;
        *conn_guard = Some(new_conn.clone());
        debug!("Redis connection established and cached");

        Ok(new_conn)
    }

    /// 重置连接（在连接错误时调用），下一次调用会重新建立
    async fn reset_connection(&self) {
        let mut conn_guard = self.connection.write().await;
        *conn_guard = None;
        debug!("Redis connection reset due to error");
    }

    pub fn make_key(&self, shard: &ShardId) -> String {
        format!("{}{}:{}", self.key_prefix, INDEX_KEY, shard)
    }

    /// 执行一次往返，失败时重置连接并原样返回错误（不重试）
    async fn query<T: redis::FromRedisValue>(&self, cmd: redis::Cmd) -> Result<T> {
        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                return Err(e);
            }
        };

        match cmd.query_async::<T>(&mut conn).await {
            Ok(value) => Ok(value),
            Err(e) => {
                self.reset_connection().await;
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl RangeIndex for RedisRangeIndex {
    async fn insert(&self, shard: &ShardId, score: u32, payload: &str) -> Result<()> {
        let key = self.make_key(shard);

        let mut cmd = redis::cmd("ZADD");
        cmd.arg(&key).arg(score).arg(payload);

        let added: i64 = self.query(cmd).await.map_err(|e| {
            error!("Failed to ZADD '{}' into '{}': {}", payload, key, e);
            e
        })?;
        trace!("ZADD {} {} {} -> {}", key, score, payload, added);
        Ok(())
    }

    async fn predecessor(&self, shard: &ShardId, score: u32) -> Result<Option<String>> {
        let key = self.make_key(shard);

        let mut cmd = redis::cmd("ZREVRANGEBYSCORE");
        cmd.arg(&key)
            .arg(score)
            .arg("-inf")
            .arg("LIMIT")
            .arg(0)
            .arg(1);

        let members: Vec<String> = self.query(cmd).await.map_err(|e| {
            error!("Failed to query predecessor in '{}': {}", key, e);
            e
        })?;
        trace!("ZREVRANGEBYSCORE {} {} -> {:?}", key, score, members);
        Ok(members.into_iter().next())
    }

    async fn ping(&self) -> Result<()> {
        let response: String = self.query(redis::cmd("PING")).await?;
        trace!("Redis PING -> {}", response);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::shard::shard_for;

    fn test_config() -> RedisConfig {
        RedisConfig {
            url: std::env::var("IPL_TEST_REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379/".to_string()),
            key_prefix: format!("iplocations-test-{}:", std::process::id()),
        }
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_url() {
        let config = RedisConfig {
            url: "not a url".to_string(),
            key_prefix: "x:".to_string(),
        };
        let err = RedisRangeIndex::connect(&config).await.err().unwrap();
        assert!(matches!(err, IpLocationsError::Config(_)));
    }

    /// 需要本地 Redis
    #[tokio::test]
    #[ignore]
    async fn test_redis_predecessor() {
        let index = RedisRangeIndex::connect(&test_config()).await.unwrap();
        let shard = shard_for(16_777_472);

        index
            .insert(&shard, 16_777_472, "1.0.1.0-1.0.3.255:CN")
            .await
            .unwrap();

        assert_eq!(index.predecessor(&shard, 16_777_471).await.unwrap(), None);
        assert_eq!(
            index.predecessor(&shard, 16_777_500).await.unwrap().as_deref(),
            Some("1.0.1.0-1.0.3.255:CN")
        );

        let mut conn = index.get_connection().await.unwrap();
        let _: i64 = redis::cmd("DEL")
            .arg(index.make_key(&shard))
            .query_async(&mut conn)
            .await
            .unwrap();
    }

    #[test]
    fn test_key_layout() {
        let client = redis::Client::open("redis://127.0.0.1:6379/").unwrap();
        let index = RedisRangeIndex {
            client,
            connection: Arc::new(RwLock::new(None)),
            key_prefix: "iplocations:".to_string(),
        };
        assert_eq!(index.make_key(&shard_for(27_262_976)), "iplocations:ip2country:002");
    }
}

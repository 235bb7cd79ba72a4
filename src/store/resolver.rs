//! IP 范围解析
//!
//! 查询把"地址落在哪个范围"归约为"分片内 start <= 地址的最大条目"，
//! 然后只需检查该条目的 end。正确性依赖两个前提：已加载范围两两不相交，
//! 且单个范围不跨分片。这两点都在 [`IpRangeStore::load_range`] 中检查。

use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::errors::{IpLocationsError, Result};
use crate::store::index::RangeIndex;
use crate::store::range::IpRange;
use crate::store::seed::SeedRange;
use crate::store::shard::{same_shard, shard_for};
use crate::utils::encode;

/// 查询结果（内部区分 not-found 的原因，便于排查）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// 命中
    Found(IpRange),
    /// 输入不是合法 IPv4，未访问存储
    InvalidIp,
    /// 分片内没有 start <= 地址的条目
    NoCandidate,
    /// 最近的前驱范围存在，但地址在它的 end 之后
    OutsideRange(IpRange),
}

impl Lookup {
    pub fn into_country(self) -> Option<String> {
        match self {
            Lookup::Found(range) => Some(range.country),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Inserted,
    /// 完全相同的条目已存在，未写入
    AlreadyPresent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarmUpReport {
    pub inserted: usize,
    pub already_present: usize,
}

impl WarmUpReport {
    pub fn total(&self) -> usize {
        self.inserted + self.already_present
    }
}

#[derive(Clone)]
pub struct IpRangeStore {
    index: Arc<dyn RangeIndex>,
    reject_overlaps: bool,
}

impl IpRangeStore {
    pub fn new(index: Arc<dyn RangeIndex>) -> Self {
        Self {
            index,
            reject_overlaps: true,
        }
    }

    /// 关闭重叠检查后 `load` 只有一次写入往返
    pub fn with_overlap_check(mut self, enabled: bool) -> Self {
        self.reject_overlaps = enabled;
        self
    }

    pub fn backend_name(&self) -> &'static str {
        self.index.name()
    }

    pub async fn ping(&self) -> Result<()> {
        self.index.ping().await
    }

    /// 加载一个范围
    pub async fn load(&self, start_ip: &str, end_ip: &str, country: &str) -> Result<LoadOutcome> {
        let range = IpRange::new(start_ip, end_ip, country)?;
        self.load_range(&range).await
    }

    pub async fn load_range(&self, range: &IpRange) -> Result<LoadOutcome> {
        let shard = range.shard();
        if !same_shard(range.start, range.end) {
            let end_shard = shard_for(range.end);
            return Err(IpLocationsError::shard_span(format!(
                "Range {} starts in shard {} but ends in shard {}",
                range, shard, end_shard
            )));
        }

        let payload = range.payload();

        if self.reject_overlaps
            && let Some(existing) = self.index.predecessor(&shard, range.end).await?
        {
            if existing == payload {
                debug!("Range {} already loaded in shard {}", payload, shard);
                return Ok(LoadOutcome::AlreadyPresent);
            }

            let existing = IpRange::from_payload(&existing)?;
            // 同一范围的不同写法（如 001.160.000.000），保留已存文本
            if existing.same_extent(range) {
                debug!(
                    "Range {} already loaded as {} in shard {}",
                    payload,
                    existing.payload(),
                    shard
                );
                return Ok(LoadOutcome::AlreadyPresent);
            }
            if existing.overlaps(range) {
                return Err(IpLocationsError::range_overlap(format!(
                    "Range {} overlaps loaded range {}",
                    range, existing
                )));
            }
        }

        self.index.insert(&shard, range.start, &payload).await?;
        debug!("Loaded range {} into shard {}", payload, shard);
        Ok(LoadOutcome::Inserted)
    }

    /// 解析 IP 所属范围
    pub async fn lookup(&self, ip: &str) -> Result<Lookup> {
        let Some(ordinal) = encode(ip) else {
            trace!("Rejected malformed IP without store access: {:?}", ip);
            return Ok(Lookup::InvalidIp);
        };

        let shard = shard_for(ordinal);
        let Some(payload) = self.index.predecessor(&shard, ordinal).await? else {
            trace!("No range starts at or below {} in shard {}", ip, shard);
            return Ok(Lookup::NoCandidate);
        };

        let range = IpRange::from_payload(&payload)?;
        if range.contains(ordinal) {
            trace!("{} resolved to {} via {}", ip, range.country, payload);
            Ok(Lookup::Found(range))
        } else {
            trace!("{} falls in the gap after {}", ip, payload);
            Ok(Lookup::OutsideRange(range))
        }
    }

    /// 返回国家代码；非法输入和无匹配都是 `Ok(None)`，存储故障是 `Err`
    pub async fn resolve(&self, ip: &str) -> Result<Option<String>> {
        Ok(self.lookup(ip).await?.into_country())
    }

    /// 启动时顺序加载种子数据，遇到第一个错误立即返回
    pub async fn warm_up(&self, seeds: &[SeedRange]) -> Result<WarmUpReport> {
        let mut report = WarmUpReport::default();

        for seed in seeds {
            match self
                .load(&seed.start_ip, &seed.end_ip, &seed.country)
                .await?
            {
                LoadOutcome::Inserted => report.inserted += 1,
                LoadOutcome::AlreadyPresent => report.already_present += 1,
            }
        }

        info!(
            "Warm-up loaded {} ranges ({} new, {} already present)",
            report.total(),
            report.inserted,
            report.already_present
        );
        Ok(report)
    }
}

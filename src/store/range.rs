use std::fmt;

use crate::errors::{IpLocationsError, Result};
use crate::store::shard::{ShardId, shard_for};
use crate::utils::encode;

/// 一条 `[start, end] -> country` 记录
///
/// `start_ip` / `end_ip` 保留调用方传入的原始文本，payload 中写的是原文，
/// 不是由序数重新渲染的地址，这样已有数据可以逐字节对上。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpRange {
    pub start_ip: String,
    pub end_ip: String,
    pub start: u32,
    pub end: u32,
    pub country: String,
}

impl IpRange {
    /// 校验并构造
    ///
    /// 不检查分片跨越和重叠，那两项需要 store 上下文，见 `IpRangeStore::load`。
    pub fn new(start_ip: &str, end_ip: &str, country: &str) -> Result<Self> {
        let start = encode(start_ip).ok_or_else(|| {
            IpLocationsError::validation(format!("Invalid start IP: '{}'", start_ip))
        })?;
        let end = encode(end_ip).ok_or_else(|| {
            IpLocationsError::validation(format!("Invalid end IP: '{}'", end_ip))
        })?;

        if start > end {
            return Err(IpLocationsError::validation(format!(
                "Range start {} is greater than end {}",
                start_ip, end_ip
            )));
        }

        validate_country(country)?;

        Ok(Self {
            start_ip: start_ip.to_string(),
            end_ip: end_ip.to_string(),
            start,
            end,
            country: country.to_string(),
        })
    }

    /// 存储格式：`{start_ip}-{end_ip}:{country}`
    pub fn payload(&self) -> String {
        format!("{}-{}:{}", self.start_ip, self.end_ip, self.country)
    }

    /// 解析存储中的 payload
    pub fn from_payload(payload: &str) -> Result<Self> {
        let corrupt =
            || IpLocationsError::corrupt_entry(format!("Malformed range entry: '{}'", payload));

        let (ips, country) = payload.split_once(':').ok_or_else(corrupt)?;
        let (start_ip, end_ip) = ips.split_once('-').ok_or_else(corrupt)?;

        Self::new(start_ip, end_ip, country).map_err(|_| corrupt())
    }

    /// 分片由 start 决定
    pub fn shard(&self) -> ShardId {
        shard_for(self.start)
    }

    #[inline]
    pub fn contains(&self, ordinal: u32) -> bool {
        self.start <= ordinal && ordinal <= self.end
    }

    /// 序数区间和国家相同，不比较原始文本
    pub fn same_extent(&self, other: &IpRange) -> bool {
        self.start == other.start && self.end == other.end && self.country == other.country
    }

    #[inline]
    pub fn overlaps(&self, other: &IpRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for IpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.payload())
    }
}

/// 国家代码原样写入 payload，只允许 ASCII 字母数字
fn validate_country(country: &str) -> Result<()> {
    if country.is_empty() {
        return Err(IpLocationsError::validation("Country code cannot be empty"));
    }
    if !country.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(IpLocationsError::validation(format!(
            "Invalid country code: '{}'",
            country
        )));
    }
    Ok(())
}

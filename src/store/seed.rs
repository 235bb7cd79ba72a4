//! 种子数据
//!
//! 未配置 `seed.file` 时使用内置列表；配置后从 CSV 读取
//! （表头 `start_ip,end_ip,country`）。

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::debug;

use crate::config::SeedConfig;
use crate::errors::{IpLocationsError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedRange {
    pub start_ip: String,
    pub end_ip: String,
    pub country: String,
}

impl SeedRange {
    pub fn new(start_ip: &str, end_ip: &str, country: &str) -> Self {
        Self {
            start_ip: start_ip.to_string(),
            end_ip: end_ip.to_string(),
            country: country.to_string(),
        }
    }
}

const BUILTIN_SEED: &[(&str, &str, &str)] = &[
    ("1.160.0.0", "1.175.255.255", "TW"),
    ("100.42.20.0", "100.42.23.255", "CA"),
    ("1.0.1.0", "1.0.3.255", "CN"),
    ("1.0.32.0", "1.0.63.255", "CN"),
];

pub fn builtin_seed() -> Vec<SeedRange> {
    BUILTIN_SEED
        .iter()
        .map(|(start, end, country)| SeedRange::new(start, end, country))
        .collect()
}

/// 从 CSV 文件读取种子范围
pub fn read_seed_file<P: AsRef<Path>>(path: P) -> Result<Vec<SeedRange>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        IpLocationsError::file_operation(format!(
            "Failed to open seed file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let mut seeds = Vec::new();
    for (row, record) in reader.deserialize::<SeedRange>().enumerate() {
        let seed = record.map_err(|e| {
            IpLocationsError::serialization(format!(
                "Invalid seed row {} in '{}': {}",
                row + 1,
                path.display(),
                e
            ))
        })?;
        seeds.push(seed);
    }

    debug!("Read {} seed ranges from {}", seeds.len(), path.display());
    Ok(seeds)
}

/// 按配置选择种子来源
pub fn resolve_seed(config: &SeedConfig) -> Result<Vec<SeedRange>> {
    match config.file.as_deref() {
        Some(path) if !path.is_empty() => read_seed_file(path),
        _ => Ok(builtin_seed()),
    }
}

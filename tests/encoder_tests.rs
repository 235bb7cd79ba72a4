//! IPv4 encoder and shard derivation tests

use std::net::Ipv4Addr;

use iplocations::store::shard_for;
use iplocations::utils::{decode, encode, is_valid_ipv4};

#[test]
fn test_encode_known_values() {
    assert_eq!(encode("0.0.0.0"), Some(0));
    assert_eq!(encode("0.0.0.1"), Some(1));
    assert_eq!(encode("0.0.1.0"), Some(256));
    assert_eq!(encode("1.0.0.0"), Some(16_777_216));
    assert_eq!(encode("1.160.0.0"), Some(27_262_976));
    assert_eq!(encode("255.255.255.255"), Some(u32::MAX));
}

#[test]
fn test_encode_decode_is_a_bijection_on_samples() {
    let mut ordinal: u32 = 0;
    // 步长取素数，覆盖各个八位组
    loop {
        let text = decode(ordinal);
        assert_eq!(encode(&text), Some(ordinal), "{}", text);
        assert_eq!(text, Ipv4Addr::from(ordinal).to_string());

        match ordinal.checked_add(104_729) {
            Some(next) => ordinal = next,
            None => break,
        }
    }
    assert_eq!(encode(&decode(u32::MAX)), Some(u32::MAX));
}

#[test]
fn test_encode_preserves_order() {
    let ordered = [
        "0.0.0.0",
        "0.0.0.255",
        "0.0.1.0",
        "1.0.1.0",
        "1.0.3.255",
        "1.0.32.0",
        "1.160.0.0",
        "100.42.20.0",
        "255.255.255.255",
    ];
    let ordinals: Vec<u32> = ordered.iter().map(|ip| encode(ip).unwrap()).collect();
    assert!(ordinals.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_malformed_inputs() {
    for text in [
        "",
        "not.an.ip",
        "192.168.0",
        "192.168.0.1.5",
        "127.0.0.-1",
        "256.0.0.0",
        "255.255.256.255",
        "1..2.3",
        "1.2.3.",
        " 1.2.3.4",
        "1.2.3.4 ",
        "1.2.3.0001",
        "+1.2.3.4",
        "１.2.3.4",
    ] {
        assert_eq!(encode(text), None, "{:?}", text);
        assert!(!is_valid_ipv4(text));
    }
}

#[test]
fn test_leading_zeros_are_accepted() {
    assert_eq!(encode("001.002.003.004"), encode("1.2.3.4"));
    assert_eq!(encode("010.0.0.0"), Some(10 << 24));
}

#[test]
fn test_shard_ids() {
    assert_eq!(shard_for(0).as_str(), "000");
    assert_eq!(shard_for(9_999_999).as_str(), "000");
    assert_eq!(shard_for(10_000_000).as_str(), "001");
    assert_eq!(shard_for(encode("1.160.0.0").unwrap()).as_str(), "002");
    assert_eq!(shard_for(encode("100.42.20.0").unwrap()).as_str(), "168");
    assert_eq!(shard_for(u32::MAX).as_str(), "429");
}

#[test]
fn test_shard_bounds_cover_members() {
    for ordinal in [0, 9_999_999, 10_000_000, 27_262_976, 4_290_000_000, u32::MAX] {
        let shard = shard_for(ordinal);
        let (low, high) = shard.bounds();
        assert!(low <= ordinal && ordinal <= high);
        assert!(shard.contains(ordinal));
        assert_eq!(shard_for(low), shard);
        assert_eq!(shard_for(high), shard);
    }
    assert_eq!(shard_for(u32::MAX).bounds(), (4_290_000_000, u32::MAX));
}

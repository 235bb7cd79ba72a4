//! IPv4 文本与序数（ordinal）之间的转换
//!
//! 序数是地址的 32 位大端无符号整数表示，全序，用作范围索引的 score。
//! 解析规则刻意比 [`std::net::Ipv4Addr`] 宽松一点：每段允许 1~3 位
//! 十进制数字（含前导零，如 `010`），但不允许符号、空段或多余字符。

use std::net::Ipv4Addr;

/// 单段最多 3 位数字
const MAX_OCTET_DIGITS: usize = 3;

/// 将点分十进制字符串编码为序数
///
/// 非法输入返回 `None`（非法输入是预期情况，不是错误）。
///
/// # Examples
/// ```
/// use iplocations::utils::encode;
/// assert_eq!(encode("0.0.0.0"), Some(0));
/// assert_eq!(encode("255.255.255.255"), Some(u32::MAX));
/// assert_eq!(encode("192.168.0"), None);
/// ```
pub fn encode(text: &str) -> Option<u32> {
    let mut ordinal: u32 = 0;
    let mut parts = text.split('.');

    for shift in [24u32, 16, 8, 0] {
        let octet = parse_octet(parts.next()?)?;
        ordinal |= u32::from(octet) << shift;
    }

    // 第五段
    if parts.next().is_some() {
        return None;
    }

    Some(ordinal)
}

/// 解析单个 octet：1~3 位 ASCII 数字，值不超过 255
#[inline]
fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty() || part.len() > MAX_OCTET_DIGITS {
        return None;
    }
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let value = part
        .bytes()
        .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'));
    u8::try_from(value).ok()
}

/// 将序数还原为规范的点分十进制字符串（不带前导零）
pub fn decode(ordinal: u32) -> String {
    Ipv4Addr::from(ordinal).to_string()
}

#[inline]
pub fn is_valid_ipv4(text: &str) -> bool {
    encode(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_valid() {
        let cases = [
            ("192.168.0.1", 3232235521u32),
            ("127.0.0.1", 2130706433),
            ("10.0.0.1", 167772161),
            ("0.0.0.0", 0),
            ("255.255.255.255", 4294967295),
        ];
        for (ip, expected) in cases {
            assert_eq!(encode(ip), Some(expected), "ip: {}", ip);
        }
    }

    #[test]
    fn test_encode_invalid() {
        let cases = [
            "192.168.0",
            "127.0",
            "10",
            "127.0.0.-1",
            "127.0.-5.1",
            "127.-3.0.1",
            "-127.3.0.1",
            "255.255.256.255",
            "+1.2.3.4",
            "1.2.3.4.5",
            "1..3.4",
            "1.2.3.4 ",
            " 1.2.3.4",
            "1.2.3.",
            "1.2.3.1000",
            "not.an.ip",
            "",
            "１.2.3.4",
        ];
        for ip in cases {
            assert_eq!(encode(ip), None, "ip: {:?}", ip);
        }
    }

    #[test]
    fn test_encode_accepts_leading_zeros() {
        assert_eq!(encode("010.000.001.001"), encode("10.0.1.1"));
        assert_eq!(encode("001.160.000.000"), Some(27262976));
    }

    #[test]
    fn test_decode_matches_std() {
        assert_eq!(decode(0), "0.0.0.0");
        assert_eq!(decode(u32::MAX), "255.255.255.255");
        assert_eq!(decode(27262976), "1.160.0.0");
    }

    #[test]
    fn test_encode_agrees_with_std_ordering() {
        let samples = ["1.0.1.0", "1.0.3.255", "1.160.0.0", "100.42.20.0", "223.255.255.0"];
        for ip in samples {
            let std_value = u32::from(ip.parse::<Ipv4Addr>().unwrap());
            assert_eq!(encode(ip), Some(std_value));
        }
    }
}

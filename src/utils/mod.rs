pub mod ip;

pub use ip::{decode, encode, is_valid_ipv4};

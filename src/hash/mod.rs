//! 哈希模块 - 统一管理哈希相关功能

pub mod strategy;
pub mod crc32;
pub mod seeded;
pub mod constant;

pub use strategy::{
    hash_strategy, ByteEq, FnStrategy, HashAlgorithm, HashStrategy, HasherFunction, KeyComparator,
};
pub use crc32::{crc32_checksum, Crc32Strategy};
pub use seeded::SeededStrategy;
pub use constant::ConstantStrategy;

/// 默认哈希策略 (CRC-32)
pub fn default_hash_strategy() -> Box<dyn HashStrategy> {
    hash_strategy(HashAlgorithm::Crc32)
}

/// 哈希值映射到桶下标
#[inline]
pub fn calculate_bucket(hash: u64, bucket_count: usize) -> usize {
    (hash % bucket_count as u64) as usize
}

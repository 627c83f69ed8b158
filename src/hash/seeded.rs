//! 带种子的哈希策略 - ahash / xxhash / SipHash

use crate::hash::strategy::{HashAlgorithm, HashStrategy, HasherFunction};
use ahash::RandomState;
use std::{
    hash::{BuildHasher, Hash, Hasher},
    sync::Arc,
};

/// 默认种子
const DEFAULT_SEED: usize = 42;

/// 基于通用哈希库的策略
#[derive(Clone)]
pub struct SeededStrategy {
    hasher: Arc<dyn HasherFunction>,
    algorithm: HashAlgorithm,
}

impl SeededStrategy {
    /// 使用默认种子创建
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self::with_seed(algorithm, DEFAULT_SEED)
    }

    /// 使用指定种子创建
    ///
    /// `HashAlgorithm::Crc32` 没有种子, 此处按原样计算CRC-32。
    pub fn with_seed(algorithm: HashAlgorithm, seed: usize) -> Self {
        Self {
            hasher: Self::build_hasher_function(algorithm, seed),
            algorithm,
        }
    }

    /// 构建哈希函数
    fn build_hasher_function(algorithm: HashAlgorithm, seed: usize) -> Arc<dyn HasherFunction> {
        match algorithm {
            HashAlgorithm::AHash => {
                let state = RandomState::with_seed(seed);
                Arc::new(move |data: &[u8]| {
                    let mut hasher = state.build_hasher();
                    data.hash(&mut hasher);
                    hasher.finish()
                })
            }
            HashAlgorithm::XxHash => {
                let seed = seed as u64;
                Arc::new(move |data: &[u8]| {
                    let mut hasher = twox_hash::XxHash64::with_seed(seed);
                    hasher.write(data);
                    hasher.finish()
                })
            }
            HashAlgorithm::Default => Arc::new(|data: &[u8]| {
                let mut hasher = std::collections::hash_map::DefaultHasher::new();
                data.hash(&mut hasher);
                hasher.finish()
            }),
            HashAlgorithm::Crc32 => {
                Arc::new(|data: &[u8]| crate::hash::crc32::crc32_checksum(data) as u64)
            }
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

impl HashStrategy for SeededStrategy {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        self.hasher.hash_bytes(key)
    }

    fn name(&self) -> &'static str {
        self.algorithm.as_str()
    }
}

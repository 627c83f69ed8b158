//! 哈希表核心模块 - 链式哈希表及其组件

pub mod chain;
pub mod hash_table;
pub mod compactor;

pub use chain::{Chain, ChainIter, Node};
pub use compactor::{compact, CompactionFailed};
pub use hash_table::{HashTable, HashTableConfig, DEFAULT_BUCKET_COUNT};

use once_cell::sync::Lazy;

/// 全局默认配置
pub static DEFAULT_CONFIG: Lazy<HashTableConfig> = Lazy::new(HashTableConfig::default);

//! 定长链式哈希表 - 词典查找延迟基准
//!
//! 固定桶数的链式哈希表, 哈希函数与比较器可替换; 批量装载后可将全部键
//! 压缩到一块连续内存, 使沿链查找访问相邻地址, 并解除对源缓冲区的依赖。
//!
//! ## 主要特性
//! - 桶数在建表时确定, 不扩容、不删除、插入不去重
//! - 哈希策略通过 [`HashStrategy`] 注入, 默认 CRC-32
//! - 装载 / 压缩两阶段由类型区分, 压缩后的表只读
//! - 链长分布与查找耗时统计, 可导出 Prometheus 格式
//!
//! ## 快速开始
//!
//! ```rust
//! use chained_hashtable::*;
//!
//! let source = String::from("cat\ndog\ncow\nox\n");
//! let mut table = HashTable::new(7, Crc32Strategy).expect("建表失败");
//! table.extend_forced(dictionary::tokenize(source.as_bytes()));
//! assert!(table.find(b"dog"));
//!
//! // 压缩: 压缩区由调用方持有, 之后源缓冲区可以释放
//! let mut arena = KeyArena::for_table(&table).expect("分配失败");
//! let table = table.compact_into(&mut arena).expect("压缩失败");
//! drop(source);
//!
//! assert!(table.find(b"dog"));
//! assert!(!table.find(b"pig"));
//! ```

#![warn(clippy::all)]

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}

// 核心模块导出
pub mod error;
pub mod types;
pub mod hash;
pub mod map;
pub mod memory;
pub mod stats;
pub mod dictionary;
pub mod bench;

// 公共接口导出
pub use crate::{
    map::{
        compact,
        CompactionFailed,
        Chain,
        HashTable,
        HashTableConfig,
        DEFAULT_BUCKET_COUNT,
        DEFAULT_CONFIG,
    },
    hash::{
        hash_strategy,
        default_hash_strategy,
        ByteEq,
        ConstantStrategy,
        Crc32Strategy,
        FnStrategy,
        HashAlgorithm,
        HashStrategy,
        SeededStrategy,
    },
    memory::KeyArena,
    stats::{ChainStats, SearchReport},
    dictionary::Dictionary,
    error::HashTableError,
    types::{Compacted, Loaded, NodeId},
};

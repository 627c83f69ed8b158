//! 查找基准 - 装载词典、建表、压缩并反复查找
//!
//! 只是哈希表的调用方: 建表用 `insert_forced`, 计时只调用 `find`。

use crate::{
    dictionary::{Dictionary, DEFAULT_DICTIONARY_PATH, MAX_DICTIONARY_SIZE},
    error::HashTableError,
    hash::HashStrategy,
    map::{HashTable, HashTableConfig, DEFAULT_CONFIG},
    memory::KeyArena,
    stats::SearchReport,
    types::TablePhase,
};
use std::{hint::black_box, path::PathBuf, time::Instant};

/// 默认查找轮数
pub const DEFAULT_SEARCH_RUNS: usize = 5000;

/// 基准配置
#[derive(Clone, Debug, PartialEq)]
pub struct BenchConfig {
    pub dictionary_path: PathBuf,
    pub table: HashTableConfig,
    /// 完整遍历键序列的次数
    pub search_runs: usize,
    /// 词典条目上限
    pub max_dictionary_size: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            dictionary_path: PathBuf::from(DEFAULT_DICTIONARY_PATH),
            table: DEFAULT_CONFIG.clone(),
            search_runs: DEFAULT_SEARCH_RUNS,
            max_dictionary_size: MAX_DICTIONARY_SIZE,
        }
    }
}

impl BenchConfig {
    /// 校验配置
    pub fn validate(&self) -> Result<(), HashTableError> {
        if self.table.bucket_count == 0 {
            return Err(HashTableError::InvalidConfig {
                reason: "bucket_count 必须大于0".into(),
            });
        }
        if self.search_runs == 0 {
            return Err(HashTableError::InvalidConfig {
                reason: "search_runs 必须大于0".into(),
            });
        }
        if self.max_dictionary_size == 0 {
            return Err(HashTableError::InvalidConfig {
                reason: "max_dictionary_size 必须大于0".into(),
            });
        }
        Ok(())
    }
}

/// 按配置建表并按顺序装载键
pub fn build_table<'k>(
    config: &HashTableConfig,
    keys: &[&'k [u8]],
) -> Result<HashTable<'k, Box<dyn HashStrategy>>, HashTableError> {
    let mut table = HashTable::from_config(config)?;
    table.reserve(keys.len())?;
    table.extend_forced(keys.iter().copied());
    Ok(table)
}

/// 一轮查找: 每个键调用一次 `find`, 返回命中数
#[inline]
pub fn search_pass<S: HashStrategy, P: TablePhase>(
    table: &HashTable<'_, S, P>,
    keys: &[&[u8]],
) -> usize {
    keys.iter()
        .filter(|key| black_box(table.find(black_box(key))))
        .count()
}

/// 重复 `runs` 轮查找并计时
pub fn run_search<S: HashStrategy, P: TablePhase>(
    table: &HashTable<'_, S, P>,
    keys: &[&[u8]],
    runs: usize,
) -> SearchReport {
    let start = Instant::now();
    let mut hits = 0;
    for _ in 0..runs {
        hits = search_pass(table, keys);
    }
    let total = start.elapsed();

    SearchReport {
        runs,
        keys_per_pass: keys.len(),
        hits_per_pass: hits,
        total,
        chains: table.chain_stats(),
    }
}

/// 完整基准流程: 读取词典后交给 [`run_with_dictionary`]
pub fn run(config: &BenchConfig) -> Result<SearchReport, HashTableError> {
    config.validate()?;
    let dictionary = Dictionary::load(&config.dictionary_path)?;
    run_with_dictionary(&dictionary, config)
}

/// 建表、压缩、计时
///
/// 压缩区或压缩临时空间分配失败时表仍处于装载阶段, 此时记录警告并直接在
/// 未压缩的表上计时。
pub fn run_with_dictionary(
    dictionary: &Dictionary,
    config: &BenchConfig,
) -> Result<SearchReport, HashTableError> {
    config.validate()?;
    let lexis = dictionary.lexis_array(config.max_dictionary_size)?;
    let table = build_table(&config.table, &lexis)?;

    let report = match KeyArena::for_table(&table) {
        Ok(mut arena) => match table.compact_into(&mut arena) {
            Ok(table) => run_search(&table, &lexis, config.search_runs),
            Err(failed) => {
                crate::log_warn!("key compaction skipped: {}", failed.error);
                run_search(&failed.into_table(), &lexis, config.search_runs)
            }
        },
        Err(err) => {
            crate::log_warn!("key compaction skipped: {}", err);
            run_search(&table, &lexis, config.search_runs)
        }
    };

    crate::log_info!("{} ({:?})", report, report.chains);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashAlgorithm;

    fn small_config() -> BenchConfig {
        BenchConfig {
            table: HashTableConfig {
                bucket_count: 7,
                algorithm: HashAlgorithm::Crc32,
            },
            search_runs: 3,
            ..BenchConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = BenchConfig::default();
        assert_eq!(config.table, *DEFAULT_CONFIG);
        assert_eq!(config.table.bucket_count, 1907);
        assert_eq!(config.search_runs, 5000);
        assert_eq!(config.max_dictionary_size, 60_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_runs() {
        let config = BenchConfig {
            search_runs: 0,
            ..small_config()
        };
        assert!(matches!(config.validate(), Err(HashTableError::InvalidConfig { .. })));
    }

    #[test]
    fn test_search_pass_counts_hits() {
        let keys: [&[u8]; 3] = [b"cat", b"dog", b"cow"];
        let table = build_table(&small_config().table, &keys).unwrap();
        assert_eq!(search_pass(&table, &keys), 3);
        assert_eq!(search_pass(&table, &[&b"pig"[..], b"cat"]), 1);
    }

    #[test]
    fn test_run_with_dictionary() {
        let dictionary = Dictionary::from_bytes("cat\ndog\ncow\nox\n");
        let report = run_with_dictionary(&dictionary, &small_config()).unwrap();
        assert_eq!(report.runs, 3);
        assert_eq!(report.keys_per_pass, 4);
        assert_eq!(report.hits_per_pass, 4);
        assert_eq!(report.chains.entries, 4);
        assert_eq!(report.chains.bucket_count, 7);
    }

    #[test]
    fn test_run_missing_dictionary() {
        let config = BenchConfig {
            dictionary_path: PathBuf::from("no/such/dictionary.txt"),
            ..small_config()
        };
        assert!(matches!(run(&config), Err(HashTableError::Io { .. })));
    }
}

//! 词典查找基准
//!
//! 用法: `search [词典路径] [查找轮数] [--algorithm <名称>] [--buckets <桶数>] [--metrics]`
//! 哈希算法与桶数也可通过环境变量 `HASH_ALGORITHM` / `HASH_TABLE_SIZE` 指定。

use chained_hashtable::{
    bench::{self, BenchConfig, DEFAULT_SEARCH_RUNS},
    dictionary::{DEFAULT_DICTIONARY_PATH, MAX_DICTIONARY_SIZE},
    HashAlgorithm, HashTableConfig, DEFAULT_BUCKET_COUNT,
};
use clap::Parser;
use std::{path::PathBuf, process::ExitCode};

#[derive(Parser, Debug)]
#[command(name = "search")]
#[command(about = "定长链式哈希表词典查找基准")]
struct Cli {
    /// 词典文件, 每行一个键
    #[arg(default_value = DEFAULT_DICTIONARY_PATH)]
    dictionary_path: PathBuf,

    /// 完整遍历键序列的次数
    #[arg(default_value_t = DEFAULT_SEARCH_RUNS)]
    search_runs: usize,

    /// 哈希算法: crc32 / ahash / xxhash / siphash
    #[arg(long, env = "HASH_ALGORITHM", default_value = "crc32", value_parser = parse_algorithm)]
    algorithm: HashAlgorithm,

    /// 桶数量
    #[arg(long = "buckets", env = "HASH_TABLE_SIZE", default_value_t = DEFAULT_BUCKET_COUNT)]
    bucket_count: usize,

    /// 词典条目上限
    #[arg(long, default_value_t = MAX_DICTIONARY_SIZE)]
    max_dictionary_size: usize,

    /// 额外输出Prometheus格式指标
    #[arg(long)]
    metrics: bool,
}

fn parse_algorithm(name: &str) -> Result<HashAlgorithm, String> {
    HashAlgorithm::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = HashAlgorithm::ALL.iter().map(|a| a.as_str()).collect();
        format!("未知哈希算法: {name} (可选: {})", known.join(", "))
    })
}

impl Cli {
    fn bench_config(&self) -> BenchConfig {
        BenchConfig {
            dictionary_path: self.dictionary_path.clone(),
            table: HashTableConfig {
                bucket_count: self.bucket_count,
                algorithm: self.algorithm,
            },
            search_runs: self.search_runs,
            max_dictionary_size: self.max_dictionary_size,
        }
    }
}

fn main() -> ExitCode {
    #[cfg(feature = "logging")]
    env_logger::init();

    let cli = Cli::parse();
    match bench::run(&cli.bench_config()) {
        Ok(report) => {
            eprintln!("{report}");
            if cli.metrics {
                print!("{}", report.chains.export_prometheus());
                print!("{}", report.export_prometheus());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            if let Some(hint) = err.recovery_suggestion() {
                eprintln!("hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

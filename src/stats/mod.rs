//! 统计模块 - 链长分布与查找耗时

pub mod chain;
pub mod search;

pub use chain::ChainStats;
pub use search::SearchReport;

use std::fmt::Display;

/// 指标名前缀
pub const METRIC_PREFIX: &str = "chained_hashtable";

/// 追加一条Prometheus格式指标
pub(crate) fn push_metric(
    output: &mut String,
    name: &str,
    help: &str,
    kind: &str,
    value: impl Display,
) {
    output.push_str(&format!("# HELP {METRIC_PREFIX}_{name} {help}\n"));
    output.push_str(&format!("# TYPE {METRIC_PREFIX}_{name} {kind}\n"));
    output.push_str(&format!("{METRIC_PREFIX}_{name} {value}\n"));
}

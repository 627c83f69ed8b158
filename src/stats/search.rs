//! 查找耗时统计 - 基准结果报告

use crate::stats::{push_metric, ChainStats};
use std::{fmt, time::Duration};

/// 一次基准运行的结果
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    /// 完整遍历键序列的次数
    pub runs: usize,
    /// 每轮查找的键数
    pub keys_per_pass: usize,
    /// 每轮命中的键数
    pub hits_per_pass: usize,
    /// 全部轮次总耗时
    pub total: Duration,
    /// 被查找的表的链长分布
    pub chains: ChainStats,
}

impl SearchReport {
    /// 平均每轮耗时 (毫秒)
    pub fn per_pass_ms(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.total.as_secs_f64() * 1000.0 / self.runs as f64
    }

    /// 平均每次查找耗时 (纳秒)
    pub fn per_lookup_ns(&self) -> f64 {
        let lookups = self.runs.saturating_mul(self.keys_per_pass);
        if lookups == 0 {
            return 0.0;
        }
        self.total.as_nanos() as f64 / lookups as f64
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();
        push_metric(
            &mut output,
            "search_runs",
            "Full passes over the key sequence",
            "counter",
            self.runs,
        );
        push_metric(
            &mut output,
            "search_keys",
            "Keys looked up per pass",
            "gauge",
            self.keys_per_pass,
        );
        push_metric(
            &mut output,
            "search_hits",
            "Keys found per pass",
            "gauge",
            self.hits_per_pass,
        );
        push_metric(
            &mut output,
            "search_pass_ms",
            "Mean time per pass (milliseconds)",
            "gauge",
            format_args!("{:.6}", self.per_pass_ms()),
        );
        push_metric(
            &mut output,
            "search_lookup_ns",
            "Mean time per lookup (nanoseconds)",
            "gauge",
            format_args!("{:.3}", self.per_lookup_ns()),
        );
        output
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "search time: {:.6} ms", self.per_pass_ms())
    }
}

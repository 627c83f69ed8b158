//! 链长统计 - 负载因子与链长分布

use crate::stats::push_metric;

/// 链长分布快照
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChainStats {
    pub bucket_count: usize,
    pub entries: usize,
    pub empty_chains: usize,
    pub longest_chain: usize,
    /// 节点数 / 桶数
    pub load_factor: f64,
    /// 非空链平均长度, 即命中查找的期望比较次数上界
    pub mean_nonempty_chain: f64,
}

impl ChainStats {
    /// 由各桶链长汇总
    pub fn collect(lengths: impl IntoIterator<Item = usize>) -> Self {
        let mut stats = Self::default();
        for len in lengths {
            stats.bucket_count += 1;
            stats.entries += len;
            stats.longest_chain = stats.longest_chain.max(len);
            if len == 0 {
                stats.empty_chains += 1;
            }
        }

        if stats.bucket_count > 0 {
            stats.load_factor = stats.entries as f64 / stats.bucket_count as f64;
        }
        let nonempty = stats.bucket_count - stats.empty_chains;
        if nonempty > 0 {
            stats.mean_nonempty_chain = stats.entries as f64 / nonempty as f64;
        }
        stats
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();
        push_metric(
            &mut output,
            "buckets",
            "Number of buckets",
            "gauge",
            self.bucket_count,
        );
        push_metric(
            &mut output,
            "entries",
            "Number of stored keys",
            "gauge",
            self.entries,
        );
        push_metric(
            &mut output,
            "empty_chains",
            "Buckets without keys",
            "gauge",
            self.empty_chains,
        );
        push_metric(
            &mut output,
            "longest_chain",
            "Longest chain length",
            "gauge",
            self.longest_chain,
        );
        push_metric(
            &mut output,
            "load_factor",
            "Entries per bucket",
            "gauge",
            format_args!("{:.4}", self.load_factor),
        );
        push_metric(
            &mut output,
            "mean_nonempty_chain",
            "Mean length of non-empty chains",
            "gauge",
            format_args!("{:.4}", self.mean_nonempty_chain),
        );
        output
    }
}

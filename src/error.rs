//! 统一错误处理 - 哈希表构建、键压缩与词典加载的错误类型

use std::path::PathBuf;

/// 链式哈希表可能发生的错误
#[derive(Debug, thiserror::Error)]
pub enum HashTableError {
    #[error("桶数量不能为零")]
    ZeroBuckets,

    #[error("内存分配失败 (大小: {size}, 对齐: {align})")]
    AllocationFailed {
        size: usize,
        align: usize,
    },

    #[error("读取词典失败: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("词典条目超过上限 (上限: {limit})")]
    DictionaryTooLarge {
        limit: usize,
    },

    #[error("词典中没有任何键")]
    EmptyDictionary,

    #[error("无效配置: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

impl HashTableError {
    /// 按元素类型构造分配失败错误
    pub fn allocation<T>(count: usize) -> Self {
        Self::AllocationFailed {
            size: std::mem::size_of::<T>().saturating_mul(count),
            align: std::mem::align_of::<T>(),
        }
    }

    /// 获取错误恢复建议
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ZeroBuckets => Some("桶数量至少为1"),
            Self::AllocationFailed { .. } => Some("检查系统内存或减小表大小"),
            Self::Io { .. } => Some("确认词典文件路径与读取权限"),
            Self::DictionaryTooLarge { .. } => Some("调大词典上限或裁剪词典"),
            Self::EmptyDictionary => Some("词典每行一个键, 至少需要一个"),
            Self::InvalidConfig { .. } => Some("检查配置参数"),
        }
    }

    /// 判断错误是否可恢复
    ///
    /// 压缩前的分配失败不会破坏哈希表, 调用方可以放弃压缩继续查询。
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::ZeroBuckets | Self::InvalidConfig { .. })
    }
}

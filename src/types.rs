//! 核心类型定义 - 节点标识、表阶段与键编码

use std::fmt;

/// 压缩区中每个键之后写入的终止符
pub const KEY_TERMINATOR: u8 = 0;

/// 键在压缩区中的编码长度 (含终止符)
#[inline]
pub const fn encoded_len(key: &[u8]) -> usize {
    key.len() + 1
}

/// 表内节点ID - 节点数组下标
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// 哈希表生命周期阶段
pub trait TablePhase: sealed::Sealed {
    /// 阶段名称, 用于日志与调试输出
    const NAME: &'static str;
}

/// 装载阶段: 键借用外部源缓冲区, 允许插入
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loaded {}

/// 压缩阶段: 键借用压缩区, 只读
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compacted {}

impl sealed::Sealed for Loaded {}
impl sealed::Sealed for Compacted {}

impl TablePhase for Loaded {
    const NAME: &'static str = "loaded";
}

impl TablePhase for Compacted {
    const NAME: &'static str = "compacted";
}

/// 以可读形式显示键, 非UTF-8字节按转义输出
pub struct KeyDisplay<'a>(pub &'a [u8]);

impl fmt::Display for KeyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(self.0) {
            Ok(s) => f.write_str(s),
            Err(_) => write!(f, "{}", self.0.escape_ascii()),
        }
    }
}

//! 常量哈希策略 - 所有键落入同一个桶, 用于构造最坏情况

use crate::hash::strategy::HashStrategy;

/// 对所有键返回同一个哈希值
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstantStrategy(pub u64);

impl HashStrategy for ConstantStrategy {
    #[inline]
    fn hash(&self, _key: &[u8]) -> u64 {
        self.0
    }

    fn name(&self) -> &'static str {
        "constant"
    }
}

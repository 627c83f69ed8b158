//! CRC-32 哈希策略 - 基准使用的参考哈希

use crc32fast::Hasher as Crc32Hasher;

use crate::hash::strategy::HashStrategy;

/// 计算CRC-32校验和
#[inline]
pub fn crc32_checksum(data: &[u8]) -> u32 {
    let mut hasher = Crc32Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// CRC-32 哈希 + 逐字节比较
///
/// 速度快, 对自然语言词表分布足够均匀; 不具备密码学强度。
#[derive(Debug, Default, Clone, Copy)]
pub struct Crc32Strategy;

impl HashStrategy for Crc32Strategy {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        crc32_checksum(key) as u64
    }

    fn name(&self) -> &'static str {
        "crc32"
    }
}

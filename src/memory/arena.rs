//! 键压缩区 - 一次分配、连续存放所有键
//!
//! ```text
//! 压缩区: [cat\0][cow\0][dog\0][ox\0]
//!          ^      ^      ^      ^
//!          桶0链  桶0链  桶3链  桶5链
//! ```
//!
//! 压缩区归调用方所有, 压缩后的哈希表只借用它。

use crate::{
    error::HashTableError,
    map::HashTable,
    hash::HashStrategy,
    types::{encoded_len, TablePhase, KEY_TERMINATOR},
};

/// 连续键存储
#[derive(Debug)]
pub struct KeyArena {
    buffer: Vec<u8>,
    /// 申请时声明的容量; `Vec` 可能多分配, 以此为准
    limit: usize,
}

impl KeyArena {
    /// 分配恰好 `total_key_bytes` 字节
    ///
    /// 分配失败时返回错误, 不影响任何已存在的哈希表。
    pub fn allocate(total_key_bytes: usize) -> Result<Self, HashTableError> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(total_key_bytes)
            .map_err(|_| HashTableError::allocation::<u8>(total_key_bytes))?;

        crate::log_debug!("key arena allocated: {} bytes", total_key_bytes);
        Ok(Self {
            buffer,
            limit: total_key_bytes,
        })
    }

    /// 按表中已存储键的编码总长分配
    pub fn for_table<S, P>(table: &HashTable<'_, S, P>) -> Result<Self, HashTableError>
    where
        S: HashStrategy,
        P: TablePhase,
    {
        Self::allocate(table.encoded_key_bytes())
    }

    /// 申请的总容量
    #[inline]
    pub fn capacity(&self) -> usize {
        self.limit
    }

    /// 已写入字节数
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// 剩余可写字节数
    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit - self.buffer.len()
    }

    /// 已写入的全部字节 (含终止符)
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// 追加一个键和终止符, 返回键的起始偏移
    ///
    /// 调用方保证剩余空间足够, 否则属于契约违例。
    pub(crate) fn push_key(&mut self, key: &[u8]) -> usize {
        assert!(
            encoded_len(key) <= self.remaining(),
            "键压缩区空间不足: 需要 {} 字节, 剩余 {} 字节",
            encoded_len(key),
            self.remaining()
        );
        let offset = self.buffer.len();
        self.buffer.extend_from_slice(key);
        self.buffer.push(KEY_TERMINATOR);
        offset
    }

    /// 取出 `[offset, offset + len)` 的键
    #[inline]
    pub(crate) fn key_at(&self, offset: usize, len: usize) -> &[u8] {
        &self.buffer[offset..offset + len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_exact() {
        let arena = KeyArena::allocate(16).unwrap();
        assert_eq!(arena.capacity(), 16);
        assert_eq!(arena.remaining(), 16);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_push_and_read_back() {
        let mut arena = KeyArena::allocate(8).unwrap();
        let a = arena.push_key(b"cat");
        let b = arena.push_key(b"ox");
        assert_eq!((a, b), (0, 4));
        assert_eq!(arena.as_bytes(), b"cat\0ox\0");
        assert_eq!(arena.key_at(b, 2), b"ox");
        assert_eq!(arena.remaining(), 1);
        assert_eq!(arena.key_at(a, 3), b"cat");
    }

    #[test]
    #[should_panic(expected = "键压缩区空间不足")]
    fn test_overflow_is_contract_violation() {
        let mut arena = KeyArena::allocate(3).unwrap();
        arena.push_key(b"cat");
    }

    #[test]
    fn test_huge_allocation_fails_cleanly() {
        let err = KeyArena::allocate(usize::MAX).unwrap_err();
        assert!(matches!(err, HashTableError::AllocationFailed { .. }));
    }
}

//! 键存储压缩 - 将所有键迁移到一块连续内存
//!
//! 迁移顺序为桶顺序、链内链接顺序, 查找时沿链遍历即访问相邻内存。
//! 压缩消耗装载阶段的表, 返回借用压缩区的只读表; 源缓冲区随后可以释放。
//! 压缩所需的临时空间在消耗装载表之前预留, 预留失败时原表原样交还。

use crate::{
    error::HashTableError,
    hash::HashStrategy,
    map::{chain::Node, HashTable},
    memory::KeyArena,
    types::{Compacted, Loaded},
};
use std::fmt;

/// 压缩失败, 携带错误与未被改动的装载阶段表
pub struct CompactionFailed<'k, S> {
    pub error: HashTableError,
    pub table: HashTable<'k, S, Loaded>,
}

impl<'k, S> CompactionFailed<'k, S> {
    /// 取回装载阶段的表, 可继续查找或稍后重试
    pub fn into_table(self) -> HashTable<'k, S, Loaded> {
        self.table
    }
}

impl<S: HashStrategy> fmt::Debug for CompactionFailed<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompactionFailed")
            .field("error", &self.error)
            .field("table", &self.table)
            .finish()
    }
}

impl<S> From<CompactionFailed<'_, S>> for HashTableError {
    fn from(failed: CompactionFailed<'_, S>) -> Self {
        failed.error
    }
}

/// 压缩用临时空间: 节点ID到偏移的映射与重新绑定后的节点
pub(crate) struct Scratch<'a> {
    offsets: Vec<usize>,
    nodes: Vec<Node<'a>>,
}

impl<'a> Scratch<'a> {
    /// 按节点数精确预留
    pub(crate) fn reserve(count: usize) -> Result<Self, HashTableError> {
        let mut offsets = Vec::new();
        offsets
            .try_reserve_exact(count)
            .map_err(|_| HashTableError::allocation::<usize>(count))?;
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(count)
            .map_err(|_| HashTableError::allocation::<Node<'a>>(count))?;
        Ok(Self { offsets, nodes })
    }
}

/// 压缩键存储
///
/// 压缩区必须至少能容纳 [`HashTable::encoded_key_bytes`] 字节, 否则属于契约
/// 违例并直接 panic。压缩区仍归调用方所有。临时空间分配失败时返回
/// [`CompactionFailed`], 其中的表仍处于装载阶段且内容不变。
pub fn compact<'a, 'k, S: HashStrategy>(
    table: HashTable<'k, S, Loaded>,
    arena: &'a mut KeyArena,
) -> Result<HashTable<'a, S, Compacted>, CompactionFailed<'k, S>> {
    let scratch = Scratch::reserve(table.len());
    compact_with(table, arena, scratch)
}

pub(crate) fn compact_with<'a, 'k, S: HashStrategy>(
    table: HashTable<'k, S, Loaded>,
    arena: &'a mut KeyArena,
    scratch: Result<Scratch<'a>, HashTableError>,
) -> Result<HashTable<'a, S, Compacted>, CompactionFailed<'k, S>> {
    let required = table.encoded_key_bytes();
    assert!(
        required <= arena.remaining(),
        "键压缩区过小: 需要 {} 字节, 仅剩 {} 字节",
        required,
        arena.remaining()
    );

    let Scratch {
        mut offsets,
        nodes: mut rebound,
    } = match scratch {
        Ok(scratch) => scratch,
        Err(error) => {
            crate::log_warn!("key compaction aborted: {}", error);
            return Err(CompactionFailed { error, table });
        }
    };

    // 从这里开始不再分配, 装载表可以安全拆开
    let (chains, nodes, strategy) = table.into_parts();

    // 节点ID -> 键在压缩区中的偏移
    offsets.resize(nodes.len(), 0);
    for chain in chains.iter() {
        for (id, node) in chain.iter(&nodes) {
            offsets[id.index()] = arena.push_key(node.key());
        }
    }

    let arena: &'a KeyArena = arena;
    rebound.extend(nodes.iter().zip(&offsets).map(move |(node, &offset)| {
        let len = node.key().len();
        node.rebind(arena.key_at(offset, len))
    }));

    crate::log_info!(
        "key storage compacted: {} keys, {} bytes",
        rebound.len(),
        arena.len()
    );
    Ok(HashTable::from_parts(chains, rebound, strategy))
}

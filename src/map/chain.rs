//! 桶链实现 - 双向链表节点与链头

use crate::types::NodeId;
use std::iter::FusedIterator;

/// 链中的一个节点
///
/// `key` 在装载阶段借用源缓冲区, 压缩后借用压缩区。
#[derive(Debug, Clone, Copy)]
pub struct Node<'k> {
    pub(crate) key: &'k [u8],
    pub(crate) next: Option<NodeId>,
    pub(crate) prev: Option<NodeId>,
}

impl<'k> Node<'k> {
    pub(crate) fn new(key: &'k [u8]) -> Self {
        Self {
            key,
            next: None,
            prev: None,
        }
    }

    /// 节点存储的键
    #[inline]
    pub fn key(&self) -> &'k [u8] {
        self.key
    }

    /// 保留链接, 把键重新指向另一块存储
    pub(crate) fn rebind<'a>(self, key: &'a [u8]) -> Node<'a> {
        Node {
            key,
            next: self.next,
            prev: self.prev,
        }
    }
}

/// 桶链
///
/// `Empty` 表示空链; 链尾节点的 `next` 为 `None`。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Chain {
    #[default]
    Empty,
    Linked {
        head: NodeId,
        tail: NodeId,
        len: usize,
    },
}

impl Chain {
    /// 链长
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Chain::Empty => 0,
            Chain::Linked { len, .. } => *len,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Chain::Empty)
    }

    #[inline]
    pub fn head(&self) -> Option<NodeId> {
        match self {
            Chain::Empty => None,
            Chain::Linked { head, .. } => Some(*head),
        }
    }

    #[inline]
    pub fn tail(&self) -> Option<NodeId> {
        match self {
            Chain::Empty => None,
            Chain::Linked { tail, .. } => Some(*tail),
        }
    }

    /// 把 `id` 插到链头, 并更新节点链接
    pub(crate) fn push_front(&mut self, id: NodeId, nodes: &mut [Node<'_>]) {
        match *self {
            Chain::Empty => {
                *self = Chain::Linked {
                    head: id,
                    tail: id,
                    len: 1,
                };
            }
            Chain::Linked { head, tail, len } => {
                nodes[id.index()].next = Some(head);
                nodes[head.index()].prev = Some(id);
                *self = Chain::Linked {
                    head: id,
                    tail,
                    len: len + 1,
                };
            }
        }
    }

    /// 按链接顺序遍历节点
    pub fn iter<'n, 'k>(&self, nodes: &'n [Node<'k>]) -> ChainIter<'n, 'k> {
        ChainIter {
            nodes,
            front: self.head(),
            back: self.tail(),
            remaining: self.len(),
        }
    }
}

/// 链迭代器, 正向沿 `next`, 反向沿 `prev`
pub struct ChainIter<'n, 'k> {
    nodes: &'n [Node<'k>],
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'n, 'k> Iterator for ChainIter<'n, 'k> {
    type Item = (NodeId, &'n Node<'k>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        let node = &self.nodes[id.index()];
        self.front = node.next;
        self.remaining -= 1;
        Some((id, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for ChainIter<'_, '_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        let node = &self.nodes[id.index()];
        self.back = node.prev;
        self.remaining -= 1;
        Some((id, node))
    }
}

impl ExactSizeIterator for ChainIter<'_, '_> {}

impl FusedIterator for ChainIter<'_, '_> {}

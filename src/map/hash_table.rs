//! 链式哈希表核心实现
//!
//! 固定桶数, 装载期间只做头插, 不去重; 装载完成后可将所有键压缩到
//! 一块连续内存 (见 [`crate::map::compactor`]), 之后只读查询。

use crate::{
    error::HashTableError,
    hash::{calculate_bucket, hash_strategy, Crc32Strategy, HashAlgorithm, HashStrategy},
    map::{
        chain::{Chain, ChainIter, Node},
        compactor::CompactionFailed,
    },
    memory::KeyArena,
    stats::ChainStats,
    types::{encoded_len, Compacted, KeyDisplay, Loaded, NodeId, TablePhase},
};
use std::{fmt, marker::PhantomData};

/// 基准默认桶数量
pub const DEFAULT_BUCKET_COUNT: usize = 1907;

/// 哈希表配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashTableConfig {
    /// 桶数量, 建表后不再改变
    pub bucket_count: usize,
    pub algorithm: HashAlgorithm,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            algorithm: HashAlgorithm::Crc32,
        }
    }
}

/// 定长链式哈希表
///
/// `'k` 为键存储的生命周期: 装载阶段是源缓冲区, 压缩阶段是 [`KeyArena`]。
pub struct HashTable<'k, S = Crc32Strategy, P = Loaded> {
    chains: Box<[Chain]>,
    nodes: Vec<Node<'k>>,
    strategy: S,
    _phase: PhantomData<P>,
}

impl<'k, S: HashStrategy> HashTable<'k, S, Loaded> {
    /// 创建 `bucket_count` 个空链
    pub fn new(bucket_count: usize, strategy: S) -> Result<Self, HashTableError> {
        if bucket_count == 0 {
            return Err(HashTableError::ZeroBuckets);
        }

        let mut chains = Vec::new();
        chains
            .try_reserve_exact(bucket_count)
            .map_err(|_| HashTableError::allocation::<Chain>(bucket_count))?;
        chains.resize(bucket_count, Chain::Empty);

        crate::log_debug!(
            "hash table created: {} buckets, strategy {}",
            bucket_count,
            strategy.name()
        );
        Ok(Self {
            chains: chains.into_boxed_slice(),
            nodes: Vec::new(),
            strategy,
            _phase: PhantomData,
        })
    }

    /// 预留节点空间, 批量装载前调用可减少重分配
    pub fn reserve(&mut self, additional: usize) -> Result<(), HashTableError> {
        self.nodes
            .try_reserve(additional)
            .map_err(|_| HashTableError::allocation::<Node<'k>>(additional))
    }

    /// 强制插入: 头插到对应桶, 不检查重复键
    pub fn insert_forced(&mut self, key: &'k [u8]) {
        let bucket = self.bucket_of(key);
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(key));
        self.chains[bucket].push_front(id, &mut self.nodes);
    }

    /// 按顺序插入序列中的全部键
    pub fn extend_forced<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'k [u8]>,
    {
        let keys = keys.into_iter();
        self.nodes.reserve(keys.size_hint().0);
        for key in keys {
            self.insert_forced(key);
        }
    }

    /// 压缩键存储, 见 [`crate::map::compactor::compact`]
    pub fn compact_into<'a>(
        self,
        arena: &'a mut KeyArena,
    ) -> Result<HashTable<'a, S, Compacted>, CompactionFailed<'k, S>> {
        crate::map::compactor::compact(self, arena)
    }
}

impl<'k> HashTable<'k, Box<dyn HashStrategy>, Loaded> {
    /// 按配置建表, 策略由工厂创建
    pub fn from_config(config: &HashTableConfig) -> Result<Self, HashTableError> {
        Self::new(config.bucket_count, hash_strategy(config.algorithm))
    }
}

impl<'k, S: HashStrategy, P: TablePhase> HashTable<'k, S, P> {
    /// 由压缩过程重新组装
    pub(crate) fn from_parts(chains: Box<[Chain]>, nodes: Vec<Node<'k>>, strategy: S) -> Self {
        Self {
            chains,
            nodes,
            strategy,
            _phase: PhantomData,
        }
    }

    pub(crate) fn into_parts(self) -> (Box<[Chain]>, Vec<Node<'k>>, S) {
        (self.chains, self.nodes, self.strategy)
    }

    /// 键所在的桶下标
    #[inline]
    pub fn bucket_of(&self, key: &[u8]) -> usize {
        calculate_bucket(self.strategy.hash(key), self.chains.len())
    }

    /// 查找键是否存在
    #[inline]
    pub fn find(&self, key: &[u8]) -> bool {
        self.find_key(key).is_some()
    }

    /// 查找键, 返回表中存储的那份键
    ///
    /// 从链头开始比较, 命中第一个即返回; 重复键总是先找到最后插入的那个。
    pub fn find_key(&self, key: &[u8]) -> Option<&'k [u8]> {
        let chain = &self.chains[self.bucket_of(key)];
        chain
            .iter(&self.nodes)
            .map(|(_, node)| node.key())
            .find(|stored| self.strategy.key_eq(stored, key))
    }

    /// 键出现的次数 (重复插入各算一次)
    pub fn count(&self, key: &[u8]) -> usize {
        let chain = &self.chains[self.bucket_of(key)];
        chain
            .iter(&self.nodes)
            .filter(|(_, node)| self.strategy.key_eq(node.key(), key))
            .count()
    }

    /// 桶数量
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.chains.len()
    }

    /// 节点总数
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 负载因子 = 节点数 / 桶数
    pub fn load_factor(&self) -> f64 {
        self.nodes.len() as f64 / self.chains.len() as f64
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// 所有链, 按桶顺序
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// 遍历某个桶的链
    ///
    /// 下标越界时 panic, 与切片索引一致。
    pub fn chain(&self, bucket: usize) -> ChainIter<'_, 'k> {
        self.chains[bucket].iter(&self.nodes)
    }

    /// 按桶顺序、链内按链接顺序遍历全部键
    pub fn keys(&self) -> impl Iterator<Item = &'k [u8]> + '_ {
        self.chains
            .iter()
            .flat_map(move |chain| chain.iter(&self.nodes).map(|(_, node)| node.key()))
    }

    /// 全部键在压缩区中的编码总长 (每个键附带一个终止符)
    pub fn encoded_key_bytes(&self) -> usize {
        self.nodes.iter().map(|node| encoded_len(node.key())).sum()
    }

    /// 链长分布统计
    pub fn chain_stats(&self) -> ChainStats {
        ChainStats::collect(self.chains.iter().map(Chain::len))
    }

    /// 当前阶段名称
    pub fn phase(&self) -> &'static str {
        P::NAME
    }
}

impl<S: HashStrategy, P: TablePhase> fmt::Debug for HashTable<'_, S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("phase", &P::NAME)
            .field("strategy", &self.strategy.name())
            .field("buckets", &self.bucket_count())
            .field("entries", &self.len())
            .field("load_factor", &self.load_factor())
            .finish()
    }
}

/// 每行一个桶: `[下标] 键 -> 键 -> ...`, 空桶略过
impl<S: HashStrategy, P: TablePhase> fmt::Display for HashTable<'_, S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (bucket, chain) in self.chains.iter().enumerate() {
            if chain.is_empty() {
                continue;
            }
            write!(f, "[{bucket}]")?;
            for (i, (_, node)) in chain.iter(&self.nodes).enumerate() {
                let sep = if i == 0 { " " } else { " -> " };
                write!(f, "{sep}{}", KeyDisplay(node.key()))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//! 哈希策略模块 - 定义键哈希与键比较策略

use crate::hash::{Crc32Strategy, SeededStrategy};

/// 哈希算法选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// CRC-32 校验和 (基准默认)
    Crc32,
    AHash,
    XxHash,
    /// 标准库 SipHash
    Default,
}

impl HashAlgorithm {
    /// 全部算法, 供基准遍历
    pub const ALL: [HashAlgorithm; 4] = [
        HashAlgorithm::Crc32,
        HashAlgorithm::AHash,
        HashAlgorithm::XxHash,
        HashAlgorithm::Default,
    ];

    /// 转换为字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Crc32 => "crc32",
            HashAlgorithm::AHash => "ahash",
            HashAlgorithm::XxHash => "xxhash",
            HashAlgorithm::Default => "siphash",
        }
    }

    /// 按名称解析 (不区分大小写)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str().eq_ignore_ascii_case(name))
    }
}

/// 哈希策略特征
///
/// 哈希函数与比较器在建表时注入, 整个表生命周期内不变。
pub trait HashStrategy: Send + Sync {
    /// 计算键的哈希值
    fn hash(&self, key: &[u8]) -> u64;

    /// 比较已存储的键与待查键
    fn key_eq(&self, stored: &[u8], candidate: &[u8]) -> bool {
        stored == candidate
    }

    /// 策略名称
    fn name(&self) -> &'static str;
}

impl<T: HashStrategy + ?Sized> HashStrategy for Box<T> {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        (**self).hash(key)
    }

    #[inline]
    fn key_eq(&self, stored: &[u8], candidate: &[u8]) -> bool {
        (**self).key_eq(stored, candidate)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// 哈希函数特征
pub trait HasherFunction: Send + Sync {
    fn hash_bytes(&self, data: &[u8]) -> u64;
}

impl<T> HasherFunction for T
where
    T: Fn(&[u8]) -> u64 + Send + Sync,
{
    #[inline]
    fn hash_bytes(&self, data: &[u8]) -> u64 {
        self(data)
    }
}

/// 键比较器特征 - 只关心相等
pub trait KeyComparator: Send + Sync {
    fn eq_bytes(&self, stored: &[u8], candidate: &[u8]) -> bool;
}

impl<T> KeyComparator for T
where
    T: Fn(&[u8], &[u8]) -> bool + Send + Sync,
{
    #[inline]
    fn eq_bytes(&self, stored: &[u8], candidate: &[u8]) -> bool {
        self(stored, candidate)
    }
}

/// 逐字节相等比较
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteEq;

impl KeyComparator for ByteEq {
    #[inline]
    fn eq_bytes(&self, stored: &[u8], candidate: &[u8]) -> bool {
        stored == candidate
    }
}

/// 由独立的哈希函数与比较器组合而成的策略
#[derive(Clone)]
pub struct FnStrategy<H, C = ByteEq> {
    hasher: H,
    comparator: C,
    name: &'static str,
}

impl<H: HasherFunction> FnStrategy<H, ByteEq> {
    /// 使用逐字节比较创建
    pub fn new(name: &'static str, hasher: H) -> Self {
        Self::with_comparator(name, hasher, ByteEq)
    }
}

impl<H: HasherFunction, C: KeyComparator> FnStrategy<H, C> {
    /// 使用指定比较器创建
    pub fn with_comparator(name: &'static str, hasher: H, comparator: C) -> Self {
        Self {
            hasher,
            comparator,
            name,
        }
    }

    /// 替换比较器, 保留哈希函数
    pub fn comparator<C2: KeyComparator>(self, comparator: C2) -> FnStrategy<H, C2> {
        FnStrategy {
            hasher: self.hasher,
            comparator,
            name: self.name,
        }
    }
}

impl<H: HasherFunction, C: KeyComparator> HashStrategy for FnStrategy<H, C> {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        self.hasher.hash_bytes(key)
    }

    #[inline]
    fn key_eq(&self, stored: &[u8], candidate: &[u8]) -> bool {
        self.comparator.eq_bytes(stored, candidate)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// 哈希策略工厂
pub fn hash_strategy(algorithm: HashAlgorithm) -> Box<dyn HashStrategy> {
    match algorithm {
        HashAlgorithm::Crc32 => Box::new(Crc32Strategy),
        other => Box::new(SeededStrategy::new(other)),
    }
}

//! 词典加载 - 源缓冲区与按行切分的键序列
//!
//! 词典格式为每行一个键, 以 `\n` 分隔, 无转义; 连续的分隔符视为一个。
//! 切分出的键借用 [`Dictionary`] 的缓冲区, 压缩完成后哈希表不再依赖它。

use crate::error::HashTableError;
use std::path::Path;

/// 默认词典路径
pub const DEFAULT_DICTIONARY_PATH: &str = "data/dictionary.txt";

/// 默认词典条目上限
pub const MAX_DICTIONARY_SIZE: usize = 60_000;

/// 键分隔符
pub const KEY_SEPARATOR: u8 = b'\n';

/// 按行切分, 跳过空行
pub fn tokenize(text: &[u8]) -> impl Iterator<Item = &[u8]> + '_ {
    text.split(|&byte| byte == KEY_SEPARATOR)
        .filter(|token| !token.is_empty())
}

/// 词典源缓冲区
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    buffer: Vec<u8>,
}

impl Dictionary {
    /// 从文件读取整个词典
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HashTableError> {
        let path = path.as_ref();
        let buffer = std::fs::read(path).map_err(|source| HashTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        crate::log_info!("dictionary loaded: {} ({} bytes)", path.display(), buffer.len());
        Ok(Self { buffer })
    }

    /// 直接使用内存中的文本
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            buffer: bytes.into(),
        }
    }

    /// 源缓冲区字节数
    pub fn byte_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// 按顺序遍历词典中的键
    pub fn lexis(&self) -> impl Iterator<Item = &[u8]> + '_ {
        tokenize(&self.buffer)
    }

    /// 收集全部键, 超过 `limit` 或为空时报错
    pub fn lexis_array(&self, limit: usize) -> Result<Vec<&[u8]>, HashTableError> {
        let mut lexis = Vec::new();
        for key in self.lexis() {
            if lexis.len() == limit {
                return Err(HashTableError::DictionaryTooLarge { limit });
            }
            lexis.push(key);
        }

        if lexis.is_empty() {
            return Err(HashTableError::EmptyDictionary);
        }
        crate::log_debug!("dictionary tokenized: {} keys", lexis.len());
        Ok(lexis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_skips_empty_lines() {
        let keys: Vec<&[u8]> = tokenize(b"\ncat\n\ndog\ncow\n").collect();
        assert_eq!(keys, vec![&b"cat"[..], b"dog", b"cow"]);
    }

    #[test]
    fn test_tokenize_without_trailing_newline() {
        let keys: Vec<&[u8]> = tokenize(b"ox").collect();
        assert_eq!(keys, vec![&b"ox"[..]]);
        assert_eq!(tokenize(b"").count(), 0);
        assert_eq!(tokenize(b"\n\n").count(), 0);
    }

    #[test]
    fn test_lexis_array_limit() {
        let dictionary = Dictionary::from_bytes("a\nb\nc\n");
        assert_eq!(dictionary.lexis_array(3).unwrap().len(), 3);
        let err = dictionary.lexis_array(2).unwrap_err();
        assert!(matches!(err, HashTableError::DictionaryTooLarge { limit: 2 }));
    }

    #[test]
    fn test_lexis_array_empty() {
        let dictionary = Dictionary::from_bytes("\n\n");
        assert!(matches!(
            dictionary.lexis_array(MAX_DICTIONARY_SIZE),
            Err(HashTableError::EmptyDictionary)
        ));
    }

    #[test]
    fn test_well_formed_buffer_matches_encoded_size() {
        // 每行一个键且以换行结尾时, 缓冲区大小恰好等于键编码总长
        let dictionary = Dictionary::from_bytes("cat\ndog\ncow\nox\n");
        let encoded: usize = dictionary.lexis().map(crate::types::encoded_len).sum();
        assert_eq!(encoded, dictionary.byte_len());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Dictionary::load("definitely/not/here.txt").unwrap_err();
        match err {
            HashTableError::Io { path, .. } => assert!(path.ends_with("here.txt")),
            other => panic!("意外的错误类型: {other:?}"),
        }
    }
}

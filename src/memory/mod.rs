//! 内存管理模块 - 键压缩区

pub mod arena;

pub use arena::KeyArena;

//! 统计信息
//!
//! 定义传输仿真统计数据结构。

/// 网络统计信息
#[derive(Debug, Default)]
pub struct Stats {
    pub completed_chunks: u64,
    pub completed_bytes: u64,
}

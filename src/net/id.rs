//! 标识符类型
//!
//! 定义设备、链路和数据块的唯一标识符。

/// 设备标识符（拓扑内唯一，NPU 连续占据 `[0, npus_count)`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub usize);

/// 链路标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(pub usize);

/// 数据块标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(pub u64);

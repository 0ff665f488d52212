//! 数据块类型
//!
//! 定义一次批量传输（chunk）及其相关操作。

use super::id::{ChunkId, DeviceId};
use crate::sim::EventQueue;
use std::fmt;

/// 传输完成回调：在 chunk 到达目的设备时调用一次。
/// 回调拿到事件队列，便于接续调度后续传输。
pub type ChunkCallback = Box<dyn FnOnce(&mut EventQueue) + Send>;

/// 一次在途批量传输。
///
/// 路由在注入时确定，途中不再重算；`hop` 指向 `route` 中当前所在设备。
pub struct Chunk {
    pub id: ChunkId,
    pub size: u64,
    pub route: Vec<DeviceId>,
    pub hop: usize, // 当前所在设备在 route 中的索引
    on_done: Option<ChunkCallback>,
}

impl Chunk {
    pub(crate) fn new(
        id: ChunkId,
        size: u64,
        route: Vec<DeviceId>,
        on_done: Option<ChunkCallback>,
    ) -> Self {
        assert!(!route.is_empty(), "chunk route must not be empty");
        assert!(size > 0, "chunk size must be positive");
        Self {
            id,
            size,
            route,
            hop: 0,
            on_done,
        }
    }

    /// 获取源设备
    pub fn src(&self) -> DeviceId {
        self.route[0]
    }

    /// 获取目的设备
    pub fn dest(&self) -> DeviceId {
        *self.route.last().expect("route non-empty")
    }

    /// 获取当前所在设备
    pub fn at(&self) -> DeviceId {
        self.route[self.hop]
    }

    /// 检查是否还有下一跳
    pub fn has_next(&self) -> bool {
        self.hop + 1 < self.route.len()
    }

    /// 获取下一跳设备（如果有）
    pub fn next(&self) -> Option<DeviceId> {
        self.route.get(self.hop + 1).copied()
    }

    /// 前进到下一跳
    pub fn advance(mut self) -> Self {
        self.hop += 1;
        assert!(self.hop < self.route.len(), "advance past end of route");
        self
    }

    /// 取走完成回调（只会触发一次）
    pub(crate) fn take_on_done(&mut self) -> Option<ChunkCallback> {
        self.on_done.take()
    }
}

// 回调不可打印，手动实现 Debug。
impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("id", &self.id)
            .field("size", &self.size)
            .field("route", &self.route)
            .field("hop", &self.hop)
            .field("has_on_done", &self.on_done.is_some())
            .finish()
    }
}

//! 设备类型
//!
//! 定义网络端点设备（NPU 或交换机），持有自己的出向链路。

use super::id::{DeviceId, LinkId};
use std::collections::HashMap;

/// 设备类别（NPU 为计算端点，交换机为非端点设备）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Npu,
    Switch,
}

/// 网络设备：身份 + 出向链路集合（每个邻居一条）。
///
/// 链路只记录端点 id，不反向持有设备，避免所有权环。
#[derive(Debug)]
pub struct Device {
    id: DeviceId,
    name: String,
    kind: DeviceKind,
    outgoing: HashMap<DeviceId, LinkId>,
}

impl Device {
    /// 创建新设备
    pub(crate) fn new(id: DeviceId, name: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            outgoing: HashMap::new(),
        }
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// 登记通往 neighbor 的出向链路。每个有序设备对只允许一条链路，
    /// 重复连线属于组网契约违例。
    pub(crate) fn connect(&mut self, neighbor: DeviceId, link: LinkId) {
        let prev = self.outgoing.insert(neighbor, link);
        assert!(
            prev.is_none(),
            "duplicate link {:?} -> {:?}",
            self.id,
            neighbor
        );
    }

    /// 查找通往 neighbor 的出向链路
    pub fn link_to(&self, neighbor: DeviceId) -> Option<LinkId> {
        self.outgoing.get(&neighbor).copied()
    }

    /// 出向链路数量
    pub fn degree(&self) -> usize {
        self.outgoing.len()
    }
}

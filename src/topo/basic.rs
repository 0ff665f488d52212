//! 单维拓扑构件
//!
//! 定义构件类别（封闭集合）与布线完毕的构件描述；
//! 路由和造价按类别模式匹配分派。

use super::topology::Topology;
use super::{fully_connected, ring, switch};
use crate::cost::{CostModel, DollarCost};
use crate::net::{Bandwidth, DeviceId};
use crate::sim::EventTime;
use serde::{Deserialize, Serialize};

/// 单维拓扑构件类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopologyBuildingBlock {
    FullyConnected,
    Ring,
    Switch,
}

/// 一个布线完毕的单维构件：成员 NPU（全局 id）、可选交换机、带宽/时延。
///
/// 成员设备可与其它维的构件共享；交换机设备归本构件独有。
#[derive(Debug)]
pub struct BasicTopology {
    kind: TopologyBuildingBlock,
    npus: Vec<DeviceId>,
    switch_device: Option<DeviceId>,
    bandwidth: Bandwidth,
    latency: EventTime,
}

impl BasicTopology {
    /// 在给定成员上布线一个全连接构件
    pub fn fully_connected(
        topo: &mut Topology,
        npus: Vec<DeviceId>,
        bandwidth: Bandwidth,
        latency: EventTime,
    ) -> Self {
        fully_connected::construct(topo, &npus, bandwidth, latency);
        Self {
            kind: TopologyBuildingBlock::FullyConnected,
            npus,
            switch_device: None,
            bandwidth,
            latency,
        }
    }

    /// 在给定成员上布线一个环形构件
    pub fn ring(
        topo: &mut Topology,
        npus: Vec<DeviceId>,
        bandwidth: Bandwidth,
        latency: EventTime,
    ) -> Self {
        ring::construct(topo, &npus, bandwidth, latency);
        Self {
            kind: TopologyBuildingBlock::Ring,
            npus,
            switch_device: None,
            bandwidth,
            latency,
        }
    }

    /// 在给定成员与交换机设备上布线一个交换机构件
    pub fn switch(
        topo: &mut Topology,
        npus: Vec<DeviceId>,
        switch_device: DeviceId,
        bandwidth: Bandwidth,
        latency: EventTime,
    ) -> Self {
        switch::construct(topo, &npus, switch_device, bandwidth, latency);
        Self {
            kind: TopologyBuildingBlock::Switch,
            npus,
            switch_device: Some(switch_device),
            bandwidth,
            latency,
        }
    }

    pub fn kind(&self) -> TopologyBuildingBlock {
        self.kind
    }

    pub fn npus(&self) -> &[DeviceId] {
        &self.npus
    }

    pub fn npus_count(&self) -> usize {
        self.npus.len()
    }

    pub fn switch_device(&self) -> Option<DeviceId> {
        self.switch_device
    }

    pub fn bandwidth(&self) -> Bandwidth {
        self.bandwidth
    }

    pub fn latency(&self) -> EventTime {
        self.latency
    }

    /// 本构件内 src 到 dest 的路由（含两端；二者必须都是成员）
    pub fn route(&self, src: DeviceId, dest: DeviceId) -> Vec<DeviceId> {
        let s = self.member_index(src);
        let d = self.member_index(dest);
        assert!(s != d, "route endpoints must differ");

        match self.kind {
            TopologyBuildingBlock::FullyConnected => fully_connected::route(&self.npus, s, d),
            TopologyBuildingBlock::Ring => ring::route(&self.npus, s, d),
            TopologyBuildingBlock::Switch => switch::route(
                &self.npus,
                self.switch_device.expect("switch block has a switch"),
                s,
                d,
            ),
        }
    }

    /// 本构件在整体造价中的贡献，按（当前维度，总维度数）价位计价
    pub fn cost_block(
        &self,
        model: &CostModel,
        current_dim: usize,
        total_dim: usize,
    ) -> DollarCost {
        let n = self.npus.len();
        match self.kind {
            TopologyBuildingBlock::FullyConnected => {
                fully_connected::cost_block(model, current_dim, total_dim, n, self.bandwidth)
            }
            TopologyBuildingBlock::Ring => {
                ring::cost_block(model, current_dim, total_dim, n, self.bandwidth)
            }
            TopologyBuildingBlock::Switch => {
                switch::cost_block(model, current_dim, total_dim, n, self.bandwidth)
            }
        }
    }

    fn member_index(&self, id: DeviceId) -> usize {
        self.npus
            .iter()
            .position(|&n| n == id)
            .unwrap_or_else(|| panic!("device {:?} is not a member of this block", id))
    }
}

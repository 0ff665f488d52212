//! 全连接构件
//!
//! 每对不同 NPU 之间都有直连双向链路，路由恒为两跳端点。

use super::topology::Topology;
use crate::cost::{CostModel, DollarCost};
use crate::net::{Bandwidth, DeviceId};
use crate::sim::EventTime;

/// 布线：全连接每个有序设备对
pub(crate) fn construct(
    topo: &mut Topology,
    npus: &[DeviceId],
    bandwidth: Bandwidth,
    latency: EventTime,
) {
    assert!(!npus.is_empty(), "fully-connected block needs npus");

    for &src in npus {
        for &dest in npus {
            if src != dest {
                topo.connect(src, dest, bandwidth, latency, false);
            }
        }
    }
}

/// 路由：直连，恒为 `[src, dest]`
pub(crate) fn route(npus: &[DeviceId], src: usize, dest: usize) -> Vec<DeviceId> {
    vec![npus[src], npus[dest]]
}

/// 造价贡献：n×(n−1) 条单向链路
pub(crate) fn cost_block(
    model: &CostModel,
    current_dim: usize,
    total_dim: usize,
    npus_count: usize,
    bandwidth: Bandwidth,
) -> DollarCost {
    let link_cost = model.get_link_cost(current_dim, total_dim);
    assert!(link_cost > 0.0, "link unit cost must be positive");

    let links_count = npus_count * (npus_count - 1);
    link_cost * bandwidth * links_count as f64
}

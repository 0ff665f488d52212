//! 交换机构件
//!
//! 每个 NPU 只与交换机双向相连；同维所有流量都在交换机链路上
//! 争用带宽，路由恒为 `[src, switch, dest]`。

use super::topology::Topology;
use crate::cost::{CostModel, DollarCost};
use crate::net::{Bandwidth, DeviceId};
use crate::sim::EventTime;

/// 布线：NPU <-> 交换机双向链路，并把交换机本体与（若计价）网卡
/// 计入累计造价。
pub(crate) fn construct(
    topo: &mut Topology,
    npus: &[DeviceId],
    switch_device: DeviceId,
    bandwidth: Bandwidth,
    latency: EventTime,
) {
    assert!(!npus.is_empty(), "switch block needs npus");

    for &npu in npus {
        topo.connect(npu, switch_device, bandwidth, latency, true);
    }

    let n = npus.len() as f64;

    // 交换机造价按 radix（= NPU 数）和带宽缩放
    let switch_cost = topo.cost_model().get_switch_cost(1, 1);
    assert!(switch_cost > 0.0, "switch unit cost must be positive");
    topo.add_cost(switch_cost * n * bandwidth);

    // 网卡单价非正表示该配置不使用网卡
    let nic_cost = topo.cost_model().get_nic_cost(1, 1);
    if nic_cost > 0.0 {
        topo.add_cost(nic_cost * n * bandwidth);
    }
}

/// 路由：经交换机中转，恒为 `[src, switch, dest]`
pub(crate) fn route(
    npus: &[DeviceId],
    switch_device: DeviceId,
    src: usize,
    dest: usize,
) -> Vec<DeviceId> {
    vec![npus[src], switch_device, npus[dest]]
}

/// 造价贡献：2n 条单向链路 + 交换机本体 + 可选网卡
pub(crate) fn cost_block(
    model: &CostModel,
    current_dim: usize,
    total_dim: usize,
    npus_count: usize,
    bandwidth: Bandwidth,
) -> DollarCost {
    let n = npus_count as f64;
    let mut cost = 0.0;

    let link_cost = model.get_link_cost(current_dim, total_dim);
    assert!(link_cost > 0.0, "link unit cost must be positive");
    cost += link_cost * bandwidth * (2.0 * n); // NPU 到交换机来回各一条

    let switch_cost = model.get_switch_cost(current_dim, total_dim);
    assert!(switch_cost > 0.0, "switch unit cost must be positive");
    cost += switch_cost * n * bandwidth;

    let nic_cost = model.get_nic_cost(current_dim, total_dim);
    if nic_cost > 0.0 {
        cost += nic_cost * n * bandwidth;
    }

    cost
}

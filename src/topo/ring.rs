//! 环形构件
//!
//! 相邻 NPU 双向成环，路由沿较短的一侧绕行（等距时走正向）。

use super::topology::Topology;
use crate::cost::{CostModel, DollarCost};
use crate::net::{Bandwidth, DeviceId};
use crate::sim::EventTime;

/// 布线：i <-> (i+1) mod n 双向链路
pub(crate) fn construct(
    topo: &mut Topology,
    npus: &[DeviceId],
    bandwidth: Bandwidth,
    latency: EventTime,
) {
    let n = npus.len();
    assert!(n >= 3, "ring block needs at least 3 npus");

    for i in 0..n {
        topo.connect(npus[i], npus[(i + 1) % n], bandwidth, latency, true);
    }
}

/// 路由：比较两个方向的跳数，走较短的一侧
pub(crate) fn route(npus: &[DeviceId], src: usize, dest: usize) -> Vec<DeviceId> {
    let n = npus.len();
    let forward = (dest + n - src) % n;
    let backward = n - forward;

    let mut route = vec![npus[src]];
    let mut cur = src;
    if forward <= backward {
        while cur != dest {
            cur = (cur + 1) % n;
            route.push(npus[cur]);
        }
    } else {
        while cur != dest {
            cur = (cur + n - 1) % n;
            route.push(npus[cur]);
        }
    }
    route
}

/// 造价贡献：双向环共 2n 条单向链路
pub(crate) fn cost_block(
    model: &CostModel,
    current_dim: usize,
    total_dim: usize,
    npus_count: usize,
    bandwidth: Bandwidth,
) -> DollarCost {
    let link_cost = model.get_link_cost(current_dim, total_dim);
    assert!(link_cost > 0.0, "link unit cost must be positive");

    let links_count = 2 * npus_count;
    link_cost * bandwidth * links_count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorter_arc_wins_and_ties_go_forward() {
        let npus: Vec<DeviceId> = (10..15).map(DeviceId).collect();
        assert_eq!(
            route(&npus, 0, 2),
            vec![DeviceId(10), DeviceId(11), DeviceId(12)]
        );
        assert_eq!(
            route(&npus, 0, 3),
            vec![DeviceId(10), DeviceId(14), DeviceId(13)]
        );

        let even: Vec<DeviceId> = (0..4).map(DeviceId).collect();
        assert_eq!(
            route(&even, 0, 2),
            vec![DeviceId(0), DeviceId(1), DeviceId(2)]
        );
    }
}

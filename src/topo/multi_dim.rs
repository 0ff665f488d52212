//! 多维组合
//!
//! 把若干单维构件按维度组合成一个拓扑：全部 NPU 先行创建
//! （id 连续），再逐维按"除本维外坐标相同"分组布线，
//! 同一 NPU 由各维构件共享。

use super::basic::{BasicTopology, TopologyBuildingBlock};
use super::topology::Topology;
use crate::cost::{CostModel, MAX_DIM};
use crate::net::{Bandwidth, DeviceId};
use crate::sim::EventTime;
use tracing::debug;

/// 一个网络维度的形状参数
#[derive(Debug, Clone)]
pub struct DimDesc {
    pub kind: TopologyBuildingBlock,
    pub npus_count: usize,
    pub bandwidth: Bandwidth,
    pub latency: EventTime,
}

/// 构建多维拓扑。维度 0 的坐标变化最快。
pub(crate) fn build(dims: &[DimDesc]) -> Topology {
    assert!(!dims.is_empty(), "topology needs at least one dimension");
    assert!(
        dims.len() <= MAX_DIM,
        "too many dimensions: {} (max {MAX_DIM})",
        dims.len()
    );
    for (dim, desc) in dims.iter().enumerate() {
        assert!(desc.npus_count > 0, "dim {dim}: npus count must be positive");
        assert!(desc.bandwidth > 0.0, "dim {dim}: bandwidth must be positive");
    }

    let shape: Vec<usize> = dims.iter().map(|d| d.npus_count).collect();
    let npus_count: usize = shape.iter().product();
    debug!(?shape, npus_count, "构建多维拓扑");

    let mut topo = Topology::new(CostModel::default());

    // 全部 NPU 先行创建，保证其 id 连续占据 [0, npus_count)；
    // 交换机等额外设备的 id 排在其后。
    for i in 0..npus_count {
        topo.create_npu(format!("npu{i}"));
    }

    for (dim, desc) in dims.iter().enumerate() {
        let groups = npus_count / desc.npus_count;
        let mut blocks = Vec::with_capacity(groups);

        for g in 0..groups {
            let members = group_members(&shape, dim, g);
            let block = match desc.kind {
                TopologyBuildingBlock::FullyConnected => BasicTopology::fully_connected(
                    &mut topo,
                    members,
                    desc.bandwidth,
                    desc.latency,
                ),
                TopologyBuildingBlock::Ring => {
                    BasicTopology::ring(&mut topo, members, desc.bandwidth, desc.latency)
                }
                TopologyBuildingBlock::Switch => {
                    let sw = topo.create_switch(format!("sw{dim}_{g}"));
                    BasicTopology::switch(&mut topo, members, sw, desc.bandwidth, desc.latency)
                }
            };
            blocks.push(block);
        }

        topo.push_dim(desc, blocks);
    }

    topo
}

/// 设备 id -> 逐维坐标（维度 0 变化最快）
pub(crate) fn coords_of(shape: &[usize], id: usize) -> Vec<usize> {
    let mut rem = id;
    let mut coords = Vec::with_capacity(shape.len());
    for &n in shape {
        coords.push(rem % n);
        rem /= n;
    }
    coords
}

/// 逐维坐标 -> 设备 id
pub(crate) fn id_of(shape: &[usize], coords: &[usize]) -> usize {
    let mut id = 0;
    let mut stride = 1;
    for (&c, &n) in coords.iter().zip(shape) {
        id += c * stride;
        stride *= n;
    }
    id
}

/// 某设备在 dim 维所属的组号：其余维坐标的按序编码
pub(crate) fn group_index(shape: &[usize], coords: &[usize], dim: usize) -> usize {
    let mut idx = 0;
    let mut stride = 1;
    for (d, (&c, &n)) in coords.iter().zip(shape).enumerate() {
        if d == dim {
            continue;
        }
        idx += c * stride;
        stride *= n;
    }
    idx
}

/// dim 维第 g 组的成员设备（按本维坐标升序）
fn group_members(shape: &[usize], dim: usize, g: usize) -> Vec<DeviceId> {
    let mut coords = vec![0; shape.len()];
    let mut rem = g;
    for (d, &n) in shape.iter().enumerate() {
        if d == dim {
            continue;
        }
        coords[d] = rem % n;
        rem /= n;
    }

    (0..shape[dim])
        .map(|c| {
            coords[dim] = c;
            DeviceId(id_of(shape, &coords))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_roundtrip() {
        let shape = [2usize, 3, 4];
        for id in 0..24 {
            let coords = coords_of(&shape, id);
            assert_eq!(id_of(&shape, &coords), id);
        }
        assert_eq!(coords_of(&shape, 7), vec![1, 0, 1]);
    }

    #[test]
    fn every_npu_belongs_to_its_dim_group() {
        let shape = [2usize, 3];
        for dim in 0..shape.len() {
            for id in 0..6 {
                let coords = coords_of(&shape, id);
                let g = group_index(&shape, &coords, dim);
                let members = group_members(&shape, dim, g);
                assert!(members.contains(&DeviceId(id)));
            }
        }
    }
}

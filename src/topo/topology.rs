//! 拓扑基座
//!
//! 持有设备/链路注册表与逐维元数据，累计美元造价，
//! 并提供注入（send）与多维路由入口。

use super::basic::{BasicTopology, TopologyBuildingBlock};
use super::multi_dim::{self, DimDesc};
use crate::cost::{CostModel, DollarCost};
use crate::net::{Bandwidth, Chunk, ChunkCallback, DeviceId, NetWorld, Network};
use crate::sim::{EventQueue, EventTime};
use tracing::debug;

/// 网络拓扑：设备注册表的唯一属主 + 逐维形状元数据 + 累计造价。
///
/// 构建完成后形状不可变；所有布线入口都是 crate 内部的，
/// 只在构造期使用。
pub struct Topology {
    world: NetWorld,
    cost_model: CostModel,
    topology_cost: DollarCost,
    npus_count: usize,
    blocks_per_dim: Vec<Vec<BasicTopology>>,
    kind_per_dim: Vec<TopologyBuildingBlock>,
    npus_count_per_dim: Vec<usize>,
    bandwidth_per_dim: Vec<Bandwidth>,
    latency_per_dim: Vec<EventTime>,
}

impl Topology {
    pub(crate) fn new(cost_model: CostModel) -> Self {
        Self {
            world: NetWorld::default(),
            cost_model,
            topology_cost: 0.0,
            npus_count: 0,
            blocks_per_dim: Vec::new(),
            kind_per_dim: Vec::new(),
            npus_count_per_dim: Vec::new(),
            bandwidth_per_dim: Vec::new(),
            latency_per_dim: Vec::new(),
        }
    }

    /// 单维全连接拓扑：自动创建设备 `0..npus_count-1`
    pub fn fully_connected(npus_count: usize, bandwidth: Bandwidth, latency: EventTime) -> Self {
        Self::multi_dim(&[DimDesc {
            kind: TopologyBuildingBlock::FullyConnected,
            npus_count,
            bandwidth,
            latency,
        }])
    }

    /// 单维环形拓扑：自动创建设备 `0..npus_count-1`
    pub fn ring(npus_count: usize, bandwidth: Bandwidth, latency: EventTime) -> Self {
        Self::multi_dim(&[DimDesc {
            kind: TopologyBuildingBlock::Ring,
            npus_count,
            bandwidth,
            latency,
        }])
    }

    /// 单维交换机拓扑：自动创建 NPU `0..npus_count-1`，
    /// 外加 id 为 `npus_count` 的交换机设备
    pub fn switch(npus_count: usize, bandwidth: Bandwidth, latency: EventTime) -> Self {
        Self::multi_dim(&[DimDesc {
            kind: TopologyBuildingBlock::Switch,
            npus_count,
            bandwidth,
            latency,
        }])
    }

    /// 多维组合拓扑：见 `multi_dim` 模块
    pub fn multi_dim(dims: &[DimDesc]) -> Self {
        multi_dim::build(dims)
    }

    /// 创建 NPU 设备（arena 索引保证 id 唯一）
    pub(crate) fn create_npu(&mut self, name: impl Into<String>) -> DeviceId {
        self.npus_count += 1;
        self.world.net.add_npu(name)
    }

    /// 创建交换机设备
    pub(crate) fn create_switch(&mut self, name: impl Into<String>) -> DeviceId {
        self.world.net.add_switch(name)
    }

    /// 连接 src -> dest（bidirectional 时再加反向一条），
    /// 每创建一条单向链路就按单维价位累计一次链路造价。
    pub(crate) fn connect(
        &mut self,
        src: DeviceId,
        dest: DeviceId,
        bandwidth: Bandwidth,
        latency: EventTime,
        bidirectional: bool,
    ) {
        let link_cost = self.cost_model.get_link_cost(1, 1);
        assert!(link_cost > 0.0, "link unit cost must be positive");
        let link_cost = link_cost * bandwidth;

        self.world.net.connect(src, dest, bandwidth, latency);
        self.topology_cost += link_cost;

        if bidirectional {
            self.world.net.connect(dest, src, bandwidth, latency);
            self.topology_cost += link_cost;
        }
    }

    /// 追加非链路造价（交换机本体、网卡）
    pub(crate) fn add_cost(&mut self, cost: DollarCost) {
        self.topology_cost += cost;
    }

    pub(crate) fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// 登记一个布线完毕的维度
    pub(crate) fn push_dim(&mut self, desc: &DimDesc, blocks: Vec<BasicTopology>) {
        self.kind_per_dim.push(desc.kind);
        self.npus_count_per_dim.push(desc.npus_count);
        self.bandwidth_per_dim.push(desc.bandwidth);
        self.latency_per_dim.push(desc.latency);
        self.blocks_per_dim.push(blocks);
    }

    /// 构造 src 到 dest 的路由（含两端），逐维修正坐标并拼接各维路段。
    ///
    /// 例如 route(0, 3) = [0, 5, 7, 2, 3]
    pub fn route(&self, src: DeviceId, dest: DeviceId) -> Vec<DeviceId> {
        assert!(src.0 < self.npus_count, "route src must be an NPU");
        assert!(dest.0 < self.npus_count, "route dest must be an NPU");
        assert!(src != dest, "route endpoints must differ");

        let shape = &self.npus_count_per_dim;
        let dest_coords = multi_dim::coords_of(shape, dest.0);

        let mut route = vec![src];
        let mut cur = src;
        for dim in 0..self.dims_count() {
            let mut cur_coords = multi_dim::coords_of(shape, cur.0);
            if cur_coords[dim] == dest_coords[dim] {
                continue;
            }

            let group = multi_dim::group_index(shape, &cur_coords, dim);
            cur_coords[dim] = dest_coords[dim];
            let target = DeviceId(multi_dim::id_of(shape, &cur_coords));

            let segment = self.blocks_per_dim[dim][group].route(cur, target);
            route.extend_from_slice(&segment[1..]); // 衔接设备不重复
            cur = target;
        }

        debug_assert_eq!(cur, dest);
        route
    }

    /// 创建 chunk（路由由调用方通过 `route` 预先求得）
    pub fn make_chunk(
        &mut self,
        size: u64,
        route: Vec<DeviceId>,
        on_done: Option<ChunkCallback>,
    ) -> Chunk {
        self.world.net.make_chunk(size, route, on_done)
    }

    /// 注入一次传输：外部流量生成器的唯一入口。
    /// 结果只通过 chunk 自带的完成回调报告。
    pub fn send(&mut self, chunk: Chunk, sim: &mut EventQueue) {
        let src = chunk.at();
        assert!(src.0 < self.devices_count(), "chunk src out of range");
        debug!(chunk_id = chunk.id.0, ?src, "注入传输");
        self.world.net.send(chunk, sim);
    }

    /// 拓扑的累计美元造价。前置条件：至少已有一条链路。
    pub fn get_topology_cost(&self) -> DollarCost {
        assert!(self.topology_cost > 0.0, "no priced resource wired yet");
        self.topology_cost
    }

    /// 某一维全部构件按 (dim+1, dims_count) 价位的造价贡献之和
    pub fn get_topology_cost_block(&self, dim: usize) -> DollarCost {
        assert!(dim < self.dims_count(), "dim {dim} out of range");
        let total_dim = self.dims_count();
        self.blocks_per_dim[dim]
            .iter()
            .map(|b| b.cost_block(&self.cost_model, dim + 1, total_dim))
            .sum()
    }

    /// NPU 数量（不含交换机等非端点设备）
    pub fn npus_count(&self) -> usize {
        assert!(self.npus_count > 0);
        self.npus_count
    }

    /// 设备总数（含交换机）
    pub fn devices_count(&self) -> usize {
        let count = self.world.net.devices_count();
        assert!(count >= self.npus_count);
        count
    }

    /// 网络维度数
    pub fn dims_count(&self) -> usize {
        self.kind_per_dim.len()
    }

    pub fn kind_of_dim(&self, dim: usize) -> TopologyBuildingBlock {
        self.kind_per_dim[dim]
    }

    pub fn npus_count_of_dim(&self, dim: usize) -> usize {
        self.npus_count_per_dim[dim]
    }

    pub fn bandwidth_of_dim(&self, dim: usize) -> Bandwidth {
        self.bandwidth_per_dim[dim]
    }

    pub fn latency_of_dim(&self, dim: usize) -> EventTime {
        self.latency_per_dim[dim]
    }

    pub fn npus_count_per_dim(&self) -> &[usize] {
        &self.npus_count_per_dim
    }

    pub fn bandwidth_per_dim(&self) -> &[Bandwidth] {
        &self.bandwidth_per_dim
    }

    /// 仿真世界（交给 `EventQueue::run` 驱动）
    pub fn world_mut(&mut self) -> &mut NetWorld {
        &mut self.world
    }

    /// 只读访问网络注册表（统计、链路状态查询）
    pub fn net(&self) -> &Network {
        &self.world.net
    }
}

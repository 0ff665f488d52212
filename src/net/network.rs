//! 设备/链路注册表
//!
//! 以 id 索引的 arena 持有全部设备与链路，并承载 chunk 的逐跳推进逻辑。

use super::admit_chunk::AdmitChunk;
use super::chunk::{Chunk, ChunkCallback};
use super::device::{Device, DeviceKind};
use super::id::{ChunkId, DeviceId, LinkId};
use super::link::{Bandwidth, Link};
use super::stats::Stats;
use crate::sim::{EventQueue, EventTime};
use tracing::{debug, info, trace};

/// 网络注册表：设备与链路的唯一属主。
///
/// 设备/链路在拓扑构建期一次性创建，之后形状不再变化；
/// 事件只通过 id 引用它们。
#[derive(Debug, Default)]
pub struct Network {
    devices: Vec<Device>,
    links: Vec<Link>,
    next_chunk_id: u64,
    pub stats: Stats,
}

impl Network {
    /// 添加 NPU 设备
    pub fn add_npu(&mut self, name: impl Into<String>) -> DeviceId {
        let id = DeviceId(self.devices.len());
        self.devices.push(Device::new(id, name, DeviceKind::Npu));
        id
    }

    /// 添加交换机设备
    pub fn add_switch(&mut self, name: impl Into<String>) -> DeviceId {
        let id = DeviceId(self.devices.len());
        self.devices.push(Device::new(id, name, DeviceKind::Switch));
        id
    }

    /// 连接两个设备（创建单向链路）
    pub fn connect(
        &mut self,
        src: DeviceId,
        dest: DeviceId,
        bandwidth: Bandwidth,
        latency: EventTime,
    ) -> LinkId {
        assert!(src.0 < self.devices.len(), "src {:?} out of range", src);
        assert!(dest.0 < self.devices.len(), "dest {:?} out of range", dest);
        assert!(src != dest, "self-link {:?}", src);
        assert!(bandwidth > 0.0, "bandwidth must be positive");

        let id = LinkId(self.links.len());
        self.links.push(Link::new(src, dest, bandwidth, latency));
        self.devices[src.0].connect(dest, id);
        trace!(link = ?id, ?src, ?dest, bandwidth, latency = ?latency, "创建链路");
        id
    }

    /// 创建 chunk（分配 id；路由由调用方给定，注入后不再改变）
    pub fn make_chunk(
        &mut self,
        size: u64,
        route: Vec<DeviceId>,
        on_done: Option<ChunkCallback>,
    ) -> Chunk {
        let id = ChunkId(self.next_chunk_id);
        self.next_chunk_id = self.next_chunk_id.wrapping_add(1);
        Chunk::new(id, size, route, on_done)
    }

    /// 从 chunk 当前所在设备继续推进。
    ///
    /// 已到路由末端则触发完成回调；否则交给通往下一跳的链路，
    /// 在一跳传播时延之后被该链路接纳。
    #[tracing::instrument(skip(self, chunk, sim), fields(chunk_id = chunk.id.0, at = ?chunk.at(), hop = chunk.hop))]
    pub fn send(&mut self, chunk: Chunk, sim: &mut EventQueue) {
        if !chunk.has_next() {
            self.finish_chunk(chunk, sim);
            return;
        }

        let at = chunk.at();
        let next = chunk.next().expect("has_next checked above");
        let link_id = self.devices[at.0]
            .link_to(next)
            .unwrap_or_else(|| panic!("no link from {:?} to {:?}", at, next));
        let latency = self.links[link_id.0].latency;

        debug!(link = ?link_id, ?next, latency = ?latency, "🚀 交给下一跳链路");
        sim.schedule(
            sim.now().plus(latency.0),
            AdmitChunk {
                link: link_id,
                chunk,
            },
        );
    }

    /// 链路接纳事件入口
    pub(crate) fn on_chunk_admitted(&mut self, link: LinkId, chunk: Chunk, sim: &mut EventQueue) {
        self.links[link.0].admit(link, chunk, sim);
    }

    /// 传输完成事件入口：非过期则把 chunk 前进一跳并继续推进。
    pub(crate) fn on_transfer_done(
        &mut self,
        link: LinkId,
        chunk: ChunkId,
        generation: u64,
        sim: &mut EventQueue,
    ) {
        if let Some(chunk) = self.links[link.0].complete(link, chunk, generation, sim) {
            let chunk = chunk.advance();
            self.send(chunk, sim);
        }
    }

    /// chunk 到达目的设备
    fn finish_chunk(&mut self, mut chunk: Chunk, sim: &mut EventQueue) {
        info!(
            chunk_id = chunk.id.0,
            dest = ?chunk.dest(),
            size = chunk.size,
            now = ?sim.now(),
            "✅ chunk 送达目的设备"
        );

        self.stats.completed_chunks += 1;
        self.stats.completed_bytes += chunk.size;

        if let Some(cb) = chunk.take_on_done() {
            cb(sim);
        }
    }

    pub fn device(&self, id: DeviceId) -> &Device {
        &self.devices[id.0]
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    /// 查找 src -> dest 的单向链路
    pub fn link_between(&self, src: DeviceId, dest: DeviceId) -> Option<&Link> {
        self.devices[src.0]
            .link_to(dest)
            .map(|id| &self.links[id.0])
    }

    /// 设备总数（含交换机等非 NPU 设备）
    pub fn devices_count(&self) -> usize {
        self.devices.len()
    }

    /// 单向链路总数
    pub fn links_count(&self) -> usize {
        self.links.len()
    }
}

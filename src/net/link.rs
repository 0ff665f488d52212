//! 链路类型
//!
//! 定义网络链路及其拥塞感知的公平带宽共享算法。

use super::chunk::Chunk;
use super::id::{ChunkId, DeviceId, LinkId};
use super::transfer_done::TransferDone;
use crate::sim::{EventQueue, EventTime};
use tracing::{debug, trace};

/// 链路带宽，单位 bytes/ns（数值上等于 GB/s）。
pub type Bandwidth = f64;

/// 链路上的一笔在途传输：chunk 本体 + 剩余字节数。
/// 剩余字节数用浮点记账，因为公平分摊的速率一般不是整数。
#[derive(Debug)]
struct ActiveTransfer {
    chunk: Chunk,
    remaining: f64,
}

/// 网络链路：固定带宽/时延的单向通道。
///
/// 多个 chunk 可同时活跃在一条链路上，链路把带宽在它们之间
/// 等分（max-min 公平）。每当活跃集合变化，重算所有在途传输的
/// 完成时刻并重新调度；旧的完成事件通过 generation 校验作废。
#[derive(Debug)]
pub struct Link {
    pub src: DeviceId,
    pub dest: DeviceId,
    /// 容量（bytes/ns），固定且 > 0
    pub bandwidth: Bandwidth,
    /// 传播时延（ns），chunk 进入链路时一次性附加
    pub latency: EventTime,
    active: Vec<ActiveTransfer>,
    /// 上一次记账重算的仿真时刻
    last_recompute: EventTime,
    /// 每次重算递增；完成事件携带调度时的值，不匹配即为过期事件
    generation: u64,
}

impl Link {
    /// 创建新链路
    pub(crate) fn new(
        src: DeviceId,
        dest: DeviceId,
        bandwidth: Bandwidth,
        latency: EventTime,
    ) -> Self {
        assert!(bandwidth > 0.0, "link bandwidth must be positive");
        Self {
            src,
            dest,
            bandwidth,
            latency,
            active: Vec::new(),
            last_recompute: EventTime::ZERO,
            generation: 0,
        }
    }

    /// 当前活跃传输数量
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// 当前每笔传输分得的瞬时速率（bytes/ns）；空闲时为 0。
    /// 活跃时所有传输速率之和恒等于 `bandwidth`。
    pub fn rate(&self) -> f64 {
        if self.active.is_empty() {
            0.0
        } else {
            self.bandwidth / self.active.len() as f64
        }
    }

    /// 某笔在途传输的剩余字节数（按上次记账时刻计）
    pub fn remaining_of(&self, chunk: ChunkId) -> Option<f64> {
        self.active
            .iter()
            .find(|t| t.chunk.id == chunk)
            .map(|t| t.remaining)
    }

    /// 接纳一个 chunk：冻结旧记账、加入活跃集合、按新速率重排完成事件。
    #[tracing::instrument(skip(self, chunk, sim), fields(link = ?link_id, chunk_id = chunk.id.0))]
    pub(crate) fn admit(&mut self, link_id: LinkId, chunk: Chunk, sim: &mut EventQueue) {
        let now = sim.now();
        debug!(
            active = self.active.len(),
            size = chunk.size,
            "📥 chunk 进入链路"
        );

        self.freeze_progress(now);
        let remaining = chunk.size as f64;
        self.active.push(ActiveTransfer { chunk, remaining });
        self.reschedule_completions(link_id, now, sim);
    }

    /// 处理一个完成事件。
    ///
    /// generation 不匹配说明该事件已被后来的重算取代，静默丢弃
    /// （事件队列没有取消原语，以此代替显式取消）。
    /// 匹配则把该 chunk 移出活跃集合，为剩余传输重算提速后的完成时刻，
    /// 并交还完成的 chunk。
    pub(crate) fn complete(
        &mut self,
        link_id: LinkId,
        chunk_id: ChunkId,
        generation: u64,
        sim: &mut EventQueue,
    ) -> Option<Chunk> {
        if generation != self.generation {
            trace!(
                link = ?link_id,
                chunk = chunk_id.0,
                stale = generation,
                current = self.generation,
                "过期完成事件，丢弃"
            );
            return None;
        }

        let now = sim.now();
        self.freeze_progress(now);

        let idx = self
            .active
            .iter()
            .position(|t| t.chunk.id == chunk_id)
            .expect("completed chunk must be in the active set");
        let done = self.active.swap_remove(idx);
        debug!(
            link = ?link_id,
            chunk = chunk_id.0,
            survivors = self.active.len(),
            "📤 chunk 离开链路"
        );

        self.reschedule_completions(link_id, now, sim);
        Some(done.chunk)
    }

    /// 冻结记账：把自上次重算以来、按旧速率传完的字节
    /// 从每笔在途传输的剩余量中扣除。
    fn freeze_progress(&mut self, now: EventTime) {
        if !self.active.is_empty() {
            let elapsed = (now.0 - self.last_recompute.0) as f64;
            let rate = self.bandwidth / self.active.len() as f64;
            for t in &mut self.active {
                t.remaining = (t.remaining - elapsed * rate).max(0.0);
            }
        }
        self.last_recompute = now;
    }

    /// 按当前活跃集合的等分速率，为每笔传输调度新的完成事件。
    /// generation 先递增，使所有旧完成事件作废。
    fn reschedule_completions(&mut self, link_id: LinkId, now: EventTime, sim: &mut EventQueue) {
        self.generation = self.generation.wrapping_add(1);
        if self.active.is_empty() {
            return;
        }

        let rate = self.bandwidth / self.active.len() as f64;
        for t in &self.active {
            let finish = now.plus((t.remaining / rate).round() as u64);
            trace!(
                chunk = t.chunk.id.0,
                remaining = t.remaining,
                rate,
                finish = ?finish,
                "调度完成事件"
            );
            sim.schedule(
                finish,
                TransferDone {
                    link: link_id,
                    chunk: t.chunk.id,
                    generation: self.generation,
                },
            );
        }
    }
}

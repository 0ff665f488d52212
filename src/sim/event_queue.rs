//! 事件队列
//!
//! 定义事件驱动调度器，维护当前时间与待执行事件。

use super::event::Event;
use super::scheduled_event::ScheduledEvent;
use super::time::EventTime;
use super::world::World;
use std::collections::BinaryHeap;
use tracing::{debug, info, trace};

/// 事件驱动调度器：维护当前仿真时间与事件队列。
///
/// 单逻辑线程：所有"并发"都通过调度未来事件表达，任何地方都不阻塞等待。
#[derive(Default)]
pub struct EventQueue {
    now: EventTime,
    next_seq: u64,
    q: BinaryHeap<ScheduledEvent>,
}

impl EventQueue {
    /// 获取当前仿真时间
    pub fn now(&self) -> EventTime {
        self.now
    }

    /// 是否所有已注册事件都已执行完毕
    pub fn finished(&self) -> bool {
        self.q.is_empty()
    }

    /// 调度事件在指定时间执行。
    ///
    /// 同一时刻的多个事件按调度顺序（FIFO）执行。
    /// 往过去调度属于调用方契约违例，直接 panic。
    #[tracing::instrument(skip(self, ev), fields(event_type = std::any::type_name::<E>(), schedule_at = ?at))]
    pub fn schedule<E: Event>(&mut self, at: EventTime, ev: E) {
        assert!(
            at >= self.now,
            "schedule into the past: at={:?} now={:?}",
            at,
            self.now
        );

        let seq = self.next_seq;
        trace!(now = ?self.now, seq, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent {
            at,
            seq,
            ev: Box::new(ev),
        });

        debug!(queue_size = self.q.len(), "事件已加入队列");
    }

    /// 推进事件队列：把当前时间前进到最近的事件时刻，
    /// 并按 FIFO 顺序执行该时刻注册的全部事件
    /// （包括执行过程中补充调度到同一时刻的事件）。
    ///
    /// 队列为空时调用属于契约违例，直接 panic；调用前先检查 `finished()`。
    pub fn proceed(&mut self, world: &mut dyn World) {
        assert!(!self.finished(), "proceed on an empty event queue");

        let at = self.q.peek().expect("queue non-empty").at;
        self.now = at;
        debug!(now = ?self.now, "推进到下一事件时刻");

        while let Some(top) = self.q.peek() {
            if top.at != at {
                break;
            }
            let item = self.q.pop().expect("peek then pop");
            trace!(seq = item.seq, remaining_queue = self.q.len(), "执行事件");
            item.ev.execute(self, world);
        }
    }

    /// 运行直到事件队列为空或下一事件晚于 `until`。
    pub fn run_until(&mut self, until: EventTime, world: &mut dyn World) {
        while let Some(top) = self.q.peek() {
            if top.at > until {
                break;
            }
            self.proceed(world);
        }
        self.now = self.now.max(until);
    }

    /// 运行所有事件直到队列为空。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) {
        info!("▶️  开始运行仿真");
        debug!(now = ?self.now, queue_size = self.q.len(), "初始状态");

        let mut batch_count = 0;
        while !self.finished() {
            batch_count += 1;
            self.proceed(world);
        }

        info!(
            total_batches = batch_count,
            final_time = ?self.now,
            "✅ 仿真完成"
        );
    }
}

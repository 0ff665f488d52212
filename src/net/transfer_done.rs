//! 传输完成事件
//!
//! 某笔在途传输在其所在链路上收尾时触发。

use super::id::{ChunkId, LinkId};
use super::net_world::NetWorld;
use crate::sim::{Event, EventQueue, World};

/// 事件：链路上一笔传输按当时速率推算的完成时刻已到。
///
/// 携带调度时的链路 generation；若链路在此期间重算过记账，
/// 该事件即为过期事件，由链路校验并丢弃。
#[derive(Debug)]
pub struct TransferDone {
    pub link: LinkId,
    pub chunk: ChunkId,
    pub generation: u64,
}

impl Event for TransferDone {
    fn execute(self: Box<Self>, sim: &mut EventQueue, world: &mut dyn World) {
        let TransferDone {
            link,
            chunk,
            generation,
        } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.net.on_transfer_done(link, chunk, generation, sim);
    }
}

//! 链路接纳事件
//!
//! chunk 经过一跳传播时延后进入链路的活跃集合。

use super::chunk::Chunk;
use super::id::LinkId;
use super::net_world::NetWorld;
use crate::sim::{Event, EventQueue, World};

/// 事件：chunk 的单次传播时延已过，正式进入链路参与带宽分摊。
#[derive(Debug)]
pub struct AdmitChunk {
    pub link: LinkId,
    pub chunk: Chunk,
}

impl Event for AdmitChunk {
    fn execute(self: Box<Self>, sim: &mut EventQueue, world: &mut dyn World) {
        let AdmitChunk { link, chunk } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.net.on_chunk_admitted(link, chunk, sim);
    }
}

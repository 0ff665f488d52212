//! 演示和示例代码
//!
//! 包含注入事件等 bins 与测试共用的类型。

use crate::net::{ChunkCallback, DeviceId, NetWorld};
use crate::sim::{Event, EventQueue, World};

/// 传输注入事件
///
/// 在触发时刻创建 chunk 并从路由首个设备发出，
/// 便于按任意时刻错峰注入多笔传输。
pub struct InjectChunk {
    pub size: u64,
    pub route: Vec<DeviceId>,
    pub on_done: Option<ChunkCallback>,
}

impl Event for InjectChunk {
    fn execute(self: Box<Self>, sim: &mut EventQueue, world: &mut dyn World) {
        let InjectChunk {
            size,
            route,
            on_done,
        } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");

        let chunk = w.net.make_chunk(size, route, on_done);
        w.net.send(chunk, sim);
    }
}

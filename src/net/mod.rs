//! 传输引擎模块
//!
//! 此模块包含流级传输仿真的核心组件：设备、链路、数据块和注册表。

// 子模块声明
mod admit_chunk;
mod chunk;
mod device;
mod id;
mod link;
mod net_world;
mod network;
mod stats;
mod transfer_done;

// 重新导出公共接口
pub use admit_chunk::AdmitChunk;
pub use chunk::{Chunk, ChunkCallback};
pub use device::{Device, DeviceKind};
pub use id::{ChunkId, DeviceId, LinkId};
pub use link::{Bandwidth, Link};
pub use net_world::NetWorld;
pub use network::Network;
pub use stats::Stats;
pub use transfer_done::TransferDone;

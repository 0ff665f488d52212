//! 拓扑模块
//!
//! 此模块包含拓扑基座、单维构件（全连接/环形/交换机）、
//! 多维组合以及拓扑描述文件。

// 子模块声明
mod basic;
mod fully_connected;
mod multi_dim;
mod ring;
mod spec;
mod switch;
mod topology;

// 重新导出公共接口
pub use basic::{BasicTopology, TopologyBuildingBlock};
pub use multi_dim::DimDesc;
pub use spec::{DimSpec, NetworkSpec, SpecError, TransferSpec};
pub use topology::Topology;

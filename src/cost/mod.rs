//! 造价模型模块
//!
//! 按网络维度给链路/交换机/网卡定价。

mod model;

pub use model::{CostModel, DollarCost, MAX_DIM};

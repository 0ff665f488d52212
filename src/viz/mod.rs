//! 传输轨迹记录（用于离线分析/回放）
//!
//! 设计目标：
//! - **结构化**：用 JSON 事件而不是解析文本日志
//! - **轻量**：不引入复杂依赖/运行时服务
//! - **可回放**：支持时间轴排序、按 chunk 过滤

mod types;

pub use types::{TraceDeviceInfo, TraceDeviceKind, TraceEvent, TraceEventKind, TraceLogger};

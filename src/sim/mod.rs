//! 仿真核心模块
//!
//! 此模块包含事件驱动仿真的核心组件，如仿真时间、事件、世界和事件队列。

// 子模块声明
mod event;
mod event_queue;
mod scheduled_event;
mod time;
mod world;

// 重新导出公共接口
pub use event::Event;
pub use event_queue::EventQueue;
pub use scheduled_event::ScheduledEvent;
pub use time::EventTime;
pub use world::World;

use serde::{Deserialize, Serialize};

/// 轨迹事件类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEventKind {
    /// 拓扑元信息（建议作为 t=0 的第一条事件）
    Meta {
        devices: Vec<TraceDeviceInfo>,
        links_count: usize,
        dims: Vec<usize>,
    },
    /// chunk 注入（进入其路由的首个设备）
    ChunkInjected {
        src: usize,
        dest: usize,
        size_bytes: u64,
        hops: usize,
    },
    /// chunk 送达目的设备
    ChunkDelivered { dest: usize },
}

/// 设备类别（便于区分端点与交换机）
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceDeviceKind {
    Npu,
    Switch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceDeviceInfo {
    pub id: usize,
    pub name: String,
    pub kind: TraceDeviceKind,
}

/// 一条可回放的轨迹事件（JSON）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    /// 仿真时间（纳秒，和 `EventTime.0` 同口径）
    pub t_ns: u64,
    pub chunk_id: Option<u64>,
    #[serde(flatten)]
    pub kind: TraceEventKind,
}

/// 一个简单的事件收集器（存内存，仿真结束写 JSON 文件）
#[derive(Debug, Default)]
pub struct TraceLogger {
    pub events: Vec<TraceEvent>,
}

impl TraceLogger {
    pub fn push(&mut self, ev: TraceEvent) {
        self.events.push(ev);
    }
}

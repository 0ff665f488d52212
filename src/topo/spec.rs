//! 拓扑描述文件
//!
//! 外部 JSON 配置：逐维形状 + 可选的传输列表。
//! 引擎内部全用致命断言，外部配置必须在构建拓扑之前在这里校验。

use super::basic::TopologyBuildingBlock;
use super::multi_dim::DimDesc;
use super::topology::Topology;
use crate::cost::MAX_DIM;
use crate::sim::EventTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 拓扑描述：1..4 个维度，外加待注入的传输。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub schema_version: u32,
    pub dims: Vec<DimSpec>,
    #[serde(default)]
    pub transfers: Vec<TransferSpec>,
}

/// 一个维度的形状
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimSpec {
    pub kind: TopologyBuildingBlock,
    pub npus: usize,
    /// 链路带宽（GB/s，数值上即 bytes/ns）
    pub bandwidth_gbps: f64,
    /// 单跳传播时延（ns）
    #[serde(default)]
    pub latency_ns: u64,
}

/// 一笔待注入的传输
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferSpec {
    pub src: usize,
    pub dest: usize,
    pub size_bytes: u64,
    /// 注入时刻（ns）
    #[serde(default)]
    pub start_ns: u64,
}

/// 拓扑描述的校验错误
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("topology must have at least one dimension")]
    NoDims,
    #[error("too many dimensions: {0} (max 4)")]
    TooManyDims(usize),
    #[error("dimension {dim}: npus count must be positive")]
    InvalidNpusCount { dim: usize },
    #[error("dimension {dim}: ring needs at least 3 npus, got {got}")]
    RingTooSmall { dim: usize, got: usize },
    #[error("dimension {dim}: bandwidth must be positive, got {got}")]
    InvalidBandwidth { dim: usize, got: f64 },
    #[error("transfer {index}: device {device} out of range (npus = {npus})")]
    DeviceOutOfRange {
        index: usize,
        device: usize,
        npus: usize,
    },
    #[error("transfer {index}: src and dest must differ")]
    SelfTransfer { index: usize },
    #[error("transfer {index}: size must be positive")]
    EmptyTransfer { index: usize },
}

impl NetworkSpec {
    /// 全拓扑 NPU 总数（各维 NPU 数之积）
    pub fn total_npus(&self) -> usize {
        self.dims.iter().map(|d| d.npus).product()
    }

    /// 校验描述是否可以安全交给引擎构建
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.dims.is_empty() {
            return Err(SpecError::NoDims);
        }
        if self.dims.len() > MAX_DIM {
            return Err(SpecError::TooManyDims(self.dims.len()));
        }

        for (dim, d) in self.dims.iter().enumerate() {
            if d.npus == 0 {
                return Err(SpecError::InvalidNpusCount { dim });
            }
            if d.kind == TopologyBuildingBlock::Ring && d.npus < 3 {
                return Err(SpecError::RingTooSmall { dim, got: d.npus });
            }
            if d.bandwidth_gbps <= 0.0 {
                return Err(SpecError::InvalidBandwidth {
                    dim,
                    got: d.bandwidth_gbps,
                });
            }
        }

        let npus = self.total_npus();
        for (index, t) in self.transfers.iter().enumerate() {
            for device in [t.src, t.dest] {
                if device >= npus {
                    return Err(SpecError::DeviceOutOfRange {
                        index,
                        device,
                        npus,
                    });
                }
            }
            if t.src == t.dest {
                return Err(SpecError::SelfTransfer { index });
            }
            if t.size_bytes == 0 {
                return Err(SpecError::EmptyTransfer { index });
            }
        }

        Ok(())
    }

    /// 校验并构建拓扑
    pub fn build(&self) -> Result<Topology, SpecError> {
        self.validate()?;

        let dims: Vec<DimDesc> = self
            .dims
            .iter()
            .map(|d| DimDesc {
                kind: d.kind,
                npus_count: d.npus,
                bandwidth: d.bandwidth_gbps,
                latency: EventTime(d.latency_ns),
            })
            .collect();

        Ok(Topology::multi_dim(&dims))
    }
}

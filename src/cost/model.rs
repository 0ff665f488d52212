//! 造价模型
//!
//! 纯查表：按（当前维度，总维度数）给出链路/交换机/网卡的单位造价。
//! 构建后不可变。

/// 美元造价
pub type DollarCost = f64;

/// 支持的最大网络维度数
pub const MAX_DIM: usize = 4;

// 单价表下标 0 不使用，维度从 1 开始。
const ARRAY_SIZE: usize = MAX_DIM + 1;

type UnitCosts = [DollarCost; ARRAY_SIZE];
type ResourceCosts = [[DollarCost; ARRAY_SIZE]; ARRAY_SIZE];

/// 按维度定价的造价模型。
///
/// 负值是"该配置下不计价"的哨兵：链路/交换机在合法维度范围内
/// 应当为正，网卡查询返回非正值时调用方必须跳过网卡项。
#[derive(Debug, Clone)]
pub struct CostModel {
    link_costs: ResourceCosts,
    switch_costs: ResourceCosts,
    nic_costs: ResourceCosts,
}

impl Default for CostModel {
    fn default() -> Self {
        // 基准单价，按维度 1..4
        let link_unit_costs: UnitCosts = [-1.0, 2.0, 4.0, 4.0, 7.8];
        let switch_unit_costs: UnitCosts = [-1.0, -1.0, 13.0, 13.0, 18.0];
        let nic_unit_costs: UnitCosts = [-1.0, -1.0, -1.0, -1.0, 31.6];

        Self {
            link_costs: initialize_costs(&link_unit_costs),
            switch_costs: initialize_costs(&switch_unit_costs),
            nic_costs: initialize_costs(&nic_unit_costs),
        }
    }
}

impl CostModel {
    /// 链路单位造价（按 bandwidth 再乘以规模）
    pub fn get_link_cost(&self, current_dim: usize, total_dim: usize) -> DollarCost {
        get_resource_cost(&self.link_costs, current_dim, total_dim)
    }

    /// 交换机单位造价
    pub fn get_switch_cost(&self, current_dim: usize, total_dim: usize) -> DollarCost {
        get_resource_cost(&self.switch_costs, current_dim, total_dim)
    }

    /// 网卡单位造价（非正值表示该配置下不使用网卡）
    pub fn get_nic_cost(&self, current_dim: usize, total_dim: usize) -> DollarCost {
        get_resource_cost(&self.nic_costs, current_dim, total_dim)
    }
}

/// 按总维度数展开各 current_dim 的取价。
/// 总维度不同，同一 current_dim 对应的基准档位也不同。
fn initialize_costs(unit_costs: &UnitCosts) -> ResourceCosts {
    let u = unit_costs;
    let mut costs: ResourceCosts = [[-1.0; ARRAY_SIZE]; ARRAY_SIZE];

    // total_dim = 1..4；下标 0 不使用
    costs[1][1] = u[2];
    costs[2][1] = u[2];
    costs[2][2] = u[4];
    costs[3][1] = u[2];
    costs[3][2] = u[3];
    costs[3][3] = u[4];
    costs[4][1] = u[1];
    costs[4][2] = u[2];
    costs[4][3] = u[3];
    costs[4][4] = u[4];

    costs
}

fn get_resource_cost(
    resource_costs: &ResourceCosts,
    current_dim: usize,
    total_dim: usize,
) -> DollarCost {
    assert!(
        (1..=MAX_DIM).contains(&current_dim),
        "current_dim {current_dim} out of range [1, {MAX_DIM}]"
    );
    assert!(
        (1..=MAX_DIM).contains(&total_dim),
        "total_dim {total_dim} out of range [1, {MAX_DIM}]"
    );
    assert!(
        current_dim <= total_dim,
        "current_dim {current_dim} exceeds total_dim {total_dim}"
    );

    resource_costs[total_dim][current_dim]
}

use crate::cost::CostModel;

#[test]
fn single_dim_prices() {
    let model = CostModel::default();
    assert_eq!(model.get_link_cost(1, 1), 4.0);
    assert_eq!(model.get_switch_cost(1, 1), 13.0);
    // 单维配置不给网卡计价
    assert!(model.get_nic_cost(1, 1) < 0.0);
}

#[test]
fn four_dim_prices_cover_every_tier() {
    let model = CostModel::default();
    assert_eq!(model.get_link_cost(1, 4), 2.0);
    assert_eq!(model.get_link_cost(2, 4), 4.0);
    assert_eq!(model.get_link_cost(3, 4), 4.0);
    assert_eq!(model.get_link_cost(4, 4), 7.8);

    assert_eq!(model.get_switch_cost(2, 4), 13.0);
    assert_eq!(model.get_switch_cost(4, 4), 18.0);

    assert!(model.get_nic_cost(1, 4) < 0.0);
    assert_eq!(model.get_nic_cost(4, 4), 31.6);
}

#[test]
fn intermediate_dim_counts_shift_the_tiers() {
    let model = CostModel::default();
    assert_eq!(model.get_link_cost(1, 2), 4.0);
    assert_eq!(model.get_link_cost(2, 2), 7.8);
    assert_eq!(model.get_link_cost(2, 3), 4.0);
    assert_eq!(model.get_link_cost(3, 3), 7.8);

    assert_eq!(model.get_switch_cost(1, 2), 13.0);
    assert_eq!(model.get_switch_cost(2, 2), 18.0);

    // 最外层维度才用网卡
    assert_eq!(model.get_nic_cost(2, 2), 31.6);
    assert!(model.get_nic_cost(1, 2) < 0.0);
}

#[test]
#[should_panic(expected = "out of range")]
fn dim_zero_is_a_contract_violation() {
    let model = CostModel::default();
    let _ = model.get_link_cost(0, 1);
}

#[test]
#[should_panic(expected = "out of range")]
fn dim_above_max_is_a_contract_violation() {
    let model = CostModel::default();
    let _ = model.get_switch_cost(1, 5);
}

#[test]
#[should_panic(expected = "exceeds total_dim")]
fn current_dim_above_total_is_a_contract_violation() {
    let model = CostModel::default();
    let _ = model.get_nic_cost(3, 2);
}

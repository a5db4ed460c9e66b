// ==========================================
// AllocationApi 端到端测试
// ==========================================
// 测试目标: 表单输入 → 过滤 → 优化 → 分配 全流程
// 覆盖范围: 正常方案、运力不足建议、非法输入、手动改选
// ==========================================

mod test_helpers;

use truck_allocation::api::{
    AllocationApi, ApiError, PlanAllocationRequest, RedistributeRequest, WeightInput,
};
use truck_allocation::config::AllocationConfig;
use truck_allocation::domain::types::DeliveryStatus;
use truck_allocation::domain::{SelectionStrategy, Truck};
use test_helpers::{day, delivery_on, fleet_of};

fn fleet_from_json() -> Vec<Truck> {
    serde_json::from_str(
        r#"[
            {"id": "T01", "capacity": 2, "status": "active", "plate": "粤B-001"},
            {"id": "T02", "capacity": 3, "status": "active", "plate": "粤B-002"},
            {"id": "T03", "capacity": 5, "status": "maintenance", "plate": "粤B-003"},
            {"id": "T04", "capacity": 8, "operationalState": "active", "plate": "粤B-004"}
        ]"#,
    )
    .unwrap()
}

// ==========================================
// 测试 1: 已预订车辆与维修车辆均不参与
// ==========================================
#[test]
fn test_plan_skips_booked_and_maintenance() {
    truck_allocation::logging::init_test();
    let api = AllocationApi::default();
    let deliveries = vec![delivery_on("T04", day(2024, 1, 5), DeliveryStatus::Started)];
    let request = PlanAllocationRequest {
        target_weight: WeightInput::Number(4.0),
        target_date: Some("2024-01-05".to_string()),
    };

    let response = api
        .plan_allocation(&request, &fleet_from_json(), &deliveries)
        .unwrap();
    assert_eq!(response.selected_truck_ids, vec!["T01", "T02"]);
    assert_eq!(response.strategy, SelectionStrategy::Exhaustive);
    assert_eq!(response.excluded_trucks.len(), 2);
    assert_eq!(response.assignments.len(), 2);
    assert!((response.efficiency_pct - 80.0).abs() < 1e-9);

    // 次日 T04 可用, 单车优先
    let request = PlanAllocationRequest {
        target_date: Some("2024-01-06".to_string()),
        ..request
    };
    let response = api
        .plan_allocation(&request, &fleet_from_json(), &deliveries)
        .unwrap();
    assert_eq!(response.selected_truck_ids, vec!["T04"]);
    assert_eq!(response.strategy, SelectionStrategy::SingleTruck);
}

// ==========================================
// 测试 2: 运力不足附带建议
// ==========================================
#[test]
fn test_insufficient_capacity_guidance() {
    let api = AllocationApi::default();
    let fleet = fleet_of(&[1.0, 1.0, 1.0]);
    let request = PlanAllocationRequest {
        target_weight: "5".into(),
        target_date: None,
    };

    let err = api.plan_allocation(&request, &fleet, &[]).unwrap_err();
    let response = err.to_response();
    assert_eq!(response.code, "INSUFFICIENT_CAPACITY");
    assert_eq!(response.shortfall_t, Some(2.0));
    assert_eq!(response.estimated_additional_trucks, Some(2));
    assert_eq!(response.suggestions.len(), 3);
}

// ==========================================
// 测试 3: 非法输入
// ==========================================
#[test]
fn test_invalid_inputs() {
    let api = AllocationApi::default();
    let fleet = fleet_of(&[5.0]);

    for (weight, date) in [
        (WeightInput::from("abc"), None),
        (WeightInput::Number(0.0), None),
        (WeightInput::Number(2.0), Some("05/01/2024?".to_string())),
    ] {
        let request = PlanAllocationRequest {
            target_weight: weight,
            target_date: date,
        };
        let err = api.plan_allocation(&request, &fleet, &[]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)), "{:?}", err);
    }
}

// ==========================================
// 测试 4: 浏览 → 计算 → 手动改选
// ==========================================
#[test]
fn test_manual_selection_flow() {
    let api = AllocationApi::default();
    let fleet = fleet_from_json();

    let browse = api.browse_available_trucks(&fleet, &[], None).unwrap();
    assert_eq!(browse.available_trucks.len(), 3);
    assert!(browse.target_date.is_none());

    let plan = api
        .plan_allocation(
            &PlanAllocationRequest {
                target_weight: 4.0.into(),
                target_date: None,
            },
            &fleet,
            &[],
        )
        .unwrap();
    assert_eq!(plan.selected_truck_ids, vec!["T04"]);

    let selected = AllocationApi::toggle_selection(&plan.selected_truck_ids, "T04");
    let selected = AllocationApi::toggle_selection(&selected, "T01");
    let selected = AllocationApi::toggle_selection(&selected, "T02");
    assert_eq!(selected, vec!["T01", "T02"]);

    let redistributed = api
        .redistribute_selection(
            &RedistributeRequest {
                selected_truck_ids: selected,
                target_weight: 4.0.into(),
            },
            &fleet,
        )
        .unwrap();
    assert!(redistributed.covers_target);
    assert!((redistributed.assignments[0].assigned_weight_t - 1.6).abs() < 1e-9);
    assert!((redistributed.assignments[1].assigned_weight_t - 2.4).abs() < 1e-9);
}

// ==========================================
// 测试 5: 非法配置被拒绝
// ==========================================
#[test]
fn test_invalid_config_rejected() {
    let config = AllocationConfig {
        greedy_min_cover_ratio: 0.0,
        ..AllocationConfig::default()
    };
    let err = AllocationApi::new(&config).err().unwrap();
    assert_eq!(err.code(), "CONFIG_ERROR");
}

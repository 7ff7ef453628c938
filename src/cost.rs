use crate::model::{EquipmentItem, FormInputs, Region};

/// 평당 인테리어 단가 [원/평]
pub const INTERIOR_COST_PER_PYEONG: u64 = 3_000_000;
/// 간호사 1인 월 인건비 [원]
pub const NURSE_MONTHLY_WAGE: u64 = 3_000_000;
/// 간호조무사 1인 월 인건비 [원]
pub const ASSISTANT_NURSE_MONTHLY_WAGE: u64 = 2_000_000;
/// 평균 평당 월 임대료 [원/평]
pub const RENT_PER_PYEONG: u64 = 50_000;
/// 보증금 = 월 임대료 × 10
pub const DEPOSIT_MULTIPLIER: u64 = 10;
/// 평당 보증금 [원/평]
pub const DEPOSIT_PER_PYEONG: u64 = RENT_PER_PYEONG * DEPOSIT_MULTIPLIER;
/// 가전, 가구, 정수기, 네트워크 등 [원]
pub const OTHER_INITIAL_COST: u64 = 50_000_000;
/// 위수탁 비용 + 의약품 및 소모품 비용 [원/월]
pub const OTHER_MONTHLY_COST: u64 = 10_000_000;

/// 입력으로부터 계산된 비용 결과. 모든 금액 단위는 원.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostReport {
    pub region: Region,
    pub area_pyeong: u32,
    pub nurse_count: u32,
    pub assistant_nurse_count: u32,
    pub equipment_items: Vec<EquipmentItem>,

    pub interior_cost: u64,
    pub equipment_cost_total: u64,
    pub rent_deposit: u64,
    pub other_initial_cost: u64,
    pub initial_cost_total: u64,

    pub rent_monthly: u64,
    pub employee_cost: u64,
    pub other_monthly_cost: u64,
    pub monthly_cost_total: u64,
}

/// 개원 비용을 계산한다. 모든 입력에 대해 정의되는 순수 함수.
pub fn compute_report(inputs: &FormInputs) -> CostReport {
    let area = u64::from(inputs.area_pyeong);
    let interior_cost = area * INTERIOR_COST_PER_PYEONG;
    let rent_deposit = area * DEPOSIT_PER_PYEONG;
    let rent_monthly = area * RENT_PER_PYEONG;
    let employee_cost = u64::from(inputs.nurse_count) * NURSE_MONTHLY_WAGE
        + u64::from(inputs.assistant_nurse_count) * ASSISTANT_NURSE_MONTHLY_WAGE;
    let equipment_cost_total = inputs
        .equipment_items
        .iter()
        .fold(0u64, |acc, item| acc.saturating_add(item.price));

    let initial_cost_total = interior_cost
        .saturating_add(equipment_cost_total)
        .saturating_add(rent_deposit)
        .saturating_add(OTHER_INITIAL_COST);
    let monthly_cost_total = rent_monthly + employee_cost + OTHER_MONTHLY_COST;

    CostReport {
        region: inputs.region,
        area_pyeong: inputs.area_pyeong,
        nurse_count: inputs.nurse_count,
        assistant_nurse_count: inputs.assistant_nurse_count,
        equipment_items: inputs.equipment_items.clone(),
        interior_cost,
        equipment_cost_total,
        rent_deposit,
        other_initial_cost: OTHER_INITIAL_COST,
        initial_cost_total,
        rent_monthly,
        employee_cost,
        other_monthly_cost: OTHER_MONTHLY_COST,
        monthly_cost_total,
    }
}

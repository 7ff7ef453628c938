//! 비용 공식과 차트 합계 회귀 테스트.
use clinic_cost_dashboard::{
    chart::{initial_breakdown, monthly_breakdown},
    cost::{compute_report, OTHER_INITIAL_COST, OTHER_MONTHLY_COST},
    i18n::Translator,
    model::{collect_inputs, EquipmentCondition, EquipmentSlot, FormInputs, FormState, Region},
};

fn inputs(area: u32, nurses: u32, assistants: u32) -> FormInputs {
    FormInputs {
        region: Region::Other,
        area_pyeong: area,
        nurse_count: nurses,
        assistant_nurse_count: assistants,
        equipment_items: Vec::new(),
    }
}

fn slot(name: &str, price: u64) -> EquipmentSlot {
    EquipmentSlot {
        name: name.into(),
        brand: String::new(),
        condition: EquipmentCondition::New,
        price,
    }
}

#[test]
fn default_clinic_scenario() {
    // 30평, 간호사 1, 간호조무사 1, 장비 없음
    let r = compute_report(&inputs(30, 1, 1));
    assert_eq!(r.interior_cost, 90_000_000);
    assert_eq!(r.employee_cost, 5_000_000);
    assert_eq!(r.rent_deposit, 15_000_000);
    assert_eq!(r.rent_monthly, 1_500_000);
    assert_eq!(r.equipment_cost_total, 0);
    assert_eq!(r.initial_cost_total, 155_000_000);
    assert_eq!(r.monthly_cost_total, 16_500_000);
}

#[test]
fn minimum_area_with_xray() {
    let state = FormState {
        region: Region::Seoul,
        area_pyeong: 10,
        nurse_count: 0,
        assistant_nurse_count: 0,
        slots: vec![slot("X-ray", 20_000_000)],
    };
    let r = compute_report(&collect_inputs(&state));
    assert_eq!(r.equipment_cost_total, 20_000_000);
    assert_eq!(r.initial_cost_total, 105_000_000);
    assert_eq!(r.employee_cost, 0);
}

#[test]
fn unnamed_equipment_is_not_counted() {
    let state = FormState {
        slots: vec![slot("", 500_000)],
        ..Default::default()
    };
    let r = compute_report(&collect_inputs(&state));
    assert_eq!(r.equipment_cost_total, 0);
    assert!(r.equipment_items.is_empty());
}

#[test]
fn area_formulas_hold_across_range() {
    for area in (10..=500).step_by(7) {
        let r = compute_report(&inputs(area, 0, 0));
        let a = u64::from(area);
        assert_eq!(r.interior_cost, a * 3_000_000);
        assert_eq!(r.rent_deposit, a * 500_000);
        assert_eq!(r.rent_monthly, a * 50_000);
    }
}

#[test]
fn employee_formula_holds_across_range() {
    for nurses in 0..20u32 {
        for assistants in 0..20u32 {
            let r = compute_report(&inputs(10, nurses, assistants));
            assert_eq!(
                r.employee_cost,
                u64::from(nurses) * 3_000_000 + u64::from(assistants) * 2_000_000
            );
        }
    }
}

#[test]
fn equipment_sum_and_initial_total_identity() {
    let state = FormState {
        area_pyeong: 42,
        slots: vec![
            slot("초음파", 35_000_000),
            slot("", 9_999_999),
            slot("내시경", 48_300_000),
            slot("  ", 1),
            slot("소독기", 0),
        ],
        ..Default::default()
    };
    let inputs = collect_inputs(&state);
    assert_eq!(inputs.equipment_items.len(), 3);
    let names: Vec<_> = inputs.equipment_items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["초음파", "내시경", "소독기"]);

    let r = compute_report(&inputs);
    assert_eq!(r.equipment_cost_total, 83_300_000);
    assert_eq!(
        r.initial_cost_total,
        r.interior_cost + r.equipment_cost_total + r.rent_deposit + OTHER_INITIAL_COST
    );
}

#[test]
fn chart_totals_match_report() {
    let tr = Translator::new("ko");
    for (area, nurses, assistants) in [(10, 0, 0), (30, 1, 1), (77, 4, 9)] {
        let mut i = inputs(area, nurses, assistants);
        i.equipment_items = collect_inputs(&FormState {
            slots: vec![slot("CT", 120_000_000)],
            ..Default::default()
        })
        .equipment_items;
        let r = compute_report(&i);

        let initial = initial_breakdown(&r, &tr);
        assert_eq!(initial.title, "초기 개원 비용 구성");
        assert_eq!(initial.slices.len(), 4);
        assert_eq!(initial.total(), r.initial_cost_total);

        let monthly = monthly_breakdown(&r, &tr);
        assert_eq!(monthly.title, "월 운영비 구성");
        assert_eq!(monthly.slices.len(), 3);
        assert_eq!(
            monthly.total(),
            r.rent_monthly + r.employee_cost + OTHER_MONTHLY_COST
        );
    }
}

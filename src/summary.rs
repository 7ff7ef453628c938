//! 지표 카드에 표시할 라벨, 값, 도움말 문자열을 만든다.

use crate::cost::CostReport;
use crate::i18n::{keys, Translator};

/// 지표 카드 한 장.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub label: String,
    /// 천 단위 구분 + 통화 접미사가 붙은 금액
    pub value: String,
    /// 계산식 설명(툴팁)
    pub help: String,
}

/// 초기 비용 행과 월 운영비 행으로 나뉜 지표 묶음.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub initial: Vec<MetricCard>,
    pub monthly: Vec<MetricCard>,
}

pub fn summary_metrics(report: &CostReport, tr: &Translator) -> Summary {
    let area = [("area", report.area_pyeong.to_string())];
    let card = |label_key: &str, value: u64, help: String| MetricCard {
        label: tr.t(label_key).to_string(),
        value: tr.money(value),
        help,
    };

    let initial = vec![
        card(
            keys::METRIC_INTERIOR,
            report.interior_cost,
            tr.tf(keys::HELP_INTERIOR, &area),
        ),
        card(
            keys::METRIC_EQUIPMENT,
            report.equipment_cost_total,
            equipment_help(report, tr),
        ),
        card(
            keys::METRIC_DEPOSIT,
            report.rent_deposit,
            tr.tf(keys::HELP_DEPOSIT, &area),
        ),
        card(
            keys::METRIC_OTHER_INITIAL,
            report.other_initial_cost,
            tr.t(keys::HELP_OTHER_INITIAL).to_string(),
        ),
        card(
            keys::METRIC_INITIAL_TOTAL,
            report.initial_cost_total,
            tr.t(keys::HELP_INITIAL_TOTAL).to_string(),
        ),
    ];

    let monthly = vec![
        card(
            keys::METRIC_RENT,
            report.rent_monthly,
            tr.tf(keys::HELP_RENT, &area),
        ),
        card(
            keys::METRIC_EMPLOYEE,
            report.employee_cost,
            tr.tf(
                keys::HELP_EMPLOYEE,
                &[
                    ("nurses", report.nurse_count.to_string()),
                    ("assistants", report.assistant_nurse_count.to_string()),
                ],
            ),
        ),
        card(
            keys::METRIC_OTHER_MONTHLY,
            report.other_monthly_cost,
            tr.t(keys::HELP_OTHER_MONTHLY).to_string(),
        ),
    ];

    Summary { initial, monthly }
}

/// 장비 목록 툴팁: 한 줄에 "장비명: 금액".
pub fn equipment_help(report: &CostReport, tr: &Translator) -> String {
    if report.equipment_items.is_empty() {
        return tr.t(keys::HELP_EQUIPMENT_NONE).to_string();
    }
    report
        .equipment_items
        .iter()
        .map(|item| {
            tr.tf(
                keys::HELP_EQUIPMENT_LINE,
                &[("name", item.name.clone()), ("price", tr.money(item.price))],
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::compute_report;
    use crate::model::{EquipmentCondition, EquipmentItem, FormInputs, Region};

    fn report(items: Vec<EquipmentItem>) -> CostReport {
        compute_report(&FormInputs {
            region: Region::Daegu,
            area_pyeong: 30,
            nurse_count: 2,
            assistant_nurse_count: 1,
            equipment_items: items,
        })
    }

    #[test]
    fn eight_cards_in_two_rows() {
        let summary = summary_metrics(&report(Vec::new()), &Translator::new("ko"));
        assert_eq!(summary.initial.len(), 5);
        assert_eq!(summary.monthly.len(), 3);
        assert_eq!(summary.initial.len() + summary.monthly.len(), 8);
        assert_eq!(summary.initial[0].value, "90,000,000원");
        assert_eq!(summary.initial[0].help, "30평수 × 3,000,000원");
        assert_eq!(
            summary.monthly[1].help,
            "간호사: 2명×3,000,000원 + 간호조무사: 1명×2,000,000원"
        );
    }

    #[test]
    fn equipment_tooltip_lists_items() {
        let items = vec![
            EquipmentItem {
                name: "X-ray".into(),
                brand: "GE".into(),
                condition: EquipmentCondition::Used,
                price: 20_000_000,
            },
            EquipmentItem {
                name: "초음파".into(),
                brand: String::new(),
                condition: EquipmentCondition::New,
                price: 35_500_000,
            },
        ];
        let tr = Translator::new("ko");
        assert_eq!(
            equipment_help(&report(items), &tr),
            "X-ray: 20,000,000원\n초음파: 35,500,000원"
        );
        assert_eq!(equipment_help(&report(Vec::new()), &tr), "선택된 장비가 없습니다");
    }
}

//! 원형 차트용 데이터와 부채꼴 기하 계산. 그리기는 각 프런트엔드가 담당한다.

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::cost::CostReport;
use crate::i18n::{keys, Translator};

/// 항목 색상 (plotly 기본 팔레트 순서).
pub const PALETTE: [[u8; 3]; 4] = [
    [0x63, 0x6E, 0xFA],
    [0xEF, 0x55, 0x3B],
    [0x00, 0xCC, 0x96],
    [0xAB, 0x63, 0xFA],
];

/// 하나의 볼록 다각형이 덮는 최대 각도. 반원 이하여야 볼록성이 유지된다.
const MAX_PIECE_ANGLE: f32 = FRAC_PI_2;
/// 호를 근사할 때 점 사이 각도.
const ARC_STEP: f32 = 0.05;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSlice {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartData {
    pub title: String,
    pub slices: Vec<ChartSlice>,
}

impl ChartData {
    /// 항목 합계. u64 범위를 넘으면 최댓값에서 멈춘다.
    pub fn total(&self) -> u64 {
        self.slices
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.value))
    }

    pub fn color(index: usize) -> [u8; 3] {
        PALETTE[index % PALETTE.len()]
    }
}

/// 초기 개원 비용 구성: 인테리어, 장비, 보증금, 기타.
pub fn initial_breakdown(report: &CostReport, tr: &Translator) -> ChartData {
    ChartData {
        title: tr.t(keys::CHART_INITIAL_TITLE).to_string(),
        slices: vec![
            slice(tr, keys::CHART_INTERIOR, report.interior_cost),
            slice(tr, keys::CHART_EQUIPMENT, report.equipment_cost_total),
            slice(tr, keys::CHART_DEPOSIT, report.rent_deposit),
            slice(tr, keys::CHART_OTHER, report.other_initial_cost),
        ],
    }
}

/// 월 운영비 구성: 임대료, 인건비, 기타 비용.
pub fn monthly_breakdown(report: &CostReport, tr: &Translator) -> ChartData {
    ChartData {
        title: tr.t(keys::CHART_MONTHLY_TITLE).to_string(),
        slices: vec![
            slice(tr, keys::CHART_RENT, report.rent_monthly),
            slice(tr, keys::CHART_EMPLOYEE, report.employee_cost),
            slice(tr, keys::CHART_OTHER_MONTHLY, report.other_monthly_cost),
        ],
    }
}

fn slice(tr: &Translator, key: &str, value: u64) -> ChartSlice {
    ChartSlice {
        label: tr.t(key).to_string(),
        value,
    }
}

/// 원 위의 한 부채꼴. 각도는 라디안이며 12시 방향에서 시작해 화면 기준 시계 방향으로 증가한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieWedge {
    /// `ChartData::slices` 내 위치
    pub index: usize,
    pub start_angle: f32,
    pub end_angle: f32,
    /// 전체 대비 비율(0~1)
    pub share: f32,
}

impl PieWedge {
    pub fn mid_angle(&self) -> f32 {
        (self.start_angle + self.end_angle) * 0.5
    }
}

/// 각 항목의 부채꼴을 계산한다. 값이 0인 항목은 건너뛰고, 합계가 0이면 빈 목록을 돌려준다.
pub fn pie_wedges(data: &ChartData) -> Vec<PieWedge> {
    let total = data.total();
    if total == 0 {
        return Vec::new();
    }
    let mut wedges = Vec::with_capacity(data.slices.len());
    let mut cumulative = 0u64;
    for (index, s) in data.slices.iter().enumerate() {
        if s.value == 0 {
            continue;
        }
        let start = (cumulative as f64 / total as f64).min(1.0);
        cumulative = cumulative.saturating_add(s.value);
        let end = (cumulative as f64 / total as f64).min(1.0);
        wedges.push(PieWedge {
            index,
            start_angle: -FRAC_PI_2 + (start * TAU as f64) as f32,
            end_angle: -FRAC_PI_2 + (end * TAU as f64) as f32,
            share: (s.value as f64 / total as f64) as f32,
        });
    }
    wedges
}

/// 부채꼴을 볼록 다각형 조각들로 나눈다. 각 조각은 중심점과 호 위의 점들로 구성된다.
pub fn wedge_polygons(wedge: &PieWedge, center: [f32; 2], radius: f32) -> Vec<Vec<[f32; 2]>> {
    let span = wedge.end_angle - wedge.start_angle;
    if span <= 0.0 {
        return Vec::new();
    }
    let pieces = (span / MAX_PIECE_ANGLE).ceil().max(1.0) as usize;
    let piece_span = span / pieces as f32;
    (0..pieces)
        .map(|p| {
            let a0 = wedge.start_angle + piece_span * p as f32;
            let steps = (piece_span / ARC_STEP).ceil().max(1.0) as usize;
            let mut points = Vec::with_capacity(steps + 2);
            points.push(center);
            for i in 0..=steps {
                let a = a0 + piece_span * i as f32 / steps as f32;
                points.push([center[0] + radius * a.cos(), center[1] + radius * a.sin()]);
            }
            points
        })
        .collect()
}

/// 화면 좌표 `point`가 가리키는 부채꼴의 항목 위치. 원 밖이면 None.
pub fn wedge_at(wedges: &[PieWedge], center: [f32; 2], radius: f32, point: [f32; 2]) -> Option<usize> {
    let dx = point[0] - center[0];
    let dy = point[1] - center[1];
    if dx * dx + dy * dy > radius * radius {
        return None;
    }
    // atan2 결과(-π..π)를 12시 기준 구간(-π/2..3π/2)으로 옮긴다.
    let mut angle = dy.atan2(dx);
    if angle < -FRAC_PI_2 {
        angle += TAU;
    }
    wedges
        .iter()
        .find(|w| angle >= w.start_angle && angle < w.end_angle)
        .map(|w| w.index)
}

use std::io::{BufRead, Write};
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::app::AppError;
use crate::chart::{pie_wedges, ChartData};
use crate::cost::CostReport;
use crate::format;
use crate::i18n::{keys, Translator};
use crate::model::{
    EquipmentCondition, EquipmentSlot, FormState, Region, MAX_EQUIPMENT_SLOTS, MAX_PRICE, MIN_AREA_PYEONG,
};
use crate::summary::{summary_metrics, MetricCard};

/// 텍스트 막대 차트의 최대 폭(문자 수).
const BAR_WIDTH: usize = 30;

/// `--equipment` 값 해석 오류.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EquipmentParseError {
    #[error("장비명이 비어 있습니다: {0:?}")]
    EmptyName(String),
    #[error("알 수 없는 장비 상태: {0} (new/used/신품/중고)")]
    UnknownCondition(String),
    #[error("잘못된 금액: {0}")]
    InvalidPrice(String),
    #[error("금액이 상한 {}원을 넘습니다: {0}", MAX_PRICE)]
    PriceTooLarge(String),
    #[error("장비는 최대 {}개까지 지정할 수 있습니다 (입력: {0}개)", MAX_EQUIPMENT_SLOTS)]
    TooManyItems(usize),
}

/// "장비명[,브랜드[,new|used[,금액]]]" 형식의 장비 항목을 해석한다.
/// 금액은 마지막 필드라 천 단위 쉼표나 밑줄을 포함해도 된다. 상한은 `MAX_PRICE`.
pub fn parse_equipment_spec(spec: &str) -> Result<EquipmentSlot, EquipmentParseError> {
    let mut fields = spec.splitn(4, ',');
    let name = fields.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(EquipmentParseError::EmptyName(spec.to_string()));
    }
    let brand = fields.next().unwrap_or_default().trim();
    let condition = match fields.next().map(str::trim) {
        None | Some("") => EquipmentCondition::New,
        Some(code) => EquipmentCondition::from_code(code)
            .ok_or_else(|| EquipmentParseError::UnknownCondition(code.to_string()))?,
    };
    let price = match fields.next().map(str::trim) {
        None | Some("") => 0,
        Some(raw) => raw
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect::<String>()
            .parse::<u64>()
            .map_err(|_| EquipmentParseError::InvalidPrice(raw.to_string()))?,
    };
    if price > MAX_PRICE {
        return Err(EquipmentParseError::PriceTooLarge(spec.to_string()));
    }
    Ok(EquipmentSlot {
        name: name.to_string(),
        brand: brand.to_string(),
        condition,
        price,
    })
}

/// 여러 개의 장비 항목을 해석한다. `MAX_EQUIPMENT_SLOTS`개를 넘으면 오류.
pub fn parse_equipment_specs<S: AsRef<str>>(specs: &[S]) -> Result<Vec<EquipmentSlot>, EquipmentParseError> {
    if specs.len() > MAX_EQUIPMENT_SLOTS {
        return Err(EquipmentParseError::TooManyItems(specs.len()));
    }
    specs.iter().map(|s| parse_equipment_spec(s.as_ref())).collect()
}

/// 사이드바 입력을 대화형으로 받는다. 엔터만 누르면 `initial` 값을 유지한다.
pub fn collect_interactive<R: BufRead, W: Write>(
    tr: &Translator,
    input: &mut R,
    out: &mut W,
    initial: &FormState,
) -> Result<FormState, AppError> {
    writeln!(out, "\n=== {} ===", tr.t(keys::SIDEBAR_HEADER))?;
    let mut state = initial.clone();
    state.region = read_region(tr, input, out, state.region)?;
    state.area_pyeong = read_u32(
        tr,
        input,
        out,
        tr.t(keys::PROMPT_AREA),
        state.area_pyeong,
        MIN_AREA_PYEONG..=u32::MAX,
    )?;
    state.nurse_count = read_u32(tr, input, out, tr.t(keys::PROMPT_NURSES), state.nurse_count, 0..=u32::MAX)?;
    state.assistant_nurse_count = read_u32(
        tr,
        input,
        out,
        tr.t(keys::PROMPT_ASSISTANTS),
        state.assistant_nurse_count,
        0..=u32::MAX,
    )?;

    writeln!(out, "--- {} ---", tr.t(keys::SIDEBAR_EQUIPMENT_HEADER))?;
    let count = read_u32(
        tr,
        input,
        out,
        tr.t(keys::PROMPT_EQUIPMENT_COUNT),
        state.slot_count() as u32,
        0..=MAX_EQUIPMENT_SLOTS as u32,
    )?;
    state.resize_slots(count as usize);
    for (i, slot) in state.slots.iter_mut().enumerate() {
        let prompt = tr.tf(keys::PROMPT_EQUIPMENT_NAME, &[("n", (i + 1).to_string())]);
        let Some(name) = read_line(input, out, &prompt)? else {
            break;
        };
        let name = name.trim();
        if name.is_empty() && slot.name.is_empty() {
            continue;
        }
        if !name.is_empty() {
            slot.name = name.to_string();
        }
        if let Some(brand) = read_line(input, out, tr.t(keys::PROMPT_EQUIPMENT_BRAND))? {
            if !brand.trim().is_empty() {
                slot.brand = brand.trim().to_string();
            }
        }
        if let Some(cond) = read_line(input, out, tr.t(keys::PROMPT_EQUIPMENT_CONDITION))? {
            slot.condition = match cond.trim() {
                "1" => EquipmentCondition::New,
                "2" => EquipmentCondition::Used,
                other => EquipmentCondition::from_code(other).unwrap_or(slot.condition),
            };
        }
        let price = read_u64(tr, input, out, tr.t(keys::PROMPT_EQUIPMENT_PRICE), slot.price)?;
        slot.price = price;
    }
    Ok(state)
}

/// 보고서 전체(지표 + 두 차트)를 출력한다.
pub fn print_report<W: Write>(tr: &Translator, report: &CostReport, out: &mut W) -> Result<(), AppError> {
    writeln!(out, "\n=== {} ===", tr.t(keys::APP_TITLE))?;
    writeln!(
        out,
        "{}: {} | {}: {}",
        tr.t(keys::INPUT_REGION),
        tr.region(report.region),
        tr.t(keys::INPUT_AREA),
        report.area_pyeong
    )?;

    let summary = summary_metrics(report, tr);
    writeln!(out, "\n-- {} --", tr.t(keys::SECTION_INITIAL))?;
    for card in &summary.initial {
        print_card(card, out)?;
    }
    writeln!(out, "\n-- {} --", tr.t(keys::SECTION_MONTHLY))?;
    for card in &summary.monthly {
        print_card(card, out)?;
    }

    for chart in [
        crate::chart::initial_breakdown(report, tr),
        crate::chart::monthly_breakdown(report, tr),
    ] {
        writeln!(out)?;
        for line in text_chart(&chart, tr) {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

fn print_card<W: Write>(card: &MetricCard, out: &mut W) -> Result<(), AppError> {
    writeln!(out, "{}: {}", card.label, card.value)?;
    for line in card.help.lines() {
        writeln!(out, "    ({line})")?;
    }
    Ok(())
}

/// 원형 차트를 비율 막대로 표현한다.
pub fn text_chart(data: &ChartData, tr: &Translator) -> Vec<String> {
    let mut lines = vec![format!("[{}]", data.title)];
    let wedges = pie_wedges(data);
    if wedges.is_empty() {
        lines.push(format!("  {}", tr.t(keys::CHART_EMPTY)));
        return lines;
    }
    let label_width = data
        .slices
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0);
    let total = data.total();
    for w in &wedges {
        let s = &data.slices[w.index];
        let filled = ((w.share * BAR_WIDTH as f32).round() as usize).clamp(1, BAR_WIDTH);
        lines.push(format!(
            "  {label}{pad} {bar}{space} {pct:>6} {money}",
            label = s.label,
            pad = " ".repeat(label_width - s.label.chars().count()),
            bar = "█".repeat(filled),
            space = " ".repeat(BAR_WIDTH - filled),
            pct = format::percent(s.value, total),
            money = tr.money(s.value),
        ));
    }
    lines.push(format!("  {}: {}", tr.t(keys::CHART_TOTAL), tr.money(total)));
    lines
}

fn read_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<Option<String>, AppError> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}

fn read_u32<R: BufRead, W: Write>(
    tr: &Translator,
    input: &mut R,
    out: &mut W,
    prompt: &str,
    current: u32,
    range: RangeInclusive<u32>,
) -> Result<u32, AppError> {
    let (min, max) = (*range.start(), *range.end());
    loop {
        let Some(s) = read_line(input, out, prompt)? else {
            return Ok(current.clamp(min, max));
        };
        let s = s.trim();
        if s.is_empty() {
            return Ok(current.clamp(min, max));
        }
        match s.parse::<u32>() {
            Ok(v) if v < min => {
                writeln!(out, "{}", tr.tf(keys::ERROR_BELOW_MINIMUM, &[("min", min.to_string())]))?;
                return Ok(min);
            }
            Ok(v) if v > max => {
                writeln!(out, "{}", tr.tf(keys::ERROR_ABOVE_MAXIMUM, &[("max", max.to_string())]))?;
                return Ok(max);
            }
            Ok(v) => return Ok(v),
            Err(_) => writeln!(out, "{}", tr.t(keys::ERROR_INVALID_NUMBER))?,
        }
    }
}

fn read_u64<R: BufRead, W: Write>(
    tr: &Translator,
    input: &mut R,
    out: &mut W,
    prompt: &str,
    current: u64,
) -> Result<u64, AppError> {
    loop {
        let Some(s) = read_line(input, out, prompt)? else {
            return Ok(current);
        };
        let cleaned: String = s.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
        if cleaned.is_empty() {
            return Ok(current);
        }
        match cleaned.parse::<u64>() {
            Ok(v) if v > MAX_PRICE => {
                writeln!(
                    out,
                    "{}",
                    tr.tf(keys::ERROR_ABOVE_MAXIMUM, &[("max", format::thousands(MAX_PRICE))])
                )?;
                return Ok(MAX_PRICE);
            }
            Ok(v) => return Ok(v),
            Err(_) => writeln!(out, "{}", tr.t(keys::ERROR_INVALID_NUMBER))?,
        }
    }
}

fn read_region<R: BufRead, W: Write>(
    tr: &Translator,
    input: &mut R,
    out: &mut W,
    current: Region,
) -> Result<Region, AppError> {
    let Some(s) = read_line(input, out, tr.t(keys::PROMPT_REGION))? else {
        return Ok(current);
    };
    let region = match s.trim() {
        "1" => Region::Seoul,
        "2" => Region::Busan,
        "3" => Region::Daegu,
        "4" => Region::Incheon,
        "5" => Region::Other,
        other => Region::from_code(other).unwrap_or(current),
    };
    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::compute_report;
    use crate::model::collect_inputs;
    use std::io::Cursor;

    #[test]
    fn equipment_spec_full() {
        let slot = parse_equipment_spec("X-ray, GE, used, 20,000,000").unwrap();
        assert_eq!(slot.name, "X-ray");
        assert_eq!(slot.brand, "GE");
        assert_eq!(slot.condition, EquipmentCondition::Used);
        assert_eq!(slot.price, 20_000_000);
    }

    #[test]
    fn equipment_spec_name_only() {
        let slot = parse_equipment_spec("초음파").unwrap();
        assert_eq!(slot.condition, EquipmentCondition::New);
        assert_eq!(slot.price, 0);
    }

    #[test]
    fn equipment_spec_errors() {
        assert!(matches!(
            parse_equipment_spec(" ,GE"),
            Err(EquipmentParseError::EmptyName(_))
        ));
        assert_eq!(
            parse_equipment_spec("CT,,broken"),
            Err(EquipmentParseError::UnknownCondition("broken".into()))
        );
        assert!(matches!(
            parse_equipment_spec("CT,,new,12만원"),
            Err(EquipmentParseError::InvalidPrice(_))
        ));
    }

    #[test]
    fn equipment_spec_price_limit() {
        assert_eq!(parse_equipment_spec("MRI,,new,1,000,000,000,000,000").unwrap().price, MAX_PRICE);
        assert!(matches!(
            parse_equipment_spec("MRI,,new,18446744073709551615"),
            Err(EquipmentParseError::PriceTooLarge(_))
        ));
        assert!(matches!(
            parse_equipment_spec("MRI,,new,99999999999999999999"),
            Err(EquipmentParseError::InvalidPrice(_))
        ));
    }

    #[test]
    fn equipment_specs_are_limited_in_count() {
        let specs = vec!["CT"; MAX_EQUIPMENT_SLOTS];
        assert_eq!(parse_equipment_specs(&specs[..]).unwrap().len(), MAX_EQUIPMENT_SLOTS);
        let specs = vec!["CT"; MAX_EQUIPMENT_SLOTS + 1];
        assert_eq!(
            parse_equipment_specs(&specs[..]),
            Err(EquipmentParseError::TooManyItems(MAX_EQUIPMENT_SLOTS + 1))
        );
        assert!(matches!(
            parse_equipment_specs(&["CT", ""][..]),
            Err(EquipmentParseError::EmptyName(_))
        ));
    }

    #[test]
    fn interactive_limits_slot_count_and_price() {
        let tr = Translator::new("ko");
        let script = "\n\n\n\n4000000000\nMRI\n\n\n18446744073709551615\n";
        let mut input = Cursor::new(script.as_bytes());
        let mut out = Vec::new();
        let state = collect_interactive(&tr, &mut input, &mut out, &FormState::default()).unwrap();
        assert_eq!(state.slot_count(), MAX_EQUIPMENT_SLOTS);
        assert_eq!(state.slots[0].name, "MRI");
        assert_eq!(state.slots[0].price, MAX_PRICE);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("최대값 50(으)로 맞춥니다."));
        assert!(printed.contains("최대값 1,000,000,000,000,000(으)로 맞춥니다."));
    }

    #[test]
    fn huge_prices_still_print_a_report() {
        let tr = Translator::new("ko");
        let state = FormState {
            slots: vec![
                EquipmentSlot {
                    name: "MRI".into(),
                    price: u64::MAX,
                    ..Default::default()
                };
                MAX_EQUIPMENT_SLOTS
            ],
            ..Default::default()
        };
        let report = compute_report(&collect_inputs(&state));
        assert_eq!(
            crate::chart::initial_breakdown(&report, &tr).total(),
            report.initial_cost_total
        );
        let mut out = Vec::new();
        print_report(&tr, &report, &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("[초기 개원 비용 구성]"));
    }

    #[test]
    fn interactive_form_reads_all_fields() {
        let tr = Translator::new("ko");
        let script = "2\n5\nabc\n2\n\n1\nX-ray\nGE\n2\n20,000,000\n";
        let mut input = Cursor::new(script.as_bytes());
        let mut out = Vec::new();
        let state = collect_interactive(&tr, &mut input, &mut out, &FormState::default()).unwrap();
        assert_eq!(state.region, Region::Busan);
        assert_eq!(state.area_pyeong, MIN_AREA_PYEONG);
        assert_eq!(state.nurse_count, 2);
        assert_eq!(state.assistant_nurse_count, 1);
        assert_eq!(state.slot_count(), 1);
        assert_eq!(state.slots[0].condition, EquipmentCondition::Used);
        assert_eq!(state.slots[0].price, 20_000_000);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("0 이상의 정수를 입력하세요."));
        assert!(printed.contains("최소값 10(으)로 맞춥니다."));
    }

    #[test]
    fn interactive_eof_keeps_defaults() {
        let tr = Translator::new("ko");
        let mut input = Cursor::new(&b""[..]);
        let mut out = Vec::new();
        let state = collect_interactive(&tr, &mut input, &mut out, &FormState::default()).unwrap();
        assert_eq!(state, FormState::default());
    }

    #[test]
    fn report_prints_both_charts() {
        let tr = Translator::new("ko");
        let report = compute_report(&collect_inputs(&FormState::default()));
        let mut out = Vec::new();
        print_report(&tr, &report, &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("병원 개원 비용 한눈에 보기"));
        assert!(printed.contains("[초기 개원 비용 구성]"));
        assert!(printed.contains("[월 운영비 구성]"));
        assert!(printed.contains("합계: 155,000,000원"));
        assert!(printed.contains("합계: 16,500,000원"));
        assert!(printed.contains("(선택된 장비가 없습니다)"));
    }

    #[test]
    fn text_chart_skips_zero_slices() {
        let tr = Translator::new("ko");
        let report = compute_report(&collect_inputs(&FormState {
            nurse_count: 0,
            assistant_nurse_count: 0,
            ..Default::default()
        }));
        let lines = text_chart(&crate::chart::monthly_breakdown(&report, &tr), &tr);
        assert!(!lines.iter().any(|l| l.contains("인건비")));
        assert_eq!(lines.len(), 4);
    }
}

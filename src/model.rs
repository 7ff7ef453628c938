use serde::{Deserialize, Serialize};

/// 면적 입력의 최소값 [평].
pub const MIN_AREA_PYEONG: u32 = 10;
/// 장비 금액 입력 단위 [원].
pub const PRICE_STEP: u64 = 100_000;
/// 장비 한 건의 금액 상한 [원]. 상한 × 장비 칸 수가 u64 범위 안에 머문다.
pub const MAX_PRICE: u64 = 1_000_000_000_000_000;
/// 장비 칸 최대 수.
pub const MAX_EQUIPMENT_SLOTS: usize = 50;

/// 개원 지역. 현재 어떤 비용 공식에도 쓰이지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Seoul,
    Busan,
    Daegu,
    Incheon,
    Other,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Seoul,
        Region::Busan,
        Region::Daegu,
        Region::Incheon,
        Region::Other,
    ];

    /// CLI 인자 등에서 받은 코드(영문 또는 한글)를 해석한다.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "seoul" | "서울" => Some(Region::Seoul),
            "busan" | "부산" => Some(Region::Busan),
            "daegu" | "대구" => Some(Region::Daegu),
            "incheon" | "인천" => Some(Region::Incheon),
            "other" | "기타" => Some(Region::Other),
            _ => None,
        }
    }
}

/// 장비 상태(신품/중고).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentCondition {
    #[default]
    New,
    Used,
}

impl EquipmentCondition {
    pub const ALL: [EquipmentCondition; 2] = [EquipmentCondition::New, EquipmentCondition::Used];

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "new" | "신품" => Some(EquipmentCondition::New),
            "used" | "중고" => Some(EquipmentCondition::Used),
            _ => None,
        }
    }
}

/// 비용 합계에 포함되는 장비 한 건.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentItem {
    pub name: String,
    pub brand: String,
    pub condition: EquipmentCondition,
    /// 금액 [원]
    pub price: u64,
}

/// 사이드바의 장비 입력 칸 하나. 이름이 비어 있으면 장비로 취급하지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EquipmentSlot {
    pub name: String,
    pub brand: String,
    pub condition: EquipmentCondition,
    pub price: u64,
}

impl EquipmentSlot {
    pub fn to_item(&self) -> Option<EquipmentItem> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        Some(EquipmentItem {
            name: name.to_string(),
            brand: self.brand.trim().to_string(),
            condition: self.condition,
            price: self.price.min(MAX_PRICE),
        })
    }
}

/// 입력 위젯 값 전체. GUI와 CLI가 각자 소유하고 매 계산마다 참조로 넘긴다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub region: Region,
    pub area_pyeong: u32,
    pub nurse_count: u32,
    pub assistant_nurse_count: u32,
    pub slots: Vec<EquipmentSlot>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            region: Region::Seoul,
            area_pyeong: 30,
            nurse_count: 1,
            assistant_nurse_count: 1,
            slots: vec![EquipmentSlot::default(); 3],
        }
    }
}

impl FormState {
    /// 장비 칸 수를 바꾼다. 남는 칸의 값은 그대로 유지되고 새 칸은 빈 값으로 추가된다.
    /// `MAX_EQUIPMENT_SLOTS`를 넘는 요청은 상한으로 맞춘다.
    pub fn resize_slots(&mut self, count: usize) {
        self.slots
            .resize_with(count.min(MAX_EQUIPMENT_SLOTS), EquipmentSlot::default);
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// 한 번의 계산에 쓰이는 입력 스냅샷.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInputs {
    pub region: Region,
    /// 병원 면적 [평], 10 이상
    pub area_pyeong: u32,
    pub nurse_count: u32,
    pub assistant_nurse_count: u32,
    pub equipment_items: Vec<EquipmentItem>,
}

/// 위젯 값을 계산 입력으로 정리한다. 범위를 벗어난 값은 경계값으로 맞추고 이름 없는 장비 칸은 버린다.
pub fn collect_inputs(state: &FormState) -> FormInputs {
    FormInputs {
        region: state.region,
        area_pyeong: state.area_pyeong.max(MIN_AREA_PYEONG),
        nurse_count: state.nurse_count,
        assistant_nurse_count: state.assistant_nurse_count,
        equipment_items: state
            .slots
            .iter()
            .take(MAX_EQUIPMENT_SLOTS)
            .filter_map(EquipmentSlot::to_item)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(name: &str, price: u64) -> EquipmentSlot {
        EquipmentSlot {
            name: name.into(),
            price,
            ..Default::default()
        }
    }

    #[test]
    fn unnamed_slots_are_dropped() {
        let state = FormState {
            slots: vec![slot("", 500_000), slot("X-ray", 1), slot("   ", 7)],
            ..Default::default()
        };
        let inputs = collect_inputs(&state);
        assert_eq!(inputs.equipment_items.len(), 1);
        assert_eq!(inputs.equipment_items[0].name, "X-ray");
    }

    #[test]
    fn area_below_minimum_is_clamped() {
        let state = FormState {
            area_pyeong: 3,
            ..Default::default()
        };
        assert_eq!(collect_inputs(&state).area_pyeong, MIN_AREA_PYEONG);
    }

    #[test]
    fn resize_keeps_existing_slots() {
        let mut state = FormState::default();
        state.slots[0] = slot("초음파", 30_000_000);
        state.resize_slots(5);
        assert_eq!(state.slot_count(), 5);
        assert_eq!(state.slots[0].name, "초음파");
        state.resize_slots(1);
        assert_eq!(state.slots, vec![slot("초음파", 30_000_000)]);
        state.resize_slots(0);
        assert!(collect_inputs(&state).equipment_items.is_empty());
    }

    #[test]
    fn slot_count_is_capped() {
        let mut state = FormState::default();
        state.resize_slots(4_000_000_000);
        assert_eq!(state.slot_count(), MAX_EQUIPMENT_SLOTS);
    }

    #[test]
    fn price_is_capped_when_collected() {
        let state = FormState {
            slots: vec![slot("MRI", u64::MAX)],
            ..Default::default()
        };
        assert_eq!(collect_inputs(&state).equipment_items[0].price, MAX_PRICE);
    }

    #[test]
    fn slots_past_the_cap_are_ignored() {
        let state = FormState {
            slots: vec![slot("CT", 1); MAX_EQUIPMENT_SLOTS + 10],
            ..Default::default()
        };
        assert_eq!(collect_inputs(&state).equipment_items.len(), MAX_EQUIPMENT_SLOTS);
    }

    #[test]
    fn region_codes_accept_korean_and_english() {
        assert_eq!(Region::from_code("Busan"), Some(Region::Busan));
        assert_eq!(Region::from_code("인천"), Some(Region::Incheon));
        assert_eq!(Region::from_code("jeju"), None);
        assert_eq!(EquipmentCondition::from_code("중고"), Some(EquipmentCondition::Used));
    }
}

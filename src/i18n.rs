use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::model::{EquipmentCondition, Region};

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const CURRENCY_SUFFIX: &str = "general.currency_suffix";

    pub const APP_WINDOW_TITLE: &str = "app.window_title";
    pub const APP_TITLE: &str = "app.title";

    pub const SIDEBAR_HEADER: &str = "sidebar.header";
    pub const SIDEBAR_EQUIPMENT_HEADER: &str = "sidebar.equipment_header";
    pub const INPUT_REGION: &str = "input.region";
    pub const INPUT_AREA: &str = "input.area";
    pub const INPUT_NURSES: &str = "input.nurses";
    pub const INPUT_ASSISTANTS: &str = "input.assistants";
    pub const INPUT_EQUIPMENT_COUNT: &str = "input.equipment_count";
    pub const EQUIPMENT_SLOT: &str = "equipment.slot";
    pub const EQUIPMENT_NAME: &str = "equipment.name";
    pub const EQUIPMENT_BRAND: &str = "equipment.brand";
    pub const EQUIPMENT_CONDITION: &str = "equipment.condition";
    pub const EQUIPMENT_PRICE: &str = "equipment.price";

    pub const REGION_SEOUL: &str = "region.seoul";
    pub const REGION_BUSAN: &str = "region.busan";
    pub const REGION_DAEGU: &str = "region.daegu";
    pub const REGION_INCHEON: &str = "region.incheon";
    pub const REGION_OTHER: &str = "region.other";
    pub const CONDITION_NEW: &str = "condition.new";
    pub const CONDITION_USED: &str = "condition.used";

    pub const SECTION_INITIAL: &str = "section.initial";
    pub const SECTION_MONTHLY: &str = "section.monthly";

    pub const METRIC_INTERIOR: &str = "metric.interior";
    pub const METRIC_EQUIPMENT: &str = "metric.equipment";
    pub const METRIC_DEPOSIT: &str = "metric.deposit";
    pub const METRIC_OTHER_INITIAL: &str = "metric.other_initial";
    pub const METRIC_INITIAL_TOTAL: &str = "metric.initial_total";
    pub const METRIC_RENT: &str = "metric.rent";
    pub const METRIC_EMPLOYEE: &str = "metric.employee";
    pub const METRIC_OTHER_MONTHLY: &str = "metric.other_monthly";

    pub const HELP_INTERIOR: &str = "help.interior";
    pub const HELP_EQUIPMENT_NONE: &str = "help.equipment_none";
    pub const HELP_EQUIPMENT_LINE: &str = "help.equipment_line";
    pub const HELP_DEPOSIT: &str = "help.deposit";
    pub const HELP_OTHER_INITIAL: &str = "help.other_initial";
    pub const HELP_INITIAL_TOTAL: &str = "help.initial_total";
    pub const HELP_RENT: &str = "help.rent";
    pub const HELP_EMPLOYEE: &str = "help.employee";
    pub const HELP_OTHER_MONTHLY: &str = "help.other_monthly";

    pub const CHART_INITIAL_TITLE: &str = "chart.initial_title";
    pub const CHART_MONTHLY_TITLE: &str = "chart.monthly_title";
    pub const CHART_INTERIOR: &str = "chart.interior";
    pub const CHART_EQUIPMENT: &str = "chart.equipment";
    pub const CHART_DEPOSIT: &str = "chart.deposit";
    pub const CHART_OTHER: &str = "chart.other";
    pub const CHART_RENT: &str = "chart.rent";
    pub const CHART_EMPLOYEE: &str = "chart.employee";
    pub const CHART_OTHER_MONTHLY: &str = "chart.other_monthly";
    pub const CHART_EMPTY: &str = "chart.empty";
    pub const CHART_TOTAL: &str = "chart.total";

    pub const SETTINGS_LANG: &str = "settings.lang";
    pub const SETTINGS_LANG_AUTO: &str = "settings.lang_auto";
    pub const SETTINGS_SAVE: &str = "settings.save";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_SAVE_ERROR: &str = "settings.save_error";

    pub const PROMPT_REGION: &str = "prompt.region";
    pub const PROMPT_AREA: &str = "prompt.area";
    pub const PROMPT_NURSES: &str = "prompt.nurses";
    pub const PROMPT_ASSISTANTS: &str = "prompt.assistants";
    pub const PROMPT_EQUIPMENT_COUNT: &str = "prompt.equipment_count";
    pub const PROMPT_EQUIPMENT_NAME: &str = "prompt.equipment_name";
    pub const PROMPT_EQUIPMENT_BRAND: &str = "prompt.equipment_brand";
    pub const PROMPT_EQUIPMENT_CONDITION: &str = "prompt.equipment_condition";
    pub const PROMPT_EQUIPMENT_PRICE: &str = "prompt.equipment_price";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_BELOW_MINIMUM: &str = "error.below_minimum";
    pub const ERROR_ABOVE_MAXIMUM: &str = "error.above_maximum";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.trim().to_lowercase().starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        if overrides.is_some() {
            tracing::debug!(lang = lang_code, dir = ?pack_dir, "language pack loaded");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 > 내장 문자열 순이며, 영어 번역이 없으면 한국어로 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }

    /// `{name}` 자리표시자를 채운 번역 문자열.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }

    /// 금액 + 통화 접미사.
    pub fn money(&self, value: u64) -> String {
        crate::format::currency(value, self.t(keys::CURRENCY_SUFFIX))
    }

    pub fn region(&self, region: Region) -> &str {
        self.t(match region {
            Region::Seoul => keys::REGION_SEOUL,
            Region::Busan => keys::REGION_BUSAN,
            Region::Daegu => keys::REGION_DAEGU,
            Region::Incheon => keys::REGION_INCHEON,
            Region::Other => keys::REGION_OTHER,
        })
    }

    pub fn condition(&self, condition: EquipmentCondition) -> &str {
        self.t(match condition {
            EquipmentCondition::New => keys::CONDITION_NEW,
            EquipmentCondition::Used => keys::CONDITION_USED,
        })
    }
}

pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "ko".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [섹션] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        CURRENCY_SUFFIX => "원",
        APP_WINDOW_TITLE => "병원 개원 비용 대시보드",
        APP_TITLE => "병원 개원 비용 한눈에 보기",
        SIDEBAR_HEADER => "입력 변수",
        SIDEBAR_EQUIPMENT_HEADER => "장비 추가",
        INPUT_REGION => "개원 지역",
        INPUT_AREA => "병원 평수",
        INPUT_NURSES => "간호사 수",
        INPUT_ASSISTANTS => "간호조무사 수",
        INPUT_EQUIPMENT_COUNT => "장비 항목 수",
        EQUIPMENT_SLOT => "장비 {n}",
        EQUIPMENT_NAME => "장비명",
        EQUIPMENT_BRAND => "브랜드",
        EQUIPMENT_CONDITION => "신품/중고 여부",
        EQUIPMENT_PRICE => "금액 (원)",
        REGION_SEOUL => "서울",
        REGION_BUSAN => "부산",
        REGION_DAEGU => "대구",
        REGION_INCHEON => "인천",
        REGION_OTHER => "기타",
        CONDITION_NEW => "신품",
        CONDITION_USED => "중고",
        SECTION_INITIAL => "초기 개원 비용",
        SECTION_MONTHLY => "월 운영비",
        METRIC_INTERIOR => "인테리어 비용",
        METRIC_EQUIPMENT => "장비 구매 비용",
        METRIC_DEPOSIT => "임차 보증금",
        METRIC_OTHER_INITIAL => "기타 비용",
        METRIC_INITIAL_TOTAL => "초기 비용 총합",
        METRIC_RENT => "월 임대료",
        METRIC_EMPLOYEE => "인건비 총합",
        METRIC_OTHER_MONTHLY => "기타 비용",
        HELP_INTERIOR => "{area}평수 × 3,000,000원",
        HELP_EQUIPMENT_NONE => "선택된 장비가 없습니다",
        HELP_EQUIPMENT_LINE => "{name}: {price}",
        HELP_DEPOSIT => "{area}평수 × 평균 평당가 50,000원 × 10배수",
        HELP_OTHER_INITIAL => "가전, 가구, 정수기, 네트워크 등",
        HELP_INITIAL_TOTAL => "인테리어 + 장비 + 보증금 + 기타 비용",
        HELP_RENT => "{area}평수 × 평균 평당가 50,000원",
        HELP_EMPLOYEE => "간호사: {nurses}명×3,000,000원 + 간호조무사: {assistants}명×2,000,000원",
        HELP_OTHER_MONTHLY => "위수탁 비용 + 의약품 및 소모품 비용",
        CHART_INITIAL_TITLE => "초기 개원 비용 구성",
        CHART_MONTHLY_TITLE => "월 운영비 구성",
        CHART_INTERIOR => "인테리어",
        CHART_EQUIPMENT => "장비",
        CHART_DEPOSIT => "보증금",
        CHART_OTHER => "기타",
        CHART_RENT => "임대료",
        CHART_EMPLOYEE => "인건비",
        CHART_OTHER_MONTHLY => "기타 비용",
        CHART_EMPTY => "표시할 비용이 없습니다",
        CHART_TOTAL => "합계",
        SETTINGS_LANG => "언어",
        SETTINGS_LANG_AUTO => "시스템",
        SETTINGS_SAVE => "설정 저장",
        SETTINGS_SAVED => "저장되었습니다.",
        SETTINGS_SAVE_ERROR => "저장 실패",
        PROMPT_REGION => "개원 지역 (1=서울 2=부산 3=대구 4=인천 5=기타): ",
        PROMPT_AREA => "병원 평수 (최소 10): ",
        PROMPT_NURSES => "간호사 수: ",
        PROMPT_ASSISTANTS => "간호조무사 수: ",
        PROMPT_EQUIPMENT_COUNT => "장비 항목 수: ",
        PROMPT_EQUIPMENT_NAME => "장비 {n} 장비명 (없으면 엔터): ",
        PROMPT_EQUIPMENT_BRAND => "  브랜드: ",
        PROMPT_EQUIPMENT_CONDITION => "  신품/중고 (1=신품 2=중고): ",
        PROMPT_EQUIPMENT_PRICE => "  금액 (원): ",
        ERROR_INVALID_NUMBER => "0 이상의 정수를 입력하세요.",
        ERROR_BELOW_MINIMUM => "최소값 {min}(으)로 맞춥니다.",
        ERROR_ABOVE_MAXIMUM => "최대값 {max}(으)로 맞춥니다.",
        _ => "",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        CURRENCY_SUFFIX => " KRW",
        APP_WINDOW_TITLE => "Clinic Opening Cost Dashboard",
        APP_TITLE => "Clinic opening costs at a glance",
        SIDEBAR_HEADER => "Inputs",
        SIDEBAR_EQUIPMENT_HEADER => "Equipment",
        INPUT_REGION => "Region",
        INPUT_AREA => "Floor area (pyeong)",
        INPUT_NURSES => "Nurses",
        INPUT_ASSISTANTS => "Assistant nurses",
        INPUT_EQUIPMENT_COUNT => "Equipment slots",
        EQUIPMENT_SLOT => "Equipment {n}",
        EQUIPMENT_NAME => "Name",
        EQUIPMENT_BRAND => "Brand",
        EQUIPMENT_CONDITION => "New/used",
        EQUIPMENT_PRICE => "Price (KRW)",
        REGION_SEOUL => "Seoul",
        REGION_BUSAN => "Busan",
        REGION_DAEGU => "Daegu",
        REGION_INCHEON => "Incheon",
        REGION_OTHER => "Other",
        CONDITION_NEW => "New",
        CONDITION_USED => "Used",
        SECTION_INITIAL => "Initial costs",
        SECTION_MONTHLY => "Monthly operating costs",
        METRIC_INTERIOR => "Interior",
        METRIC_EQUIPMENT => "Equipment purchase",
        METRIC_DEPOSIT => "Rent deposit",
        METRIC_OTHER_INITIAL => "Other",
        METRIC_INITIAL_TOTAL => "Initial total",
        METRIC_RENT => "Monthly rent",
        METRIC_EMPLOYEE => "Payroll total",
        METRIC_OTHER_MONTHLY => "Other",
        HELP_INTERIOR => "{area} pyeong × 3,000,000 KRW",
        HELP_EQUIPMENT_NONE => "No equipment selected",
        HELP_DEPOSIT => "{area} pyeong × average 50,000 KRW per pyeong × 10",
        HELP_OTHER_INITIAL => "Appliances, furniture, water purifier, network, etc.",
        HELP_INITIAL_TOTAL => "Interior + equipment + deposit + other",
        HELP_RENT => "{area} pyeong × average 50,000 KRW per pyeong",
        HELP_EMPLOYEE => "Nurses: {nurses}×3,000,000 KRW + assistant nurses: {assistants}×2,000,000 KRW",
        HELP_OTHER_MONTHLY => "Outsourcing + medicines and consumables",
        CHART_INITIAL_TITLE => "Initial cost breakdown",
        CHART_MONTHLY_TITLE => "Monthly operating cost breakdown",
        CHART_INTERIOR => "Interior",
        CHART_EQUIPMENT => "Equipment",
        CHART_DEPOSIT => "Deposit",
        CHART_OTHER => "Other",
        CHART_RENT => "Rent",
        CHART_EMPLOYEE => "Payroll",
        CHART_OTHER_MONTHLY => "Other",
        CHART_EMPTY => "No costs to show",
        CHART_TOTAL => "Total",
        SETTINGS_LANG => "Language",
        SETTINGS_LANG_AUTO => "System",
        SETTINGS_SAVE => "Save settings",
        SETTINGS_SAVED => "Saved.",
        SETTINGS_SAVE_ERROR => "Save failed",
        PROMPT_REGION => "Region (1=Seoul 2=Busan 3=Daegu 4=Incheon 5=Other): ",
        PROMPT_AREA => "Floor area in pyeong (min 10): ",
        PROMPT_NURSES => "Nurses: ",
        PROMPT_ASSISTANTS => "Assistant nurses: ",
        PROMPT_EQUIPMENT_COUNT => "Equipment slots: ",
        PROMPT_EQUIPMENT_NAME => "Equipment {n} name (enter to skip): ",
        PROMPT_EQUIPMENT_BRAND => "  Brand: ",
        PROMPT_EQUIPMENT_CONDITION => "  Condition (1=new 2=used): ",
        PROMPT_EQUIPMENT_PRICE => "  Price (KRW): ",
        ERROR_INVALID_NUMBER => "Please enter a non-negative integer.",
        ERROR_BELOW_MINIMUM => "Raised to the minimum of {min}.",
        ERROR_ABOVE_MAXIMUM => "Lowered to the maximum of {max}.",
        _ => return None,
    })
}

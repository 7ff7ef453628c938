use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::model::{EquipmentSlot, FormState, Region, MAX_EQUIPMENT_SLOTS, MIN_AREA_PYEONG};

/// 기본 설정 파일 경로.
pub const CONFIG_PATH: &str = "config.toml";

/// 입력 폼의 초기값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub region: Region,
    pub area_pyeong: u32,
    pub nurse_count: u32,
    pub assistant_nurse_count: u32,
    pub equipment_slots: usize,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            region: Region::Seoul,
            area_pyeong: 30,
            nurse_count: 1,
            assistant_nurse_count: 1,
            equipment_slots: 3,
        }
    }
}

impl FormDefaults {
    /// 초기값으로 채운 입력 폼. 면적은 최소값 이상, 장비 칸 수는 상한 이하로 맞춘다.
    pub fn to_form_state(&self) -> FormState {
        FormState {
            region: self.region,
            area_pyeong: self.area_pyeong.max(MIN_AREA_PYEONG),
            nurse_count: self.nurse_count,
            assistant_nurse_count: self.assistant_nurse_count,
            slots: vec![EquipmentSlot::default(); self.equipment_slots.min(MAX_EQUIPMENT_SLOTS)],
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// "auto", "ko", "en"
    pub language: String,
    pub language_pack_dir: Option<String>,
    pub window_alpha: f32,
    /// RUST_LOG이 없을 때 쓰는 로그 필터
    pub log_level: String,
    pub defaults: FormDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            window_alpha: 1.0,
            log_level: "info".to_string(),
            defaults: FormDefaults::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 지정한 경로의 설정을 읽는다. 파일이 없으면 기본 설정이며 파일은 만들지 않는다.
pub fn load_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(CONFIG_PATH)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

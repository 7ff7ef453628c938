use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::config::{self, Config, ConfigError};
use crate::cost::{compute_report, CostReport};
use crate::i18n::{keys, resolve_language, Translator};
use crate::logging;
use crate::model::{collect_inputs, FormState};
use crate::ui_cli::{self, EquipmentParseError};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("장비 입력 오류: {0}")]
    Equipment(#[from] EquipmentParseError),
}

/// 설정을 읽고 로그를 초기화한다.
/// 읽기에 실패하면 기본 로그 레벨로 초기화한 뒤 경고를 남기고 기본 설정으로 계속한다.
pub fn load_config(path: impl AsRef<Path>, cli_lang: &str) -> Config {
    let path = path.as_ref();
    match config::load_from(path) {
        Ok(cfg) => {
            logging::init(&cfg.log_level);
            cfg
        }
        Err(err) => {
            let cfg = Config::default();
            logging::init(&cfg.log_level);
            tracing::warn!(error = %err, path = %path.display(), "config load failed, using defaults");
            let tr = Translator::new(&resolve_language(cli_lang, None));
            eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            cfg
        }
    }
}

/// 입력 → 비용 계산 → 출력 한 번을 수행한다.
pub fn run<W: Write>(state: &FormState, tr: &Translator, out: &mut W) -> Result<CostReport, AppError> {
    let inputs = collect_inputs(state);
    let report = compute_report(&inputs);
    tracing::info!(
        region = ?inputs.region,
        area_pyeong = inputs.area_pyeong,
        equipment = inputs.equipment_items.len(),
        initial_total = report.initial_cost_total,
        monthly_total = report.monthly_cost_total,
        "cost report computed"
    );
    ui_cli::print_report(tr, &report, out)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn broken_config_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "clinic_cost_dashboard_app_bad_{}.toml",
            std::process::id()
        ));
        fs::write(&path, "log_level = [").unwrap();
        let cfg = load_config(&path, "ko");
        let _ = fs::remove_file(&path);
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn readable_config_is_returned() {
        let path = std::env::temp_dir().join(format!(
            "clinic_cost_dashboard_app_ok_{}.toml",
            std::process::id()
        ));
        fs::write(&path, "language = \"en\"\nlog_level = \"debug\"\n").unwrap();
        let cfg = load_config(&path, "auto");
        let _ = fs::remove_file(&path);
        assert_eq!(cfg.language, "en");
        assert_eq!(cfg.log_level, "debug");
    }
}

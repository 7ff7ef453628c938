//! 병원 개원 비용 계산 로직을 라이브러리로 분리하여 GUI와 CLI가 같은 계산을 공유한다.

pub mod app;
pub mod chart;
pub mod config;
pub mod cost;
pub mod format;
pub mod i18n;
pub mod logging;
pub mod model;
pub mod summary;
pub mod ui_cli;

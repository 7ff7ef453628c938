use std::io;
use std::path::PathBuf;

use clap::Parser;
use clinic_cost_dashboard::{
    app::{self, AppError},
    config, i18n,
    model::Region,
    ui_cli,
};

/// 병원 개원 비용을 터미널에서 계산한다.
#[derive(Debug, Parser)]
#[command(name = "clinic_cost_dashboard_cli", version, about)]
struct Cli {
    /// 개원 지역 (seoul, busan, daegu, incheon, other)
    #[arg(long, value_parser = parse_region)]
    region: Option<Region>,
    /// 병원 평수 (최소 10)
    #[arg(long)]
    area: Option<u32>,
    /// 간호사 수
    #[arg(long)]
    nurses: Option<u32>,
    /// 간호조무사 수
    #[arg(long)]
    assistants: Option<u32>,
    /// 장비 항목 "장비명[,브랜드[,new|used[,금액]]]" (여러 번 지정 가능)
    #[arg(long = "equipment", value_name = "SPEC")]
    equipment: Vec<String>,
    /// 모든 항목을 대화형으로 입력
    #[arg(short, long)]
    interactive: bool,
    /// 언어 (auto, ko, en)
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
    /// 설정 파일 경로
    #[arg(long, default_value = config::CONFIG_PATH)]
    config: PathBuf,
}

fn parse_region(s: &str) -> Result<Region, String> {
    Region::from_code(s).ok_or_else(|| format!("unknown region: {s}"))
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 계산 결과를 출력한다.
fn main() {
    let cli = Cli::parse();
    let cfg = app::load_config(&cli.config, &cli.lang);

    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    if let Err(err) = try_run(cli, &cfg, &tr) {
        tracing::error!(error = %err, "run failed");
        eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn try_run(cli: Cli, cfg: &config::Config, tr: &i18n::Translator) -> Result<(), AppError> {
    let mut state = cfg.defaults.to_form_state();
    if let Some(region) = cli.region {
        state.region = region;
    }
    if let Some(area) = cli.area {
        state.area_pyeong = area;
    }
    if let Some(nurses) = cli.nurses {
        state.nurse_count = nurses;
    }
    if let Some(assistants) = cli.assistants {
        state.assistant_nurse_count = assistants;
    }
    if !cli.equipment.is_empty() {
        state.slots = ui_cli::parse_equipment_specs(&cli.equipment[..])?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.interactive {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        state = ui_cli::collect_interactive(tr, &mut input, &mut out, &state)?;
    }
    app::run(&state, tr, &mut out)?;
    Ok(())
}

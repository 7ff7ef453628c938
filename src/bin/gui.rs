#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clinic_cost_dashboard::{
    app,
    chart::{self, ChartData},
    config,
    cost::{self, CostReport},
    format, i18n,
    model::{
        self, EquipmentCondition, FormInputs, FormState, Region, MAX_EQUIPMENT_SLOTS, MAX_PRICE, MIN_AREA_PYEONG,
        PRICE_STEP,
    },
    summary::{self, MetricCard},
};
use eframe::{egui, App, Frame};
use std::{env, fs, path::Path};

/// 지표 카드 테두리 색.
const METRIC_BORDER: egui::Color32 = egui::Color32::from_rgb(0x4C, 0xAF, 0x50);
const PIE_RADIUS: f32 = 120.0;

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/ko/en)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut app_cfg = app::load_config(config::CONFIG_PATH, cli_lang.as_deref().unwrap_or("auto"));
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }

    let title = i18n::Translator::new(&i18n::resolve_language("auto", Some(app_cfg.language.as_str())))
        .t(i18n::keys::APP_WINDOW_TITLE)
        .to_string();
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(1280.0, 860.0))
        .with_transparent(true);
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::warn!(error = %e, "korean font not loaded");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 폰트를 찾아 적용한다.
/// 1) assets/fonts 아래 프로젝트 폰트
/// 2) Windows/macOS/Linux 시스템 한글 폰트
/// 3) 모두 실패 시 Err를 반환하고 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<std::path::PathBuf> = [
        "assets/fonts/malgun.ttf",
        "assets/fonts/NanumGothic.ttf",
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    ]
    .iter()
    .map(std::path::PathBuf::from)
    .collect();
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc", "batang.ttc"] {
            candidates.push(fonts.join(cand));
        }
    }

    for p in candidates.iter().filter(|p| p.exists()) {
        let bytes = fs::read(p).map_err(|e| format!("Failed to read font ({}): {e}", p.display()))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        tracing::debug!(path = %p.display(), "font loaded");
        return Ok(());
    }
    Err("Korean font not found; place a .ttf under assets/fonts/".into())
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    settings_status: Option<String>,
    window_alpha: f32,
    form: FormState,
    /// 직전 프레임의 입력. 값이 바뀔 때만 로그를 남긴다.
    last_inputs: Option<FormInputs>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        Self {
            lang_input: config.language.clone(),
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            form: config.defaults.to_form_state(),
            settings_status: None,
            last_inputs: None,
            tr,
            config,
        }
    }

    /// 매 프레임 입력을 다시 모아 계산한다.
    fn recompute(&mut self) -> CostReport {
        let inputs = model::collect_inputs(&self.form);
        let report = cost::compute_report(&inputs);
        if self.last_inputs.as_ref() != Some(&inputs) {
            tracing::debug!(
                region = ?inputs.region,
                area_pyeong = inputs.area_pyeong,
                nurses = inputs.nurse_count,
                assistants = inputs.assistant_nurse_count,
                equipment = inputs.equipment_items.len(),
                initial_total = report.initial_cost_total,
                monthly_total = report.monthly_cost_total,
                "inputs changed"
            );
            self.last_inputs = Some(inputs);
        }
        report
    }

    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.window_alpha = self.window_alpha;
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.settings_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(i18n::keys::SETTINGS_SAVED).to_string(),
            Err(e) => {
                tracing::error!(error = %e, "failed to save settings");
                format!("{}: {e}", self.tr.t(i18n::keys::SETTINGS_SAVE_ERROR))
            }
        });
    }

    fn ui_top_bar(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.horizontal(|ui| {
            ui.heading(tr.t(i18n::keys::APP_WINDOW_TITLE));
            ui.separator();
            ui.label(tr.t(i18n::keys::SETTINGS_LANG));
            egui::ComboBox::from_id_source("lang_choice")
                .selected_text(&self.lang_input)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.lang_input, "auto".into(), tr.t(i18n::keys::SETTINGS_LANG_AUTO));
                    ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
                    ui.selectable_value(&mut self.lang_input, "en".into(), "English");
                });
            ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
            if ui.button(tr.t(i18n::keys::SETTINGS_SAVE)).clicked() {
                self.save_settings();
            }
            if let Some(msg) = &self.settings_status {
                ui.label(msg);
            }
        });
    }

    /// 사이드바 입력 폼.
    fn ui_sidebar(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(i18n::keys::SIDEBAR_HEADER));
        ui.add_space(6.0);
        egui::Grid::new("form_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label(tr.t(i18n::keys::INPUT_REGION));
                egui::ComboBox::from_id_source("region")
                    .selected_text(tr.region(self.form.region))
                    .show_ui(ui, |ui| {
                        for region in Region::ALL {
                            ui.selectable_value(&mut self.form.region, region, tr.region(region));
                        }
                    });
                ui.end_row();

                ui.label(tr.t(i18n::keys::INPUT_AREA));
                ui.add(
                    egui::DragValue::new(&mut self.form.area_pyeong)
                        .speed(1.0)
                        .clamp_range(MIN_AREA_PYEONG..=u32::MAX),
                );
                ui.end_row();

                ui.label(tr.t(i18n::keys::INPUT_NURSES));
                ui.add(egui::DragValue::new(&mut self.form.nurse_count).speed(1.0));
                ui.end_row();

                ui.label(tr.t(i18n::keys::INPUT_ASSISTANTS));
                ui.add(egui::DragValue::new(&mut self.form.assistant_nurse_count).speed(1.0));
                ui.end_row();
            });

        ui.separator();
        ui.strong(tr.t(i18n::keys::SIDEBAR_EQUIPMENT_HEADER));
        let mut count = self.form.slot_count() as u32;
        ui.horizontal(|ui| {
            ui.label(tr.t(i18n::keys::INPUT_EQUIPMENT_COUNT));
            ui.add(
                egui::DragValue::new(&mut count)
                    .speed(1.0)
                    .clamp_range(0..=MAX_EQUIPMENT_SLOTS as u32),
            );
        });
        if count as usize != self.form.slot_count() {
            self.form.resize_slots(count as usize);
        }

        for (i, slot) in self.form.slots.iter_mut().enumerate() {
            // 칸 위치로 위젯 메모리를 구분한다.
            ui.push_id(i, |ui| {
                let title = tr.tf(i18n::keys::EQUIPMENT_SLOT, &[("n", (i + 1).to_string())]);
                egui::CollapsingHeader::new(title).show(ui, |ui| {
                    egui::Grid::new("slot_grid")
                        .num_columns(2)
                        .spacing([8.0, 4.0])
                        .show(ui, |ui| {
                            ui.label(tr.t(i18n::keys::EQUIPMENT_NAME));
                            ui.text_edit_singleline(&mut slot.name);
                            ui.end_row();

                            ui.label(tr.t(i18n::keys::EQUIPMENT_BRAND));
                            ui.text_edit_singleline(&mut slot.brand);
                            ui.end_row();

                            ui.label(tr.t(i18n::keys::EQUIPMENT_CONDITION));
                            egui::ComboBox::from_id_source("condition")
                                .selected_text(tr.condition(slot.condition))
                                .show_ui(ui, |ui| {
                                    for c in EquipmentCondition::ALL {
                                        ui.selectable_value(&mut slot.condition, c, tr.condition(c));
                                    }
                                });
                            ui.end_row();

                            ui.label(tr.t(i18n::keys::EQUIPMENT_PRICE));
                            ui.horizontal(|ui| {
                                ui.add(
                                    egui::DragValue::new(&mut slot.price)
                                        .speed(PRICE_STEP as f64)
                                        .clamp_range(0..=MAX_PRICE)
                                        .custom_formatter(|v, _| format::thousands(v.max(0.0) as u64))
                                        .custom_parser(|s| s.replace(',', "").trim().parse::<f64>().ok()),
                                );
                                if ui.small_button("−").clicked() {
                                    slot.price = slot.price.saturating_sub(PRICE_STEP);
                                }
                                if ui.small_button("+").clicked() {
                                    slot.price = slot.price.saturating_add(PRICE_STEP).min(MAX_PRICE);
                                }
                            });
                            ui.end_row();
                        });
                });
            });
        }
    }

    fn ui_report(&self, ui: &mut egui::Ui, report: &CostReport) {
        let tr = &self.tr;
        ui.heading(egui::RichText::new(tr.t(i18n::keys::APP_TITLE)).size(26.0));
        ui.add_space(8.0);

        let metrics = summary::summary_metrics(report, tr);
        metric_row(ui, &metrics.initial);
        ui.separator();
        metric_row(ui, &metrics.monthly);
        ui.add_space(12.0);

        pie_chart(ui, &chart::initial_breakdown(report, tr), tr);
        ui.add_space(12.0);
        pie_chart(ui, &chart::monthly_breakdown(report, tr), tr);
    }
}

fn metric_row(ui: &mut egui::Ui, cards: &[MetricCard]) {
    if cards.is_empty() {
        return;
    }
    ui.columns(cards.len(), |cols| {
        for (col, card) in cols.iter_mut().zip(cards) {
            metric_card(col, card);
        }
    });
}

fn metric_card(ui: &mut egui::Ui, card: &MetricCard) {
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, METRIC_BORDER))
        .rounding(8.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            label_with_tip(ui, &card.label, &card.help);
            ui.label(egui::RichText::new(&card.value).size(20.0).strong());
        })
        .response
        .on_hover_text(&card.help);
}

fn slice_color(index: usize) -> egui::Color32 {
    let [r, g, b] = ChartData::color(index);
    egui::Color32::from_rgb(r, g, b)
}

/// 원형 차트와 범례를 그린다.
fn pie_chart(ui: &mut egui::Ui, data: &ChartData, tr: &i18n::Translator) {
    ui.heading(&data.title);
    let wedges = chart::pie_wedges(data);
    if wedges.is_empty() {
        ui.label(tr.t(i18n::keys::CHART_EMPTY));
        return;
    }
    let total = data.total();

    ui.horizontal(|ui| {
        let side = PIE_RADIUS * 2.0 + 8.0;
        let (rect, response) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let c = rect.center();
        let center = [c.x, c.y];

        for w in &wedges {
            let color = slice_color(w.index);
            for poly in chart::wedge_polygons(w, center, PIE_RADIUS) {
                let points = poly.into_iter().map(|[x, y]| egui::pos2(x, y)).collect();
                painter.add(egui::Shape::convex_polygon(points, color, egui::Stroke::NONE));
            }
        }
        if wedges.len() > 1 {
            for w in &wedges {
                let edge = c + PIE_RADIUS * egui::vec2(w.start_angle.cos(), w.start_angle.sin());
                painter.line_segment([c, edge], egui::Stroke::new(1.5, egui::Color32::WHITE));
            }
        }
        for w in wedges.iter().filter(|w| w.share >= 0.04) {
            let a = w.mid_angle();
            let pos = c + PIE_RADIUS * 0.65 * egui::vec2(a.cos(), a.sin());
            painter.text(
                pos,
                egui::Align2::CENTER_CENTER,
                format!("{:.1}%", w.share * 100.0),
                egui::FontId::proportional(13.0),
                egui::Color32::WHITE,
            );
        }

        if let Some(p) = response.hover_pos() {
            if let Some(idx) = chart::wedge_at(&wedges, center, PIE_RADIUS, [p.x, p.y]) {
                let s = &data.slices[idx];
                let text = format!(
                    "{}\n{} ({})",
                    s.label,
                    tr.money(s.value),
                    format::percent(s.value, total)
                );
                response.on_hover_ui_at_pointer(|ui| {
                    ui.label(text);
                });
            }
        }

        ui.vertical(|ui| {
            for (i, s) in data.slices.iter().enumerate() {
                ui.horizontal(|ui| {
                    let (swatch, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, slice_color(i));
                    ui.label(&s.label);
                    ui.label(
                        egui::RichText::new(format!(
                            "{} ({})",
                            tr.money(s.value),
                            format::percent(s.value, total)
                        ))
                        .weak(),
                    );
                });
            }
            ui.separator();
            ui.strong(format!("{}: {}", tr.t(i18n::keys::CHART_TOTAL), tr.money(total)));
        });
    });
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.ui_top_bar(ui);
        });

        egui::SidePanel::left("inputs")
            .resizable(true)
            .min_width(220.0)
            .default_width(280.0)
            .max_width(420.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| self.ui_sidebar(ui));
            });

        let report = self.recompute();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.ui_report(ui, &report));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_cost_dashboard::model::EquipmentSlot;

    #[test]
    fn new_app_uses_config_defaults() {
        let mut cfg = config::Config::default();
        cfg.defaults.area_pyeong = 45;
        cfg.defaults.equipment_slots = 1;
        cfg.window_alpha = 0.0;
        let app = GuiApp::new(cfg);
        assert_eq!(app.form.area_pyeong, 45);
        assert_eq!(app.form.slot_count(), 1);
        assert_eq!(app.window_alpha, 0.3);
    }

    #[test]
    fn oversized_defaults_are_limited() {
        let mut cfg = config::Config::default();
        cfg.defaults.equipment_slots = 80;
        let mut app = GuiApp::new(cfg);
        assert_eq!(app.form.slot_count(), MAX_EQUIPMENT_SLOTS);
        for slot in app.form.slots.iter_mut() {
            slot.name = "MRI".into();
            slot.price = u64::MAX;
        }
        let report = app.recompute();
        assert_eq!(report.equipment_cost_total, MAX_PRICE * MAX_EQUIPMENT_SLOTS as u64);
    }

    #[test]
    fn recompute_tracks_form_changes() {
        let mut app = GuiApp::new(config::Config::default());
        let report = app.recompute();
        assert_eq!(report.initial_cost_total, 155_000_000);
        app.form.slots[1] = EquipmentSlot {
            name: "X-ray".into(),
            price: 20_000_000,
            ..Default::default()
        };
        let report = app.recompute();
        assert_eq!(report.equipment_cost_total, 20_000_000);
        assert_eq!(
            app.last_inputs.as_ref().map(|i| i.equipment_items.len()),
            Some(1)
        );
    }
}

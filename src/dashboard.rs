//! Creates the dashboard GUI
//!
//! All state lives in `[DashboardApp]` and flows one way: state -> view models -> render.
//! Event handlers (`visualize`, `load_sample`, `set_chart_mode`) are plain methods so they can be
//! exercised without a window.

use eframe::{App, Frame};
use egui::{
    Align, Color32, CornerRadius, Layout, Margin, RichText, ScrollArea, Stroke, TextEdit, TextStyle,
    Ui,
};
use egui_extras::{Column, TableBuilder};
use log::{debug, info, warn};

use crate::{
    chart::{ChartMode, ChartView},
    dataset::{DashboardError, Dataset},
    palette::{TRACKED_KEYS, with_alpha},
    parsers::{SAMPLE_DATA, parse_dataset},
    summary::{Direction, summarize},
};

/// Height of each row in the record table
pub const ROW_HEIGHT: f32 = 20.0;
/// Rows of the paste area
const INPUT_ROWS: usize = 8;
const UP_COLOR: Color32 = Color32::from_rgb(22, 163, 74);
const DOWN_COLOR: Color32 = Color32::from_rgb(220, 38, 38);
const ERROR_COLOR: Color32 = Color32::from_rgb(239, 68, 68);
const SUBTITLE_COLOR: Color32 = Color32::from_rgb(75, 85, 99);

const EMPTY_INPUT_MESSAGE: &str = "Please paste some CSV data";
const PARSE_ERROR_MESSAGE: &str = "Error parsing CSV data";

/// View model of one summary card
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub key: &'static str,
    pub color: Color32,
    pub background: Color32,
    pub latest: String,
    pub previous: String,
    pub change: String,
    pub direction: Option<Direction>,
}

/// Dashboard GUI app
#[derive(Debug, Default)]
pub struct DashboardApp {
    /// Text in the paste area
    raw_text: String,
    /// Last successfully parsed data, replaced (never merged) on each successful parse
    dataset: Option<Dataset>,
    /// Which chart is shown
    chart_mode: ChartMode,
    /// Message shown next to the action buttons
    error: Option<String>,
}

impl DashboardApp {
    pub fn new(raw_text: String, chart_mode: ChartMode) -> Self {
        Self {
            raw_text,
            chart_mode,
            ..Default::default()
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn chart_mode(&self) -> ChartMode {
        self.chart_mode
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Parses the pasted text. A failure keeps whatever dataset was already shown.
    pub fn visualize(&mut self) -> Result<(), DashboardError> {
        match parse_dataset(&self.raw_text) {
            Ok(dataset) => {
                info!(
                    "Visualizing {} records with columns {:?}",
                    dataset.len(),
                    dataset.header()
                );
                self.dataset = Some(dataset);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to parse input: {}", e);
                let message = match e {
                    DashboardError::EmptyInput => EMPTY_INPUT_MESSAGE,
                    _ => PARSE_ERROR_MESSAGE,
                };
                self.error = Some(message.to_string());
                Err(e)
            }
        }
    }

    /// Replaces the pasted text with the sample. Does not parse it.
    pub fn load_sample(&mut self) {
        debug!("Loading sample data");
        self.raw_text = SAMPLE_DATA.to_string();
    }

    pub fn set_chart_mode(&mut self, mode: ChartMode) {
        if mode != self.chart_mode {
            debug!("Switching chart to {:?}", mode);
        }
        self.chart_mode = mode;
    }

    /// Dataset to chart, if there is one with at least one record
    pub fn chart_data(&self) -> Option<&Dataset> {
        self.dataset.as_ref().filter(|d| !d.is_empty())
    }

    /// One card per tracked key, derived from the current dataset on every call
    pub fn summary_cards(&self) -> Vec<SummaryCard> {
        let Some(dataset) = &self.dataset else {
            return Vec::new();
        };
        TRACKED_KEYS
            .iter()
            .map(|key| {
                let summary = summarize(dataset, key.name);
                SummaryCard {
                    key: key.name,
                    color: key.main,
                    background: key.background(),
                    latest: summary.latest_display(),
                    previous: summary.previous_display(),
                    change: summary.change_display(),
                    direction: summary.direction(),
                }
            })
            .collect()
    }

    fn render_header(&self, ui: &mut Ui) {
        ui.heading(RichText::new("Performance Analytics Dashboard").strong());
        ui.label(
            RichText::new("Visualize and analyze performance metrics across quarters")
                .color(SUBTITLE_COLOR),
        );
        ui.separator();
    }

    fn render_input(&mut self, ui: &mut Ui) {
        ui.add(
            TextEdit::multiline(&mut self.raw_text)
                .hint_text("Paste your CSV data here...")
                .font(TextStyle::Monospace)
                .desired_rows(INPUT_ROWS)
                .desired_width(f32::INFINITY),
        );
        ui.horizontal(|ui| {
            if ui.button("📈 Visualize Data").clicked() {
                // the error is kept in state for display, nothing else to do here
                let _ = self.visualize();
            }
            if ui.button("❓ Load Sample").clicked() {
                self.load_sample();
            }
            if let Some(err) = &self.error {
                ui.colored_label(ERROR_COLOR, err);
            }
        });
    }

    fn render_chart_tabs(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            for mode in ChartMode::ALL {
                let text = format!("{} {}", mode.icon(), mode.as_str());
                if ui.selectable_label(self.chart_mode == mode, text).clicked() {
                    self.set_chart_mode(mode);
                }
            }
        });
    }

    fn render_summary_cards(&self, ui: &mut Ui) {
        let cards = self.summary_cards();
        if cards.is_empty() {
            return;
        }
        ui.columns(cards.len(), |columns| {
            for (ui, card) in columns.iter_mut().zip(cards.iter()) {
                egui::Frame::default()
                    .fill(card.background)
                    .stroke(Stroke::new(1.0, with_alpha(card.color, 0.25)))
                    .corner_radius(CornerRadius::same(12))
                    .inner_margin(Margin::same(16))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(card.key).color(card.color).strong());
                        ui.label(RichText::new(&card.latest).size(24.0).strong())
                            .on_hover_text(format!("Previous: {}", card.previous));
                        let color = match card.direction {
                            Some(Direction::Up) => UP_COLOR,
                            Some(Direction::Down) => DOWN_COLOR,
                            None => SUBTITLE_COLOR,
                        };
                        ui.colored_label(color, &card.change);
                    });
            }
        });
    }

    /// Read-only view of the parsed records
    fn render_records(dataset: &Dataset, ui: &mut Ui) {
        let header = dataset.header();
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(Layout::left_to_right(Align::Min))
            .columns(Column::auto().resizable(true), header.len())
            .header(ROW_HEIGHT, |mut row| {
                for column in header {
                    row.col(|ui| {
                        ui.strong(column);
                    });
                }
            })
            .body(|mut body| {
                for record in dataset.records() {
                    body.row(ROW_HEIGHT, |mut row| {
                        for column in header {
                            row.col(|ui| {
                                ui.label(record.get(column).to_string());
                            });
                        }
                    });
                }
            });
    }
}

impl App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                self.render_header(ui);
                self.render_input(ui);

                if self.chart_data().is_none() {
                    return;
                }
                ui.separator();
                // tabs need `&mut self`, so they go before the dataset is borrowed
                self.render_chart_tabs(ui);
                let Some(dataset) = self.chart_data() else {
                    return;
                };
                ChartView::new(dataset, self.chart_mode).show(ui);
                ui.add_space(16.0);
                self.render_summary_cards(ui);
                ui.add_space(16.0);
                ui.collapsing("Records", |ui| Self::render_records(dataset, ui));
            });
        });
    }
}

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{events::UiEvent, orchestration::dispatch_backend_command},
    ui::layout::{ButtonSpec, BUTTON_GRID, EQUALS_BUTTON},
};

const BUTTON_SIZE: [f32; 2] = [64.0, 48.0];
const DISPLAY_TEXT_SIZE: f32 = 36.0;

pub struct CalculatorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    display: String,
    memory_indicator_visible: bool,
    status: String,
    last_info: String,
    showing_error: bool,
}

impl CalculatorApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            display: "0".to_string(),
            memory_indicator_visible: false,
            status: "Starting...".to_string(),
            last_info: "Ready".to_string(),
            showing_error: false,
        }
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message.clone();
                self.last_info = message;
                self.showing_error = false;
            }
            UiEvent::Display(text) => {
                // Error text renders before its failure is reported.
                if self.showing_error {
                    self.status = self.last_info.clone();
                    self.showing_error = false;
                }
                self.display = text;
            }
            UiEvent::MemoryIndicator(visible) => self.memory_indicator_visible = visible,
            UiEvent::Error(err) => {
                tracing::debug!(
                    context = ?err.context(),
                    message = err.message(),
                    "surfacing ui error"
                );
                self.status = err.status_line();
                self.showing_error = true;
            }
        }
    }

    fn press(&mut self, spec: &ButtonSpec) {
        let Some(role) = spec.role() else {
            return;
        };
        dispatch_backend_command(&self.cmd_tx, BackendCommand::Press(role), &mut self.status);
    }

    fn show_display(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                // Reserve the indicator slot so the display does not shift.
                let indicator = if self.memory_indicator_visible { "M" } else { " " };
                ui.label(egui::RichText::new(indicator).strong().monospace());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(&self.display)
                            .size(DISPLAY_TEXT_SIZE)
                            .monospace(),
                    );
                });
            });
        });
    }

    fn show_button_grid(&mut self, ui: &mut egui::Ui) {
        let mut pressed: Option<ButtonSpec> = None;
        egui::Grid::new("button-grid")
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for row in BUTTON_GRID.iter() {
                    for spec in row {
                        if ui
                            .add_sized(BUTTON_SIZE, egui::Button::new(spec.label))
                            .clicked()
                        {
                            pressed = Some(*spec);
                        }
                    }
                    ui.end_row();
                }
            });

        let equals_width = BUTTON_SIZE[0] * 4.0 + 6.0 * 3.0;
        if ui
            .add_sized([equals_width, BUTTON_SIZE[1]], egui::Button::new(EQUALS_BUTTON.label))
            .clicked()
        {
            pressed = Some(EQUALS_BUTTON);
        }

        if let Some(spec) = pressed {
            self.press(&spec);
        }
    }
}

impl Drop for CalculatorApp {
    fn drop(&mut self) {
        let _ = self.cmd_tx.try_send(BackendCommand::Shutdown);
    }
}

impl eframe::App for CalculatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.small(egui::RichText::new(&self.status).weak());
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_display(ui);
            ui.add_space(8.0);
            self.show_button_grid(ui);
        });

        // Backend events arrive off-thread; poll for them.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

use std::path::{Path, PathBuf};
use std::time::Duration;

use eframe::egui;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::warn;

use crate::config::AppConfig;
use crate::dialogs;
use crate::runner::{self, ChannelReporter, ShellEvent};
use crate::state::{Prompt, ShellState};
use crate::types::{ConversionJob, ConversionMode, Theme};

const INSTALL_HINT: &str = "FFmpeg was not found on your system.\n\n\
    This tool needs FFmpeg to convert media files.\n\n\
    Install FFmpeg using your package manager:\n\
    Arch: sudo pacman -S ffmpeg\n\
    Ubuntu / Debian: sudo apt install ffmpeg\n\
    Fedora: sudo dnf install ffmpeg\n\
    macOS: brew install ffmpeg\n\n\
    Or set `ffmpeg_path` in the settings file, then restart.";

enum PromptAction {
    Dismiss,
    Overwrite(bool),
}

pub struct ConverterApp {
    config: AppConfig,
    config_dirty: bool,
    state: ShellState,
    tool: PathBuf,
    about_open: bool,
    // Option so Drop can hand it to shutdown_background
    runtime: Option<Runtime>,
    events_tx: UnboundedSender<ShellEvent>,
    events_rx: UnboundedReceiver<ShellEvent>,
}

impl ConverterApp {
    pub fn new(ctx: &egui::Context, config: AppConfig, runtime: Runtime) -> Self {
        apply_theme(ctx, config.theme);
        let (state, tool) = initial_state(&config);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state,
            tool,
            about_open: false,
            config,
            config_dirty: false,
            runtime: Some(runtime),
            events_tx,
            events_rx,
        }
    }

    fn launch(&mut self, ctx: &egui::Context, job: ConversionJob) {
        let Some(runtime) = self.runtime.as_ref() else {
            return;
        };
        self.state.mark_started();
        let reporter = ChannelReporter::new(self.events_tx.clone(), Some(ctx.clone()));
        // detached, completion arrives through the event channel
        runner::spawn(runtime.handle(), self.tool.clone(), job, reporter);
    }

    fn remember_directory(&mut self, picked: &Path) {
        if let Some(dir) = picked.parent() {
            if self.config.last_directory.as_deref() != Some(dir) {
                self.config.last_directory = Some(dir.to_path_buf());
                self.config_dirty = true;
            }
        }
    }

    fn pick_input(&mut self) {
        if let Some(path) = dialogs::pick_input(self.config.last_directory.as_deref()) {
            self.remember_directory(&path);
            self.state.set_input(path);
        }
    }

    fn pick_output(&mut self) {
        let suggested = self
            .state
            .input()
            .and_then(|input| self.state.mode.suggested_output_name(input));
        let start_dir = self.config.last_directory.as_deref();
        if let Some(path) = dialogs::pick_output(start_dir, suggested.as_deref()) {
            self.remember_directory(&path);
            self.state.set_output(path);
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.state.apply(event);
        }
    }

    fn save_config_if_dirty(&mut self) {
        if self.config_dirty {
            if let Err(err) = self.config.store() {
                warn!(error = %err, "could not save settings");
            }
            self.config_dirty = false;
        }
    }

    fn show_prompt(&mut self, ctx: &egui::Context) {
        let Some(prompt) = self.state.prompt().cloned() else {
            return;
        };

        let mut action = None;
        match prompt {
            Prompt::ToolMissing(tool) => {
                modal("FFmpeg Not Found").show(ctx, |ui| {
                    ui.label(INSTALL_HINT);
                    ui.label(
                        egui::RichText::new(format!("Looked for: {}", tool.display())).weak(),
                    );
                    if ui.button("OK").clicked() {
                        action = Some(PromptAction::Dismiss);
                    }
                });
            }
            Prompt::MissingFiles => {
                modal("Missing File").show(ctx, |ui| {
                    ui.label("Please select both input and output files.");
                    if ui.button("OK").clicked() {
                        action = Some(PromptAction::Dismiss);
                    }
                });
            }
            Prompt::ConfirmOverwrite(job) => {
                modal("File Exists").show(ctx, |ui| {
                    ui.label(format!(
                        "The file '{}' already exists.\nDo you want to overwrite it?",
                        job.output.display()
                    ));
                    ui.horizontal(|ui| {
                        if ui.button("Yes").clicked() {
                            action = Some(PromptAction::Overwrite(true));
                        }
                        if ui.button("No").clicked() {
                            action = Some(PromptAction::Overwrite(false));
                        }
                    });
                });
            }
        }

        match action {
            Some(PromptAction::Dismiss) => self.state.dismiss_prompt(),
            Some(PromptAction::Overwrite(confirmed)) => {
                if let Some(job) = self.state.answer_overwrite(confirmed) {
                    self.launch(ctx, job);
                }
            }
            None => {}
        }
    }

    fn set_theme(&mut self, ctx: &egui::Context, theme: Theme) {
        if self.config.theme != theme {
            self.config.theme = theme;
            self.config_dirty = true;
        }
        apply_theme(ctx, theme);
    }

    fn show_menu(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    for theme in Theme::ALL {
                        if ui.radio(self.config.theme == theme, theme.to_string()).clicked() {
                            self.set_theme(ctx, theme);
                            ui.close_menu();
                        }
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.about_open = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn show_about(&mut self, ctx: &egui::Context) {
        let mut open = self.about_open;
        egui::Window::new("About")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.heading("FFmpeg Converter");
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.add_space(4.0);
                ui.label("Converts media files by running FFmpeg with a fixed preset.");
                ui.label(
                    egui::RichText::new(format!("FFmpeg: {}", self.tool.display())).weak(),
                );
            });
        self.about_open = open;
    }

    fn show_notifications(&mut self, ctx: &egui::Context) {
        let mut dismissed = None;
        for (i, notification) in self.state.notifications().iter().enumerate() {
            egui::Window::new(notification.title.as_str())
                .id(egui::Id::new(("notification", i)))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::RIGHT_BOTTOM, [-8.0, -8.0 - 72.0 * i as f32])
                .show(ctx, |ui| {
                    ui.label(notification.body.as_str());
                    if ui.small_button("Dismiss").clicked() {
                        dismissed = Some(i);
                    }
                });
        }
        if let Some(i) = dismissed {
            self.state.dismiss_notification(i);
        }
    }
}

fn modal(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
}

fn path_label(path: Option<&Path>) -> String {
    match path {
        Some(path) => path
            .file_name()
            .unwrap_or(path.as_os_str())
            .to_string_lossy()
            .into_owned(),
        None => "(none)".to_string(),
    }
}

fn apply_theme(ctx: &egui::Context, theme: Theme) {
    ctx.set_theme(match theme {
        Theme::System => egui::ThemePreference::System,
        Theme::Light => egui::ThemePreference::Light,
        Theme::Dark => egui::ThemePreference::Dark,
    });
}

// falls back to the configured name so launch errors still say what was tried
fn initial_state(config: &AppConfig) -> (ShellState, PathBuf) {
    let mut state = ShellState::new(config.default_mode);
    match runner::locate_tool(&config.ffmpeg_path) {
        Some(tool) => (state, tool),
        None => {
            state.mark_tool_missing(config.ffmpeg_path.clone());
            (state, config.ffmpeg_path.clone())
        }
    }
}

impl eframe::App for ConverterApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        self.drain_events();
        self.show_menu(ctx);

        for file in ctx.input(|i| i.raw.dropped_files.clone()) {
            if let Some(path) = file.path {
                self.remember_directory(&path);
                self.state.set_input(path);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("🎞 FFmpeg Converter");
            ui.add_space(4.0);

            let button_size = egui::vec2(ui.available_width(), 28.0);
            if ui.add_sized(button_size, egui::Button::new("Select Input File")).clicked() {
                self.pick_input();
            }
            if ui.add_sized(button_size, egui::Button::new("Select Output File")).clicked() {
                self.pick_output();
            }

            egui::Grid::new("paths_grid").num_columns(2).show(ui, |ui| {
                ui.label(egui::RichText::new("Input").strong());
                ui.label(path_label(self.state.input()));
                ui.end_row();
                ui.label(egui::RichText::new("Output").strong());
                ui.label(path_label(self.state.output()));
                ui.end_row();
                if let Some(last) = self.state.last_output() {
                    ui.label(egui::RichText::new("Last saved").weak());
                    ui.label(path_label(Some(last)));
                    ui.end_row();
                }
            });

            let before = self.state.mode;
            egui::ComboBox::from_label("Mode")
                .selected_text(self.state.mode.to_string())
                .show_ui(ui, |ui| {
                    for mode in ConversionMode::ALL {
                        ui.selectable_value(&mut self.state.mode, mode, mode.to_string())
                            .on_hover_text(mode.description());
                    }
                });
            if self.state.mode != before {
                self.config.default_mode = self.state.mode;
                self.config_dirty = true;
            }

            let convert_button = egui::Button::new(egui::RichText::new("Convert").strong());
            let convert = ui
                .add_enabled_ui(self.state.can_convert(), |ui| {
                    ui.add_sized(button_size, convert_button)
                })
                .inner
                .on_disabled_hover_text("Disabled: FFmpeg is not installed");
            if convert.clicked() {
                if let Some(job) = self.state.request_convert() {
                    self.launch(ctx, job);
                }
            }

            ui.separator();
            ui.horizontal_wrapped(|ui| {
                if self.state.running() > 0 {
                    ui.spinner();
                }
                ui.label(self.state.status.as_str());
            });
        });

        self.show_prompt(ctx);
        self.show_about(ctx);
        self.show_notifications(ctx);
        self.save_config_if_dirty();

        if self.state.running() > 0 {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

impl Drop for ConverterApp {
    fn drop(&mut self) {
        // running ffmpeg children are left to finish on their own
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

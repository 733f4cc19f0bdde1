use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui;
use rfd::FileDialog;

use crate::formats::supported_extensions;
use crate::render::{Colormap, DisplayMode};
use crate::runtime::{AppContext, run_segmentation};
use crate::segment::ModelKind;

use super::state::{
    ChannelConfig, Notice, NoticeKind, RunResults, SessionState, channel_label,
    channel_selectors_visible,
};

const WINDOW_TITLE: &str = "cellseg-rs";
const DEFAULT_WINDOW_SIZE: [f32; 2] = [1200.0, 760.0];
const MIN_WINDOW_SIZE: [f32; 2] = [960.0, 640.0];

/// Opens the native window, optionally preloading an image.
pub fn run(startup_input: Option<PathBuf>) -> Result<(), String> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE)
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(CellsegApp::new(cc, startup_input)))),
    )
    .map_err(|error| error.to_string())
}

pub(super) struct CellsegApp {
    context: AppContext,
    state: SessionState,
    preview: Option<egui::TextureHandle>,
    figure: Option<egui::TextureHandle>,
}

impl CellsegApp {
    pub(super) fn new(cc: &eframe::CreationContext<'_>, startup_input: Option<PathBuf>) -> Self {
        let mut app = Self {
            context: AppContext::new(),
            state: SessionState::default(),
            preview: None,
            figure: None,
        };
        app.state.profiles = app.context.profile_service().list();
        if let Some(path) = startup_input {
            app.load_image(&cc.egui_ctx, path);
        }
        app
    }

    fn load_image(&mut self, ctx: &egui::Context, path: PathBuf) {
        match self.context.io_service().load_normalized(&path) {
            Ok(image) => {
                let color = to_color_image(image.width(), image.height(), &image.to_rgb_bytes());
                self.preview =
                    Some(ctx.load_texture("preview", color, egui::TextureOptions::NEAREST));
                self.figure = None;
                self.state.results = None;
                self.state.notice = None;
                self.state.status = format!(
                    "Loaded {}. Adjust parameters and run segmentation.",
                    file_label(&path)
                );
                self.state.image = Some(Arc::new(image));
                self.state.image_path = Some(path);
            }
            Err(error) => {
                self.state.notice = Some(Notice::error(error.to_string()));
                self.state.status = "Image load failed.".to_string();
            }
        }
    }

    fn open_image_dialog(&mut self, ctx: &egui::Context) {
        let picked = FileDialog::new()
            .add_filter("Microscopy images", supported_extensions())
            .set_title("Open Image")
            .pick_file();
        if let Some(path) = picked {
            self.load_image(ctx, path);
        }
    }

    fn run_clicked(&mut self, ctx: &egui::Context) {
        let Some(image) = self.state.image.clone() else {
            self.state.notice = Some(Notice::error("No image provided."));
            return;
        };
        self.state.status = "Segmentation in progress...".to_string();
        match run_segmentation(&self.context, &image, &self.state.settings) {
            Ok(outcome) => {
                let composite = &outcome.figure.composite;
                let color = to_color_image(
                    composite.width() as usize,
                    composite.height() as usize,
                    composite.as_raw(),
                );
                self.figure =
                    Some(ctx.load_texture("figure", color, egui::TextureOptions::NEAREST));
                self.state.notice = Some(Notice::info(format!(
                    "Segmentation finished: {} cells found",
                    outcome.cell_count
                )));
                self.state.results = Some(RunResults {
                    cell_count: outcome.cell_count,
                    summary: outcome.summary,
                    files: outcome.bundle.files,
                });
                self.state.status = "Process complete!".to_string();
            }
            Err(error) => {
                self.state.notice = Some(Notice::error(error.to_string()));
                self.state.status = "Run failed.".to_string();
            }
        }
    }

    fn save_profile_clicked(&mut self) {
        let name = self.state.profile_name.trim().to_string();
        if name.is_empty() {
            self.state.notice = Some(Notice::warning("Please enter a profile name."));
            return;
        }
        match self
            .context
            .profile_service()
            .save(&name, &self.state.settings)
        {
            Ok(saved) => {
                self.state.profiles = self.context.profile_service().list();
                self.state.selected_profile = Some(saved.clone());
                self.state.notice = Some(Notice::info(format!(
                    "Settings saved successfully as profile: {saved}"
                )));
            }
            Err(error) => self.state.notice = Some(Notice::warning(error.to_string())),
        }
    }

    fn load_profile_clicked(&mut self) {
        let Some(name) = self.state.selected_profile.clone() else {
            self.state.notice = Some(Notice::warning("Please select a profile to load."));
            return;
        };
        match self.context.profile_service().load(&name) {
            Ok(settings) => {
                self.state.settings = settings;
                self.state.notice = Some(Notice::info(format!(
                    "Settings loaded successfully from profile: {name}"
                )));
            }
            Err(error) => self.state.notice = Some(Notice::warning(error.to_string())),
        }
    }

    fn draw_controls(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("controls")
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.heading("Cell Segmentation");
                ui.add_space(8.0);

                if ui.button("Open Image...").clicked() {
                    self.open_image_dialog(ctx);
                }
                if let Some(path) = self.state.image_path.clone() {
                    ui.label(file_label(&path));
                }
                ui.separator();

                egui::ComboBox::from_label("Model")
                    .selected_text(self.state.settings.model_type.id())
                    .show_ui(ui, |ui| {
                        for model in ModelKind::ALL {
                            ui.selectable_value(
                                &mut self.state.settings.model_type,
                                model,
                                model.id(),
                            )
                            .on_hover_text(model.description());
                        }
                    });

                ui.add(
                    egui::Slider::new(&mut self.state.settings.diameter, 1.0..=100.0)
                        .step_by(1.0)
                        .text("Cell diameter (px)"),
                );
                ui.add(
                    egui::Slider::new(&mut self.state.settings.flow_threshold, 0.0..=1.0)
                        .step_by(0.01)
                        .text("Flow threshold"),
                );

                egui::ComboBox::from_label("Channels")
                    .selected_text(self.state.channel_config.label())
                    .show_ui(ui, |ui| {
                        for config in ChannelConfig::ALL {
                            ui.selectable_value(
                                &mut self.state.channel_config,
                                config,
                                config.label(),
                            );
                        }
                    });
                if channel_selectors_visible(self.state.channel_config) {
                    egui::ComboBox::from_label("Channel to segment")
                        .selected_text(channel_label(self.state.settings.seg_channel1))
                        .show_ui(ui, |ui| {
                            for channel in 0..=3 {
                                ui.selectable_value(
                                    &mut self.state.settings.seg_channel1,
                                    channel,
                                    channel_label(channel),
                                );
                            }
                        });
                    egui::ComboBox::from_label("Optional second channel")
                        .selected_text(channel_label(self.state.settings.seg_channel2))
                        .show_ui(ui, |ui| {
                            for channel in 0..=3 {
                                ui.selectable_value(
                                    &mut self.state.settings.seg_channel2,
                                    channel,
                                    channel_label(channel),
                                );
                            }
                        });
                }

                egui::ComboBox::from_label("Display channel")
                    .selected_text(self.state.settings.display_channel.name())
                    .show_ui(ui, |ui| {
                        for mode in DisplayMode::ALL {
                            ui.selectable_value(
                                &mut self.state.settings.display_channel,
                                mode,
                                mode.name(),
                            );
                        }
                    });
                egui::ComboBox::from_label("Mask colormap")
                    .selected_text(self.state.settings.cmap.clone())
                    .show_ui(ui, |ui| {
                        for colormap in Colormap::ALL {
                            ui.selectable_value(
                                &mut self.state.settings.cmap,
                                colormap.name().to_string(),
                                colormap.name(),
                            );
                        }
                    });

                ui.add_space(8.0);
                if ui.button("Run Segmentation").clicked() {
                    self.run_clicked(ctx);
                }

                ui.separator();
                ui.label("Profiles");
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.state.profile_name);
                    if ui.button("Save").clicked() {
                        self.save_profile_clicked();
                    }
                });
                let profiles = self.state.profiles.clone();
                let selected_text = self
                    .state
                    .selected_profile
                    .clone()
                    .unwrap_or_else(|| "choose a profile".to_string());
                egui::ComboBox::from_id_salt("saved_profiles")
                    .selected_text(selected_text)
                    .show_ui(ui, |ui| {
                        for profile in profiles {
                            ui.selectable_value(
                                &mut self.state.selected_profile,
                                Some(profile.clone()),
                                profile,
                            );
                        }
                    });
                ui.horizontal(|ui| {
                    if ui.button("Load Selected Profile").clicked() {
                        self.load_profile_clicked();
                    }
                    if ui.button("Refresh List").clicked() {
                        self.state.profiles = self.context.profile_service().list();
                    }
                });

                ui.add_space(8.0);
                ui.separator();
                if let Some(notice) = &self.state.notice {
                    ui.colored_label(notice_color(notice.kind), &notice.text);
                }
                ui.label(&self.state.status);
            });
    }

    fn draw_results(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if let Some(texture) = &self.figure {
                    ui.label("Result figure (original, masks, outlines)");
                    let size = fit_size(ui.available_width(), texture.size_vec2().into());
                    ui.add(egui::Image::new((texture.id(), egui::Vec2::from(size))));
                } else if let Some(texture) = &self.preview {
                    ui.label("Input preview");
                    let size = fit_size(ui.available_width(), texture.size_vec2().into());
                    ui.add(egui::Image::new((texture.id(), egui::Vec2::from(size))));
                } else {
                    ui.label("Open a microscopy image to get started.");
                }

                if let Some(results) = &self.state.results {
                    ui.add_space(8.0);
                    ui.separator();
                    ui.heading(format!("{} cells detected", results.cell_count));
                    ui.label(&results.summary);
                    ui.add_space(4.0);
                    ui.label("Saved files:");
                    for file in &results.files {
                        ui.monospace(file.display().to_string());
                    }
                }
            });
        });
    }
}

impl eframe::App for CellsegApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dropped = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect::<Vec<_>>()
        });
        if let Some(path) = dropped.into_iter().next() {
            self.load_image(ctx, path);
        }

        self.draw_controls(ctx);
        self.draw_results(ctx);
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

pub(super) fn to_color_image(width: usize, height: usize, rgb: &[u8]) -> egui::ColorImage {
    egui::ColorImage::from_rgb([width, height], rgb)
}

/// Scales a texture down to the panel width, never up past 1:1.
pub(super) fn fit_size(available_width: f32, size: [f32; 2]) -> [f32; 2] {
    let [width, height] = size;
    if width <= 0.0 || available_width >= width {
        return size;
    }
    let scale = available_width / width;
    [width * scale, height * scale]
}

pub(super) fn notice_color(kind: NoticeKind) -> egui::Color32 {
    match kind {
        NoticeKind::Info => egui::Color32::LIGHT_GREEN,
        NoticeKind::Warning => egui::Color32::YELLOW,
        NoticeKind::Error => egui::Color32::LIGHT_RED,
    }
}

use std::time::Duration;

use eframe::egui::{self, Align, Context, Layout, Vec2};

use crate::conflict::ConflictRegistry;
use crate::vis::{ViewKind, VisConfig};

mod canvas;
mod context;
mod render_utils;
mod ui;

pub use context::{ActiveStatus, AppContext};

pub struct GmcrVisApp {
    context: AppContext,
    root_search: String,
    dragging: Option<usize>,
    pan: Vec2,
    zoom: f32,
}

impl GmcrVisApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        registry: ConflictRegistry,
        view: ViewKind,
        config: VisConfig,
    ) -> Self {
        let mut context = AppContext::new(registry, view, config);
        if !context.registry().is_empty() {
            context.select_conflict(0);
        }

        Self {
            context,
            root_search: String::new(),
            dragging: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    fn draw_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.heading("gmcr-vis");
            ui.separator();

            ui.label("Conflict:");
            let selected = self.context.selected_conflict();
            let mut clicked_conflict = None;
            for (index, source) in self.context.registry().sources().iter().enumerate() {
                if ui
                    .selectable_label(selected == Some(index), source.name.as_str())
                    .on_hover_text(source.path.display().to_string())
                    .clicked()
                {
                    clicked_conflict = Some(index);
                }
            }
            if let Some(index) = clicked_conflict {
                self.dragging = None;
                self.context.select_conflict(index);
            }

            ui.separator();
            ui.label("View:");
            let active_view = self.context.view_kind();
            for kind in ViewKind::ALL {
                if ui
                    .selectable_label(active_view == kind, kind.label())
                    .clicked()
                {
                    self.context.select_view(kind);
                    self.dragging = None;
                    self.pan = Vec2::ZERO;
                    self.zoom = 1.0;
                }
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if let Some(model) = self.context.model() {
                    let scene = self.context.view().scene();
                    ui.label(format!(
                        "{} states / {} moves | showing {} nodes / {} links",
                        model.node_count(),
                        model.transition_count(),
                        scene.nodes.len(),
                        scene.links.len()
                    ));
                }
            });
        });
    }

    fn draw_status(&mut self, ui: &mut egui::Ui) {
        if matches!(self.context.status(), ActiveStatus::Ready) {
            self.draw_canvas(ui);
            return;
        }

        let mut retry = false;
        match self.context.status() {
            ActiveStatus::Idle => {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Select a conflict to visualize");
                });
            }
            ActiveStatus::Loading(name) => {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading(format!("Loading {name}..."));
                    ui.add_space(8.0);
                    ui.spinner();
                });
            }
            ActiveStatus::Failed { name, message } => {
                ui.heading(format!("Failed to load {name}"));
                ui.add_space(6.0);
                ui.label(message);
                ui.add_space(10.0);
                retry = ui.button("Retry").clicked();
            }
            ActiveStatus::Ready => {}
        }

        if retry {
            self.context.retry();
        }
    }
}

impl eframe::App for GmcrVisApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if self.context.poll_loads() {
            ctx.request_repaint();
        }
        if self.context.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| self.draw_top_bar(ui));

        egui::SidePanel::left("vis_config")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.draw_controls(ui));

        if self.context.legend().is_some() {
            egui::TopBottomPanel::bottom("legend")
                .resizable(true)
                .show(ctx, |ui| self.draw_legend(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| self.draw_status(ui));

        if self.context.highlight.end_frame() {
            ctx.request_repaint();
        }
    }
}

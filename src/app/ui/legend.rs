use eframe::egui::{self, Color32, Label, RichText, Sense, Ui};

use crate::vis::{CellKind, HighlightKey, LegendCell};

use super::super::GmcrVisApp;
use super::super::render_utils::PALE_VIOLET_RED;

fn cell_text(cell: &LegendCell, lit: bool) -> RichText {
    let text = RichText::new(cell.text.as_str());
    let text = match cell.kind {
        CellKind::Header | CellKind::Group => text.strong(),
        CellKind::StateHeader | CellKind::OptionName => text.monospace(),
        CellKind::Value => text.monospace().color(Color32::from_gray(210)),
        CellKind::Corner | CellKind::Covered => text,
    };
    if lit {
        text.background_color(PALE_VIOLET_RED).color(Color32::BLACK)
    } else {
        text
    }
}

impl GmcrVisApp {
    pub(in crate::app) fn draw_legend(&mut self, ui: &mut Ui) {
        let Some(legend) = self.context.legend() else {
            return;
        };
        let highlight = &self.context.highlight;

        let mut hovered: Vec<HighlightKey> = Vec::new();
        let mut clicked: Option<Vec<HighlightKey>> = None;

        egui::ScrollArea::both()
            .id_salt("legend_scroll")
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Grid::new("legend_grid")
                    .spacing([6.0, 2.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for row in legend.rows() {
                            for cell in row {
                                let lit = !cell.keys.is_empty() && highlight.is_lit(&cell.keys);
                                // egui::Grid cannot span rows, so a group label sits
                                // in the first row of its span and the covered rows
                                // below it stay blank.
                                if cell.kind == CellKind::Group {
                                    ui.label(cell_text(cell, false)).on_hover_text(format!(
                                        "{}: {} option rows",
                                        cell.text, cell.row_span
                                    ));
                                    continue;
                                }
                                if cell.keys.is_empty() {
                                    ui.label(cell_text(cell, false));
                                    continue;
                                }

                                let response =
                                    ui.add(Label::new(cell_text(cell, lit)).sense(Sense::click()));
                                if response.hovered() {
                                    hovered.extend(cell.keys.iter().copied());
                                }
                                if response.clicked() {
                                    clicked = Some(cell.keys.clone());
                                }
                            }
                            ui.end_row();
                        }
                    });
            });

        for key in hovered {
            self.context.highlight.hover(key);
        }
        if let Some(keys) = clicked {
            self.context.legend_clicked(&keys);
        }
    }
}

use eframe::egui::{self, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::conflict::{ConflictModel, NodeId};
use crate::vis::{ConnectorShape, TreeDepth, ViewKind};

use super::super::GmcrVisApp;

const ROOT_SEARCH_LIMIT: usize = 12;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

fn matching_states(model: &ConflictModel, query: &str, limit: usize) -> Vec<NodeId> {
    let query = query.trim();
    if query.is_empty() {
        return model.nodes().iter().take(limit).map(|node| node.id).collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored = model
        .nodes()
        .iter()
        .filter_map(|node| {
            let ordered = fuzzy_match_score(&matcher, &node.ordered_label, query);
            let decimal = fuzzy_match_score(&matcher, &node.decimal_label, query);
            let exact = (node.ordered_label == query || node.decimal_label == query) as i64;
            ordered
                .max(decimal)
                .map(|score| (node.id, score + exact * 1_000))
        })
        .collect::<Vec<_>>();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.into_iter().take(limit).map(|(id, _)| id).collect()
}

impl GmcrVisApp {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        let mut config = self.context.config();

        ui.heading("Settings");
        ui.add_space(4.0);

        match self.context.view_kind() {
            ViewKind::Tree => {
                let mut depth = config.tree.depth.get();
                let response = ui.add(
                    egui::Slider::new(&mut depth, TreeDepth::MIN..=TreeDepth::MAX).text("Depth"),
                );
                if response.changed() {
                    config.tree.depth = TreeDepth::clamped(depth);
                }
                ui.checkbox(&mut config.tree.show_only_uis, "Only show UIs");

                ui.add_space(8.0);
                ui.separator();
                self.draw_root_picker(ui);
            }
            ViewKind::Graph => {
                ui.label("Connectors");
                ui.horizontal(|ui| {
                    for shape in [ConnectorShape::Line, ConnectorShape::Arc] {
                        ui.radio_value(&mut config.graph.connector_shape, shape, shape.label());
                    }
                });
                ui.checkbox(&mut config.graph.show_only_uis, "Only show UIs");
                ui.checkbox(&mut config.graph.style_non_uis, "Differentiate non-UIs");
            }
        }

        self.context.set_config(config);
    }

    fn draw_root_picker(&mut self, ui: &mut Ui) {
        let Some(model) = self.context.model().cloned() else {
            return;
        };

        let current = self.context.root();
        ui.label(match current.and_then(|root| model.node(root)) {
            Some(node) => format!("Root: state {} ({})", node.ordered_label, node.decimal_label),
            None => "Root: none".to_owned(),
        });

        ui.add(
            egui::TextEdit::singleline(&mut self.root_search)
                .hint_text("Find state by label")
                .desired_width(f32::INFINITY),
        );

        let mut chosen = None;
        egui::ScrollArea::vertical()
            .id_salt("root_search_results")
            .max_height(220.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for id in matching_states(&model, &self.root_search, ROOT_SEARCH_LIMIT) {
                    let Some(node) = model.node(id) else {
                        continue;
                    };
                    let label = format!(
                        "{}  [{}]  {}",
                        node.ordered_label,
                        node.decimal_label,
                        node.state.join("")
                    );
                    if ui.selectable_label(current == Some(id), label).clicked() {
                        chosen = Some(id);
                    }
                }
            });

        if let Some(id) = chosen {
            self.context.reroot_to(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::matching_states;
    use crate::conflict::NodeId;
    use crate::conflict::fixtures::three_party;

    #[test]
    fn empty_query_lists_states_in_order() {
        let model = three_party();
        assert_eq!(
            matching_states(&model, "  ", 2),
            vec![NodeId(0), NodeId(1)]
        );
    }

    #[test]
    fn exact_label_match_ranks_first() {
        let model = three_party();
        let found = matching_states(&model, "9", 10);
        assert_eq!(found.first(), Some(&NodeId(3)));
    }

    #[test]
    fn unmatched_query_returns_nothing() {
        let model = three_party();
        assert!(matching_states(&model, "zzz", 10).is_empty());
    }
}

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, vec2};

use crate::util::format_payoff;
use crate::vis::LinkPath;

use super::GmcrVisApp;
use super::render_utils::{
    LIGHT_BLUE, NON_UI_GREY, PALE_VIOLET_RED, arc_points, arrow_head, diagonal_points,
    draw_background, mover_color, screen_to_world, trim_segment, world_to_screen,
};

const NODE_RADIUS: f32 = 10.0;

impl GmcrVisApp {
    fn handle_canvas_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.2, 5.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    fn handle_canvas_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    pub(super) fn draw_canvas(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.context.set_viewport(rect.size());
        if self.context.step_layout() {
            ui.ctx().request_repaint();
        }

        self.handle_canvas_zoom(ui, rect, &response);
        self.handle_canvas_pan(&response);

        let painter = ui.painter_at(rect);
        draw_background(&painter, rect, self.pan, self.zoom);

        let pan = self.pan;
        let zoom = self.zoom;
        let radius = (NODE_RADIUS * zoom.sqrt()).clamp(4.0, 24.0);
        let scene = self.context.view().scene();
        let model = self.context.model();
        let highlight = &self.context.highlight;

        let screen_positions = scene
            .nodes
            .iter()
            .map(|node| world_to_screen(rect, pan, zoom, node.position))
            .collect::<Vec<Pos2>>();

        let hovered = ui
            .input(|input| input.pointer.hover_pos())
            .and_then(|pointer| node_at(&screen_positions, pointer, radius));
        let grabbed = if response.drag_started_by(egui::PointerButton::Primary) {
            ui.input(|input| input.pointer.press_origin())
                .and_then(|origin| node_at(&screen_positions, origin, radius))
        } else {
            None
        };

        for link in &scene.links {
            let (Some(&start), Some(&end)) = (
                screen_positions.get(link.source),
                screen_positions.get(link.target),
            ) else {
                continue;
            };

            let mover_index = model.and_then(|model| model.decision_maker_index(&link.mover));
            let (color, width) = if link.non_improving {
                (NON_UI_GREY, 1.0)
            } else {
                (mover_color(mover_index), 1.6)
            };
            let stroke = Stroke::new(width * zoom.sqrt().clamp(0.6, 2.0), color);

            let points = match link.path {
                LinkPath::Diagonal => {
                    let Some((start, end)) = trim_segment(start, end, radius) else {
                        continue;
                    };
                    diagonal_points(start, end)
                }
                LinkPath::Line => {
                    let Some((start, end)) = trim_segment(start, end, radius) else {
                        continue;
                    };
                    vec![start, end]
                }
                LinkPath::Arc => {
                    let points = arc_points(start, end);
                    points
                        .into_iter()
                        .filter(|point| {
                            point.distance(start) > radius && point.distance(end) > radius
                        })
                        .collect()
                }
            };
            if points.len() < 2 {
                continue;
            }

            if link.non_improving {
                painter.extend(Shape::dashed_line(&points, stroke, 6.0, 4.0));
            } else {
                painter.add(Shape::line(points.clone(), stroke));
            }

            if link.path != LinkPath::Diagonal {
                let tip = points[points.len() - 1];
                let direction = tip - points[points.len() - 2];
                if direction.length() > f32::EPSILON {
                    painter.add(Shape::convex_polygon(
                        arrow_head(tip, direction, 4.0 + radius * 0.5),
                        color,
                        Stroke::NONE,
                    ));
                }
            }
        }

        for (index, node) in scene.nodes.iter().enumerate() {
            let position = screen_positions[index];
            let is_hovered = hovered == Some(index);
            let fill = if is_hovered || highlight.is_lit(&[node.key]) {
                PALE_VIOLET_RED
            } else {
                LIGHT_BLUE
            };

            painter.circle_filled(position, radius, fill);
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(
                    if is_hovered { 2.0 } else { 1.5 },
                    Color32::from_rgb(70, 130, 180),
                ),
            );
            painter.text(
                position,
                Align2::CENTER_CENTER,
                node.label.as_str(),
                FontId::proportional((radius * 1.05).clamp(8.0, 16.0)),
                Color32::from_gray(20),
            );
        }

        let mut hovered_key = None;
        if let Some(index) = hovered
            && let Some(node) = scene.nodes.get(index)
        {
            hovered_key = Some(node.key);
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });

            if let Some(state) = model.and_then(|model| model.node(node.node)) {
                let mut lines = vec![format!(
                    "[{}] state {} (decimal {})  |  {} moves",
                    node.key,
                    state.ordered_label,
                    state.decimal_label,
                    state.transitions.len()
                )];
                for transition in &state.transitions {
                    let target = model
                        .and_then(|model| model.node(transition.target))
                        .map_or("?", |target| target.ordered_label.as_str());
                    lines.push(format!(
                        "{} -> {}  ({})",
                        transition.decision_maker,
                        target,
                        format_payoff(transition.payoff_change)
                    ));
                }
                painter.text(
                    rect.left_top() + vec2(10.0, 10.0),
                    Align2::LEFT_TOP,
                    lines.join("\n"),
                    FontId::proportional(13.0),
                    Color32::from_gray(240),
                );
            }
        }

        let clicked = response.clicked_by(egui::PointerButton::Primary);

        if let Some(key) = hovered_key {
            self.context.highlight.hover(key);
        }
        if clicked && let Some(index) = hovered {
            self.context.node_clicked(index);
        }

        if grabbed.is_some() {
            self.dragging = grabbed;
        }
        if let Some(index) = self.dragging
            && response.dragged_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let world = screen_to_world(rect, pan, zoom, pointer);
            if self.context.drag_node(index, world) {
                ui.ctx().request_repaint();
            } else {
                self.dragging = None;
            }
        }
        if response.drag_stopped() && self.dragging.take().is_some() {
            self.context.end_drag();
        }
    }
}

fn node_at(positions: &[Pos2], point: Pos2, radius: f32) -> Option<usize> {
    positions
        .iter()
        .enumerate()
        .map(|(index, position)| (index, position.distance(point)))
        .filter(|&(_, distance)| distance <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::node_at;

    #[test]
    fn picks_the_closest_circle_within_reach() {
        let positions = [pos2(0.0, 0.0), pos2(12.0, 0.0), pos2(100.0, 100.0)];
        assert_eq!(node_at(&positions, pos2(8.0, 0.0), 10.0), Some(1));
        assert_eq!(node_at(&positions, pos2(2.0, 1.0), 10.0), Some(0));
        assert_eq!(node_at(&positions, pos2(50.0, 50.0), 10.0), None);
    }
}


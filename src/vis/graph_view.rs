use std::sync::Arc;

use eframe::egui::Vec2;

use crate::conflict::ConflictModel;
use crate::layout::{ForceLayout, LayoutEngine};

use super::config::{ConnectorShape, VisConfig};
use super::graph::{GraphLink, assemble_links};
use super::view::{LinkPath, Reroot, Scene, SceneLink, ViewController, ViewKind};

pub struct GraphView {
    model: Option<Arc<ConflictModel>>,
    viewport: Vec2,
    links: Vec<GraphLink>,
    scene: Scene,
    layout: ForceLayout,
}

impl GraphView {
    pub fn new() -> Self {
        Self {
            model: None,
            viewport: Vec2::ZERO,
            links: Vec::new(),
            scene: Scene::default(),
            layout: ForceLayout::new(),
        }
    }

    #[cfg(test)]
    pub fn links(&self) -> &[GraphLink] {
        &self.links
    }

    fn sync_positions(&mut self) {
        for (scene_node, &position) in self.scene.nodes.iter_mut().zip(self.layout.positions()) {
            scene_node.position = position;
        }
    }
}

impl ViewController for GraphView {
    fn kind(&self) -> ViewKind {
        ViewKind::Graph
    }

    fn load_vis(&mut self, model: Arc<ConflictModel>, viewport: Vec2, config: &VisConfig) {
        self.scene.clear();
        self.model = Some(model);
        self.viewport = viewport;
        self.refresh(config);
    }

    fn refresh(&mut self, config: &VisConfig) {
        let previous = self
            .scene
            .nodes
            .iter()
            .map(|node| node.position)
            .collect::<Vec<_>>();
        self.scene.clear();
        self.links.clear();

        let Some(model) = self.model.as_deref() else {
            return;
        };

        let graph = config.graph;
        self.links = assemble_links(model, graph.show_only_uis, graph.style_non_uis);
        let path = match graph.connector_shape {
            ConnectorShape::Line => LinkPath::Line,
            ConnectorShape::Arc => LinkPath::Arc,
        };

        let pairs = self
            .links
            .iter()
            .map(|link| (link.source.index(), link.target.index()))
            .collect::<Vec<_>>();
        self.layout.start(model.node_count(), &pairs, self.viewport);
        self.layout.warm_start(&previous);

        self.scene.nodes = model
            .nodes()
            .iter()
            .map(|node| Scene::scene_node(model, node.id, Vec2::ZERO))
            .collect();
        self.scene.links = self
            .links
            .iter()
            .map(|link| SceneLink {
                source: link.source.index(),
                target: link.target.index(),
                mover: link.decision_maker.clone(),
                non_improving: link.is_non_improving,
                path,
            })
            .collect();
        self.sync_positions();
    }

    fn resize(&mut self, viewport: Vec2, config: &VisConfig) {
        self.viewport = viewport;
        self.refresh(config);
    }

    fn clear_vis(&mut self) {
        self.scene.clear();
        self.links.clear();
        self.model = None;
    }

    fn step_layout(&mut self) -> bool {
        let moving = self.layout.tick();
        self.sync_positions();
        moving
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn drag_node(&mut self, index: usize, position: Vec2) -> bool {
        if index >= self.scene.nodes.len() || !self.layout.pin(index, position) {
            return false;
        }
        self.sync_positions();
        true
    }

    fn end_drag(&mut self) {
        self.layout.release();
    }

    fn rerootable(&mut self) -> Option<&mut dyn Reroot> {
        None
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;
    use crate::conflict::NodeId;
    use crate::conflict::fixtures::{chain, three_party};
    use crate::vis::highlight::HighlightKey;

    fn loaded(model: ConflictModel, config: &VisConfig) -> GraphView {
        let mut view = GraphView::new();
        view.load_vis(Arc::new(model), vec2(800.0, 600.0), config);
        view
    }

    #[test]
    fn one_scene_node_per_state() {
        let view = loaded(three_party(), &VisConfig::default());
        let nodes = view.scene().nodes.iter().map(|n| n.node).collect::<Vec<_>>();
        assert_eq!(nodes, [NodeId(0), NodeId(1), NodeId(2), NodeId(3)]);
        for node in &view.scene().nodes {
            assert_eq!(node.key, HighlightKey::State(node.node));
        }
        assert_eq!(view.scene().links.len(), 5);
    }

    #[test]
    fn only_improving_graph_keeps_one_chain_link() {
        let mut config = VisConfig::default();
        config.graph.show_only_uis = true;
        let view = loaded(chain(), &config);

        assert_eq!(view.links().len(), 1);
        let link = &view.scene().links[0];
        assert_eq!((link.source, link.target), (0, 1));
        assert_eq!(view.scene().nodes.len(), 3);
    }

    #[test]
    fn connector_shape_and_styling_reach_the_scene() {
        let mut config = VisConfig::default();
        config.graph.connector_shape = ConnectorShape::Arc;
        config.graph.style_non_uis = true;
        let view = loaded(chain(), &config);

        assert!(view.scene().links.iter().all(|l| l.path == LinkPath::Arc));
        let styled = view
            .scene()
            .links
            .iter()
            .map(|l| l.non_improving)
            .collect::<Vec<_>>();
        assert_eq!(styled, [false, true]);
    }

    #[test]
    fn layout_steps_move_scene_nodes() {
        let mut view = loaded(three_party(), &VisConfig::default());
        let before = view.scene().nodes.iter().map(|n| n.position).collect::<Vec<_>>();
        assert!(view.step_layout());
        let after = view.scene().nodes.iter().map(|n| n.position).collect::<Vec<_>>();
        assert_ne!(before, after);
    }

    #[test]
    fn refresh_keeps_settled_positions() {
        let mut config = VisConfig::default();
        let mut view = loaded(three_party(), &config);
        while view.step_layout() {}
        let settled = view.scene().nodes.iter().map(|n| n.position).collect::<Vec<_>>();

        config.graph.connector_shape = ConnectorShape::Arc;
        view.refresh(&config);
        let refreshed = view.scene().nodes.iter().map(|n| n.position).collect::<Vec<_>>();
        assert_eq!(settled, refreshed);
    }

    #[test]
    fn dragged_node_follows_the_pointer_and_wakes_the_layout() {
        let mut view = loaded(three_party(), &VisConfig::default());
        while view.step_layout() {}

        let grip = vec2(-200.0, 90.0);
        assert!(view.drag_node(1, grip));
        assert_eq!(view.scene().nodes[1].position, grip);
        assert!(view.step_layout());
        assert!(view.step_layout());
        assert_eq!(view.scene().nodes[1].position, grip);

        view.end_drag();
        while view.step_layout() {}
        assert!(!view.drag_node(7, grip));
    }

    #[test]
    fn graph_view_cannot_be_rerooted() {
        let mut view = loaded(chain(), &VisConfig::default());
        assert!(view.rerootable().is_none());
        view.clear_vis();
        assert!(view.scene().is_empty());
        assert!(view.links().is_empty());
    }
}

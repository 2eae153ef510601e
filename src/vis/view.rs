use std::sync::Arc;

use eframe::egui::Vec2;

use crate::conflict::{ConflictModel, DecisionMakerId, NodeId};

use super::config::VisConfig;
use super::highlight::HighlightKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Tree,
    Graph,
}

impl ViewKind {
    pub const ALL: [Self; 2] = [Self::Tree, Self::Graph];

    pub fn label(self) -> &'static str {
        match self {
            Self::Tree => "Tree",
            Self::Graph => "Graph",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkPath {
    Diagonal,
    Line,
    Arc,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub node: NodeId,
    pub key: HighlightKey,
    pub label: String,
    pub position: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneLink {
    pub source: usize,
    pub target: usize,
    pub mover: DecisionMakerId,
    pub non_improving: bool,
    pub path: LinkPath,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub links: Vec<SceneLink>,
}

impl Scene {
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }

    pub(super) fn scene_node(model: &ConflictModel, node: NodeId, position: Vec2) -> SceneNode {
        let label = model
            .node(node)
            .map(|state| state.ordered_label.clone())
            .unwrap_or_default();
        SceneNode {
            node,
            key: HighlightKey::State(node),
            label,
            position,
        }
    }
}

/// One interchangeable visualization. Every derived structure is rebuilt in
/// full by `load_vis`, `refresh` and `resize`.
pub trait ViewController {
    fn kind(&self) -> ViewKind;

    fn load_vis(&mut self, model: Arc<ConflictModel>, viewport: Vec2, config: &VisConfig);

    fn refresh(&mut self, config: &VisConfig);

    fn resize(&mut self, viewport: Vec2, config: &VisConfig);

    fn clear_vis(&mut self);

    fn step_layout(&mut self) -> bool;

    fn scene(&self) -> &Scene;

    /// Holds scene node `index` at world `position` while the pointer drags it.
    /// Views with a fixed layout return false.
    fn drag_node(&mut self, _index: usize, _position: Vec2) -> bool {
        false
    }

    fn end_drag(&mut self) {}

    fn rerootable(&mut self) -> Option<&mut dyn Reroot>;
}

pub trait Reroot {
    fn root(&self) -> Option<NodeId>;

    /// Rebuilds around `root`. Returns false if the state is unknown.
    fn change_root(&mut self, root: NodeId, config: &VisConfig) -> bool;
}

pub fn make_view(kind: ViewKind) -> Box<dyn ViewController> {
    match kind {
        ViewKind::Tree => Box::new(super::tree_view::TreeView::new()),
        ViewKind::Graph => Box::new(super::graph_view::GraphView::new()),
    }
}

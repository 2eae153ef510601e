use std::sync::Arc;

use eframe::egui::Vec2;
use log::debug;

use crate::conflict::{ConflictModel, NodeId};
use crate::layout::{LayoutEngine, TreeLayout};

use super::config::VisConfig;
use super::tree::{TreeNode, build_rooted, flatten};
use super::view::{LinkPath, Reroot, Scene, SceneLink, ViewController, ViewKind};

pub struct TreeView {
    model: Option<Arc<ConflictModel>>,
    root: Option<NodeId>,
    viewport: Vec2,
    tree: Option<TreeNode>,
    scene: Scene,
    layout: TreeLayout,
}

impl TreeView {
    pub fn new() -> Self {
        Self {
            model: None,
            root: None,
            viewport: Vec2::ZERO,
            tree: None,
            scene: Scene::default(),
            layout: TreeLayout::new(),
        }
    }

    #[cfg(test)]
    pub fn tree(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }
}

impl ViewController for TreeView {
    fn kind(&self) -> ViewKind {
        ViewKind::Tree
    }

    fn load_vis(&mut self, model: Arc<ConflictModel>, viewport: Vec2, config: &VisConfig) {
        self.root = Some(model.start_node());
        self.model = Some(model);
        self.viewport = viewport;
        self.refresh(config);
    }

    fn refresh(&mut self, config: &VisConfig) {
        self.scene.clear();
        self.tree = None;

        let (Some(model), Some(root)) = (self.model.as_deref(), self.root) else {
            return;
        };
        let depth = usize::from(config.tree.depth.get());
        let Some(tree) = build_rooted(model, root, depth, config.tree.show_only_uis) else {
            return;
        };

        let flat = flatten(&tree);
        self.layout
            .start(flat.positions.len(), &flat.links, self.viewport);
        let positions = self.layout.positions();

        self.scene.nodes = flat
            .positions
            .iter()
            .zip(positions)
            .map(|(position, &world)| Scene::scene_node(model, position.node, world))
            .collect();
        self.scene.links = flat
            .links
            .iter()
            .filter_map(|&(parent, child)| {
                let mover = flat.positions[child].last_mover.clone()?;
                Some(SceneLink {
                    source: parent,
                    target: child,
                    mover,
                    non_improving: false,
                    path: LinkPath::Diagonal,
                })
            })
            .collect();
        self.tree = Some(tree);
    }

    fn resize(&mut self, viewport: Vec2, config: &VisConfig) {
        self.viewport = viewport;
        self.refresh(config);
    }

    fn clear_vis(&mut self) {
        self.scene.clear();
        self.tree = None;
        self.model = None;
        self.root = None;
    }

    fn step_layout(&mut self) -> bool {
        self.layout.tick()
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn rerootable(&mut self) -> Option<&mut dyn Reroot> {
        Some(self)
    }
}

impl Reroot for TreeView {
    fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn change_root(&mut self, root: NodeId, config: &VisConfig) -> bool {
        let known = self
            .model
            .as_deref()
            .is_some_and(|model| model.node(root).is_some());
        if !known {
            return false;
        }

        debug!("re-rooting move tree at state {root}");
        self.root = Some(root);
        self.refresh(config);
        true
    }
}

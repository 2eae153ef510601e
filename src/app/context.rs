use std::sync::Arc;

use eframe::egui::{Vec2, vec2};
use log::{debug, info, warn};

use crate::conflict::{
    ConflictModel, ConflictRegistry, LoadOutcome, LoadStatus, NodeId, Request, RequestToken,
};
use crate::vis::{
    Highlight, HighlightKey, LegendMatrix, ViewController, ViewKind, VisConfig, build_matrix,
    make_view,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Selection {
    conflict: usize,
    token: Option<RequestToken>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveStatus<'a> {
    Idle,
    Loading(&'a str),
    Failed { name: &'a str, message: &'a str },
    Ready,
}

pub struct AppContext {
    registry: ConflictRegistry,
    selection: Option<Selection>,
    model: Option<Arc<ConflictModel>>,
    legend: Option<LegendMatrix>,
    view: Box<dyn ViewController>,
    config: VisConfig,
    viewport: Vec2,
    pub highlight: Highlight,
}

impl AppContext {
    pub fn new(registry: ConflictRegistry, view: ViewKind, config: VisConfig) -> Self {
        Self {
            registry,
            selection: None,
            model: None,
            legend: None,
            view: make_view(view),
            config,
            viewport: vec2(1000.0, 700.0),
            highlight: Highlight::default(),
        }
    }

    pub fn registry(&self) -> &ConflictRegistry {
        &self.registry
    }

    pub fn selected_conflict(&self) -> Option<usize> {
        self.selection.map(|selection| selection.conflict)
    }

    pub fn model(&self) -> Option<&Arc<ConflictModel>> {
        self.model.as_ref()
    }

    pub fn legend(&self) -> Option<&LegendMatrix> {
        self.legend.as_ref()
    }

    pub fn view(&self) -> &dyn ViewController {
        &*self.view
    }

    pub fn view_kind(&self) -> ViewKind {
        self.view.kind()
    }

    pub fn config(&self) -> VisConfig {
        self.config
    }

    pub fn status(&self) -> ActiveStatus<'_> {
        let Some(selection) = self.selection else {
            return ActiveStatus::Idle;
        };
        if self.model.is_some() {
            return ActiveStatus::Ready;
        }

        let name = self
            .registry
            .sources()
            .get(selection.conflict)
            .map_or("", |source| source.name.as_str());
        match self.registry.status(selection.conflict) {
            Some(LoadStatus::Failed(message)) => ActiveStatus::Failed { name, message },
            Some(LoadStatus::Loading | LoadStatus::Loaded) => ActiveStatus::Loading(name),
            Some(LoadStatus::Unloaded) | None => ActiveStatus::Idle,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status(), ActiveStatus::Loading(_))
    }

    /// Activates a cached conflict at once, or starts (or joins) its fetch.
    /// Selecting the conflict that is already active or loading does nothing.
    pub fn select_conflict(&mut self, index: usize) {
        if let Some(selection) = self.selection
            && selection.conflict == index
            && (self.model.is_some() || self.is_loading())
        {
            return;
        }

        match self.registry.request(index) {
            Some(Request::Ready(model)) => {
                self.selection = Some(Selection {
                    conflict: index,
                    token: None,
                });
                self.activate(model);
            }
            Some(Request::Pending(token)) => {
                self.selection = Some(Selection {
                    conflict: index,
                    token: Some(token),
                });
                self.deactivate();
            }
            None => warn!("ignoring selection of unknown conflict {index}"),
        }
    }

    pub fn retry(&mut self) {
        if let Some(selection) = self.selection
            && matches!(self.status(), ActiveStatus::Failed { .. })
        {
            self.select_conflict(selection.conflict);
        }
    }

    pub fn select_view(&mut self, kind: ViewKind) {
        if self.view.kind() == kind {
            return;
        }

        info!("switching to {} view", kind.label());
        self.view.clear_vis();
        self.highlight.clear();
        self.view = make_view(kind);
        if let Some(model) = &self.model {
            self.view
                .load_vis(Arc::clone(model), self.viewport, &self.config);
        }
    }

    pub fn poll_loads(&mut self) -> bool {
        let outcomes = self.registry.poll();
        self.apply_outcomes(outcomes)
    }

    fn apply_outcomes(&mut self, outcomes: Vec<LoadOutcome>) -> bool {
        let mut changed = false;
        for outcome in outcomes {
            let current = self.selection.is_some_and(|selection| {
                selection.conflict == outcome.conflict && selection.token == Some(outcome.token)
            });
            if !current {
                warn!(
                    "conflict {} finished loading after the selection moved on; cached only",
                    outcome.conflict
                );
                continue;
            }

            changed = true;
            match outcome.result {
                Ok(model) => {
                    self.selection = Some(Selection {
                        conflict: outcome.conflict,
                        token: None,
                    });
                    self.activate(model);
                }
                Err(_) => self.deactivate(),
            }
        }
        changed
    }

    fn activate(&mut self, model: Arc<ConflictModel>) {
        info!("activating conflict {}", model.name());
        self.highlight.clear();
        self.legend = Some(build_matrix(&model));
        self.view.clear_vis();
        self.view
            .load_vis(Arc::clone(&model), self.viewport, &self.config);
        self.model = Some(model);
    }

    fn deactivate(&mut self) {
        self.highlight.clear();
        self.view.clear_vis();
        self.legend = None;
        self.model = None;
    }

    pub fn set_config(&mut self, config: VisConfig) {
        if config == self.config {
            return;
        }
        self.config = config;
        self.view.refresh(&self.config);
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        if (viewport - self.viewport).length() < 0.5 {
            return;
        }
        self.viewport = viewport;
        if self.model.is_some() {
            self.view.resize(viewport, &self.config);
        }
    }

    pub fn step_layout(&mut self) -> bool {
        self.view.step_layout()
    }

    pub fn root(&mut self) -> Option<NodeId> {
        self.view.rerootable().and_then(|view| view.root())
    }

    pub fn reroot_to(&mut self, node: NodeId) -> bool {
        let config = self.config;
        match self.view.rerootable() {
            Some(view) => view.change_root(node, &config),
            None => false,
        }
    }

    pub fn legend_clicked(&mut self, keys: &[HighlightKey]) -> bool {
        match keys.iter().find_map(|key| key.state()) {
            Some(node) => self.reroot_to(node),
            None => false,
        }
    }

    pub fn node_clicked(&mut self, scene_index: usize) -> bool {
        let Some(node) = self.view.scene().nodes.get(scene_index).map(|node| node.node) else {
            return false;
        };
        debug!("scene node {scene_index} (state {node}) clicked");
        self.reroot_to(node)
    }

    pub fn drag_node(&mut self, scene_index: usize, world: Vec2) -> bool {
        self.view.drag_node(scene_index, world)
    }

    pub fn end_drag(&mut self) {
        self.view.end_drag();
    }

    #[cfg(test)]
    fn wait_for_loads(&mut self) -> bool {
        let outcomes = self.registry.wait(std::time::Duration::from_secs(5));
        self.apply_outcomes(outcomes)
    }
}

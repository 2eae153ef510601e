use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::{error, info};

use super::model::ConflictModel;
use super::source::{ConflictSource, load_conflict};

/// Identifies one issued fetch. A completed load only becomes active when its
/// token still matches the selection that asked for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

enum Slot {
    Unloaded,
    Loading(RequestToken),
    Loaded(Arc<ConflictModel>),
    Failed(String),
}

#[derive(Clone, Copy, Debug)]
pub enum LoadStatus<'a> {
    Unloaded,
    Loading,
    Loaded,
    Failed(&'a str),
}

#[derive(Clone, Debug)]
pub enum Request {
    Ready(Arc<ConflictModel>),
    Pending(RequestToken),
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub conflict: usize,
    pub token: RequestToken,
    pub result: Result<Arc<ConflictModel>, String>,
}

/// Known conflicts plus a memoized load slot for each. Each conflict is
/// fetched at most once unless its last attempt failed.
pub struct ConflictRegistry {
    sources: Vec<ConflictSource>,
    slots: Vec<Slot>,
    next_token: u64,
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
}

impl ConflictRegistry {
    pub fn new(sources: Vec<ConflictSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        let slots = sources.iter().map(|_| Slot::Unloaded).collect();
        Self {
            sources,
            slots,
            next_token: 0,
            tx,
            rx,
        }
    }

    pub fn sources(&self) -> &[ConflictSource] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn status(&self, index: usize) -> Option<LoadStatus<'_>> {
        self.slots.get(index).map(|slot| match slot {
            Slot::Unloaded => LoadStatus::Unloaded,
            Slot::Loading(_) => LoadStatus::Loading,
            Slot::Loaded(_) => LoadStatus::Loaded,
            Slot::Failed(message) => LoadStatus::Failed(message),
        })
    }

    pub fn request(&mut self, index: usize) -> Option<Request> {
        let slot = self.slots.get(index)?;
        match slot {
            Slot::Loaded(model) => Some(Request::Ready(Arc::clone(model))),
            Slot::Loading(token) => Some(Request::Pending(*token)),
            Slot::Unloaded | Slot::Failed(_) => {
                let token = self.issue_token();
                self.spawn_load(index, token);
                self.slots[index] = Slot::Loading(token);
                Some(Request::Pending(token))
            }
        }
    }

    fn issue_token(&mut self) -> RequestToken {
        self.next_token = self.next_token.wrapping_add(1);
        RequestToken(self.next_token)
    }

    fn spawn_load(&self, index: usize, token: RequestToken) {
        let source = self.sources[index].clone();
        let tx = self.tx.clone();
        info!("loading conflict {} from {}", source.name, source.path.display());

        thread::spawn(move || {
            let result = load_conflict(&source)
                .map(Arc::new)
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(LoadOutcome {
                conflict: index,
                token,
                result,
            });
        });
    }

    pub fn poll(&mut self) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            self.record(&outcome);
            outcomes.push(outcome);
        }
        outcomes
    }

    fn record(&mut self, outcome: &LoadOutcome) {
        let Some(slot) = self.slots.get_mut(outcome.conflict) else {
            return;
        };

        // A retry may have superseded this fetch.
        if !matches!(slot, Slot::Loading(token) if *token == outcome.token) {
            return;
        }

        let name = &self.sources[outcome.conflict].name;
        *slot = match &outcome.result {
            Ok(model) => {
                info!(
                    "loaded conflict {name}: {} states, {} moves",
                    model.node_count(),
                    model.transition_count()
                );
                Slot::Loaded(Arc::clone(model))
            }
            Err(message) => {
                error!("failed to load conflict {name}: {message}");
                Slot::Failed(message.clone())
            }
        };
    }

    #[cfg(test)]
    pub(crate) fn wait(&mut self, timeout: std::time::Duration) -> Vec<LoadOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(first) => {
                self.record(&first);
                let mut outcomes = vec![first];
                outcomes.extend(self.poll());
                outcomes
            }
            Err(_) => Vec::new(),
        }
    }
}

use anyhow::{Context, Result};
use log::debug;

use super::error::ModelError;
use super::model::{
    ConflictModel, ConflictOption, DecisionMaker, DecisionMakerId, Node, NodeId, Transition,
};
use super::parse::RawConflict;

/// Resolves every raw move into an index-checked [`Transition`]. Malformed
/// input fails here so that no dangling target reaches the views.
pub(super) fn normalize_conflict(name: &str, raw: RawConflict) -> Result<ConflictModel> {
    if raw.nodes.is_empty() {
        return Err(ModelError::Empty.into());
    }

    let node_count = raw.nodes.len();
    let option_count = raw.options.len();

    let options = raw
        .options
        .into_iter()
        .map(|option| ConflictOption {
            name: option.into_name(),
        })
        .collect::<Vec<_>>();

    let mut decision_makers = Vec::with_capacity(raw.decision_makers.len());
    for (index, raw_dm) in raw.decision_makers.into_iter().enumerate() {
        let id = raw_dm
            .id
            .map(DecisionMakerId)
            .unwrap_or_else(|| DecisionMakerId(format!("dm{index}")));

        if let Some(&option) = raw_dm.options.iter().find(|&&option| option >= option_count) {
            return Err(ModelError::UnknownOption {
                decision_maker: raw_dm.name,
                option,
            }
            .into());
        }

        decision_makers.push(DecisionMaker {
            id,
            name: raw_dm.name,
            options: raw_dm.options,
        });
    }

    let mut nodes = Vec::with_capacity(node_count);
    for (position, raw_node) in raw.nodes.into_iter().enumerate() {
        let id = raw_node
            .id
            .resolve()
            .with_context(|| format!("state at position {position} has an invalid id"))?;
        if id != position {
            return Err(ModelError::NodeIdMismatch { position, id }.into());
        }

        let state = raw_node.state.into_values();
        if state.len() != option_count {
            return Err(ModelError::StateLength {
                node: id,
                expected: option_count,
                found: state.len(),
            }
            .into());
        }

        let mut transitions = Vec::with_capacity(raw_node.reachable.len());
        for raw_move in raw_node.reachable {
            let target = raw_move
                .target
                .resolve()
                .with_context(|| format!("state {id} has a move with an invalid target"))?;
            if target >= node_count {
                return Err(ModelError::Resolution { node: id, target }.into());
            }

            transitions.push(Transition {
                source: NodeId(id),
                target: NodeId(target),
                decision_maker: DecisionMakerId(raw_move.dm),
                payoff_change: raw_move.payoff_change,
            });
        }

        nodes.push(Node {
            id: NodeId(id),
            ordered_label: raw_node.ordered,
            decimal_label: raw_node.decimal,
            state,
            transitions,
        });
    }

    let start_node = match raw.start_node {
        Some(raw_start) => {
            let start = raw_start.resolve().context("startNode is not a valid state id")?;
            if start >= node_count {
                return Err(ModelError::UnknownStartNode(start).into());
            }
            NodeId(start)
        }
        None => NodeId(0),
    };

    let model = ConflictModel::new(
        name.to_owned(),
        nodes,
        decision_makers,
        options,
        start_node,
    );
    debug!(
        "normalized conflict {name}: {} states, {} moves, {} decision makers",
        model.node_count(),
        model.transition_count(),
        model.decision_makers().len()
    );

    Ok(model)
}

use log::debug;

use crate::conflict::{ConflictModel, DecisionMakerId, NodeId};

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
    pub source: NodeId,
    pub target: NodeId,
    pub decision_maker: DecisionMakerId,
    pub payoff_change: f64,
    pub is_non_improving: bool,
}

/// Concatenates every state's moves in state order. With `only_improving`
/// only moves with `payoff_change > 0` are kept; `style_non_uis` marks the
/// remaining `payoff_change <= 0` moves without removing them.
pub fn assemble_links(
    model: &ConflictModel,
    only_improving: bool,
    style_non_uis: bool,
) -> Vec<GraphLink> {
    let links = model
        .nodes()
        .iter()
        .flat_map(|node| node.transitions.iter())
        .filter(|transition| !only_improving || transition.payoff_change > 0.0)
        .map(|transition| GraphLink {
            source: transition.source,
            target: transition.target,
            decision_maker: transition.decision_maker.clone(),
            payoff_change: transition.payoff_change,
            is_non_improving: style_non_uis && transition.payoff_change <= 0.0,
        })
        .collect::<Vec<_>>();

    debug!(
        "assembled {} of {} moves for the graph view",
        links.len(),
        model.transition_count()
    );
    links
}

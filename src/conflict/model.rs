use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DecisionMakerId(pub String);

impl DecisionMakerId {
    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DecisionMakerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DecisionMakerId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub source: NodeId,
    pub target: NodeId,
    pub decision_maker: DecisionMakerId,
    pub payoff_change: f64,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub ordered_label: String,
    pub decimal_label: String,
    pub state: Vec<String>,
    pub transitions: Vec<Transition>,
}

#[derive(Clone, Debug)]
pub struct DecisionMaker {
    pub id: DecisionMakerId,
    pub name: String,
    pub options: Vec<usize>,
}

#[derive(Clone, Debug)]
pub struct ConflictOption {
    pub name: String,
}

/// A loaded conflict. Every transition target resolves to a node of the same
/// model; cycles are allowed.
#[derive(Clone, Debug)]
pub struct ConflictModel {
    name: String,
    nodes: Vec<Node>,
    decision_makers: Vec<DecisionMaker>,
    options: Vec<ConflictOption>,
    start_node: NodeId,
}

impl ConflictModel {
    pub(super) fn new(
        name: String,
        nodes: Vec<Node>,
        decision_makers: Vec<DecisionMaker>,
        options: Vec<ConflictOption>,
        start_node: NodeId,
    ) -> Self {
        Self {
            name,
            nodes,
            decision_makers,
            options,
            start_node,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn decision_makers(&self) -> &[DecisionMaker] {
        &self.decision_makers
    }

    pub fn decision_maker_index(&self, id: &DecisionMakerId) -> Option<usize> {
        self.decision_makers.iter().position(|dm| &dm.id == id)
    }

    pub fn options(&self) -> &[ConflictOption] {
        &self.options
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    pub fn transition_count(&self) -> usize {
        self.nodes.iter().map(|node| node.transitions.len()).sum()
    }
}

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("conflict has no states")]
    Empty,
    #[error("state at position {position} declares id {id}; ids must match their position")]
    NodeIdMismatch { position: usize, id: usize },
    #[error("state {node} has a move to unknown state {target}")]
    Resolution { node: usize, target: usize },
    #[error("state {node} has {found} option values, expected {expected}")]
    StateLength {
        node: usize,
        expected: usize,
        found: usize,
    },
    #[error("decision maker {decision_maker} controls unknown option {option}")]
    UnknownOption {
        decision_maker: String,
        option: usize,
    },
    #[error("start state {0} is not part of the conflict")]
    UnknownStartNode(usize),
}

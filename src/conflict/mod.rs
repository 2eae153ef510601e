mod error;
mod model;
mod normalize;
mod parse;
mod registry;
mod source;

#[cfg(test)]
pub(crate) mod fixtures;

pub use model::{ConflictModel, DecisionMakerId, Node, NodeId};
pub use registry::{ConflictRegistry, LoadOutcome, LoadStatus, Request, RequestToken};
pub use source::ConflictSource;

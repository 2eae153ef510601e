mod config;
mod graph;
mod graph_view;
mod highlight;
mod legend;
mod tree;
mod tree_view;
mod view;

pub use config::{ConnectorShape, GraphConfig, TreeConfig, TreeDepth, VisConfig};
pub use highlight::{Highlight, HighlightKey};
pub use legend::{CellKind, LegendCell, LegendMatrix, build_matrix};
pub use view::{LinkPath, ViewController, ViewKind, make_view};

mod kind;
mod model;
mod search;
mod seed;
mod snapshot;

pub use kind::NodeKind;
pub use model::{GraphModel, Link, LinkInsert, Neighbor, Node, NodeDetails, NodeId};
pub use search::search_titles;
pub use seed::default_graph;
pub use snapshot::{parse_snapshot, render_snapshot};

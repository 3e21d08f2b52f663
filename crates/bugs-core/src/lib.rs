//! `bugs-core`: the graph runtime (§2, components A and C–E) — value
//! arena, node taxonomy, graph, graph marks, and graph view. The
//! sampler framework and monitors that consume this runtime live in
//! their own crates; the textual front end that produces the parse
//! tree this crate's graph is built from is out of scope (§1).

pub mod graph;
pub mod marks;
pub mod node;
pub mod value_arena;
pub mod view;

pub use graph::Graph;
pub use marks::GraphMarks;
pub use node::{
    AggregateSpec, DevianceSpec, GatherSpec, LinkSpec, LogicalSpec, Mark, MixtureSpec, Node,
    NodeId, NodeKind, StochasticSpec,
};
pub use value_arena::{ArenaChain, ChainArena, ChainValues, ValueArena};
pub use view::GraphView;

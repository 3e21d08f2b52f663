pub mod dot;
pub mod eval;
pub mod factory;
pub mod format;
pub mod graphs;
pub mod node;
pub mod store;
pub mod trees;

pub use dot::ToDot;
pub use eval::{Eval, EvalMut};
pub use factory::*;
pub use format::*;
pub use graphs::{
    Direction, Graph, GraphAggregate, GraphChromosome, GraphCodec, GraphCrossover, GraphEvaluator,
    GraphIterator, GraphMutator, GraphNode, GraphNodeId, GraphReplacement, NeatDistance,
};
pub use node::{Node, NodeType};
pub use store::{NodeStore, NodeValue};
pub use trees::{
    HoistMutator, Tree, TreeChromosome, TreeCodec, TreeCrossover, TreeIterator, TreeMapper,
    TreeNode, TreeRewriter, TreeRewriterRule,
};

mod builder;
mod chromosome;
mod codec;
mod crossover;
mod eval;
mod iter;
mod mutator;
mod node;
mod tree;

pub use chromosome::TreeChromosome;
pub use codec::TreeCodec;
pub use crossover::TreeCrossover;
pub use iter::TreeIterator;
pub use mutator::HoistMutator;
pub use node::TreeNode;
pub use tree::Tree;

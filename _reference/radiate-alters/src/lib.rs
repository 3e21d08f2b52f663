pub mod crossovers;
#[allow(dead_code)]
mod expr;
pub mod mutators;

pub use expr::{Expr, ExprBuilder, IntoMut, MutFn, Pred, SelectExpr, dsl};

pub use crossovers::{
    BlendCrossover, EdgeRecombinationCrossover, IntermediateCrossover, MeanCrossover,
    MultiPointCrossover, PMXCrossover, ShuffleCrossover, SimulatedBinaryCrossover,
    UniformCrossover,
};
pub use mutators::{
    ArithmeticMutator, GaussianMutator, InversionMutator, JitterMutator, PolynomialMutator,
    ScrambleMutator, SwapMutator, UniformMutator,
};

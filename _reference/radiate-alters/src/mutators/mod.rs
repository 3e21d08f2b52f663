pub mod arithmetic;
pub mod gaussian;
pub mod invert;
pub mod jitter;
pub mod polynomial;
pub mod scramble;
pub mod swap;
pub mod uniform;

pub use arithmetic::ArithmeticMutator;
pub use gaussian::GaussianMutator;
pub use invert::InversionMutator;
pub use jitter::JitterMutator;
pub use polynomial::PolynomialMutator;
pub use scramble::ScrambleMutator;
pub use swap::SwapMutator;
pub use uniform::UniformMutator;

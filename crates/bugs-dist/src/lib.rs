//! `bugs-dist`: the built-in library of distributions, deterministic
//! functions, and link functions (§4.B). These are the stateless,
//! shared objects that `bugs-core` nodes hold a registry reference to;
//! loading additional user-defined modules is out of scope (§1).

pub mod distribution;
pub mod distributions;
pub mod function;
pub mod functions;
pub mod link;
pub mod registry;

pub use distribution::{Distribution, Params};
pub use distributions::{Categorical, Dirichlet, Gamma, MNorm, Multinomial, Norm, Sum};
pub use function::{Args, Function};
pub use functions::{Add, Divide, Logit, Multiply, Negate, Power, Subtract};
pub use link::Link;
pub use registry::{DistRegistry, FnRegistry};

mod arithmetic;
mod link_fns;

pub use arithmetic::{Add, Divide, Multiply, Negate, Power, Subtract};
pub use link_fns::Logit;

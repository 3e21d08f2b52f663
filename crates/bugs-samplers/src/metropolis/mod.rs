//! Metropolis / adaptive updaters (§4.H).

pub mod base;
pub mod dirichlet_cat;
pub mod mix_sampler;
pub mod real_dsum;
pub mod rw;

pub use base::MetropolisState;
pub use dirichlet_cat::{DSumMethod, DirichletCat};
pub use mix_sampler::MixSampler;
pub use real_dsum::RealDSum;
pub use rw::RWMetropolis;

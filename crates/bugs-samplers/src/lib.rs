//! `bugs-samplers`: the sampler framework (§4.F), conjugate updaters
//! (§4.G), Metropolis/adaptive updaters (§4.H), and the sampler-factory
//! pipeline that assigns one to every free stochastic node (§4.I).

pub mod conjugate;
pub mod factory;
pub mod framework;
pub mod metropolis;

pub use factory::{build_samplers, default_factories, ClaimedSampler, SamplerFactory};
pub use framework::{AdaptState, GlmSampler, ParallelSampler, SampleMethod, Sampler};

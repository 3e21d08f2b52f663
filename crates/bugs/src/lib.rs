//! `bugs`: the facade crate (§6) — model construction, the two-stage
//! `compile`/`initialize` finalization, and the runtime driver, built
//! on top of `bugs-core`'s graph runtime, `bugs-samplers`'s factory
//! pipeline, and `bugs-monitors`'s running statistics.

mod config;
mod model;
mod monitors;
mod simulation;

pub use config::{SimulationConfig, SimulationConfigBuilder};
pub use model::{CompiledModel, Model, ModelBuilder};
pub use monitors::MonitorKind;
pub use simulation::Simulation;

pub use bugs_core::GatherSpec;
pub use bugs_error::{BugsError, BugsResult, ErrorCode};
pub use bugs_utils::{SArray, Shape};

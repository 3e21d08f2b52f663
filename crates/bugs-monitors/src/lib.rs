//! `bugs-monitors`: running statistics over chains and iterations that
//! observe the value arena after each completed iteration (§4.J).

mod common;
mod density_pool;
mod klpd;
mod pd;
mod popt;
mod value;

pub use density_pool::{DensityKind, DensityPoolMean};
pub use klpd::KLPDMonitor;
pub use pd::PDMonitor;
pub use popt::PoptMonitor;
pub use value::{ValueMean, ValueTrace};

use bugs_core::{Graph, ValueArena};
use bugs_utils::SArray;

/// A running statistic observed after each completed iteration.
/// Pooling across chains/iterations is a per-monitor-kind decision
/// rather than a shared flag, since each kind composes its samples
/// differently (§4.J: "pooling flags declare whether values are pooled
/// across chains and whether values are pooled across iterations").
pub trait Monitor {
    /// Observes the current value arena and folds it into the running
    /// summary. Called once per iteration, after every sampler has run.
    fn update(&mut self, graph: &Graph, arena: &ValueArena);

    /// The monitor's current value for `chain`, one entry per
    /// monitored node (or node pair, for `PDMonitor`/`KLPDMonitor`).
    fn value(&self, chain: usize) -> Vec<f64>;

    /// The length of the vector returned by `value`.
    fn dim(&self) -> usize;

    /// Pre-allocates storage for `niter` further iterations, when the
    /// monitor keeps a full trace rather than a running scalar.
    fn reserve(&mut self, niter: usize);

    /// Dumps the monitor's accumulated state as a named `SArray`
    /// (§6): leading axis `"iteration"` when a trace is kept, else a
    /// `["chain", "node"]`-shaped running-mean snapshot.
    fn dump(&self) -> SArray;

    fn name(&self) -> &'static str;
}

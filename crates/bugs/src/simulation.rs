//! The runtime driver (§5, §6): allocates the value arena and RNGs,
//! claims samplers via the default factory pipeline, and runs the
//! fixed-order per-iteration update/monitor loop.

use std::collections::HashMap;
use std::ops::Range;

use rand::rngs::StdRng;
use rand::SeedableRng;

use bugs_core::{Graph, NodeId, NodeKind, ValueArena};
use bugs_dist::Distribution;
use bugs_error::{BugsError, BugsResult};
use bugs_monitors::{DensityKind, DensityPoolMean, Monitor, PDMonitor, PoptMonitor, ValueMean, ValueTrace};
use bugs_samplers::{build_samplers, default_factories, ClaimedSampler};
use bugs_utils::SArray;

use crate::config::SimulationConfig;
use crate::monitors::MonitorKind;

/// Writes every node's deterministic value from its parents', in
/// topological order, for every chain (mirrors
/// `bugs_core::GraphView::recompute_closure`'s per-node logic, applied
/// to the whole graph rather than one sampled set's closure, so
/// constant-only deterministic nodes are initialized too).
fn initialize_deterministic(graph: &Graph, arena: &mut ValueArena) {
    let order = graph.topological_order();
    for chain in 0..arena.chains() {
        let mut values = arena.chain_mut(chain);
        for &id in &order {
            let node = graph.get(id);
            match &node.kind {
                NodeKind::Constant | NodeKind::Stochastic(_) => continue,
                NodeKind::Deviance(spec) => {
                    let total: f64 = spec
                        .contributors
                        .iter()
                        .map(|&p| {
                            let parent_id = node.parents[p];
                            let parent = graph.get(parent_id);
                            match &parent.kind {
                                NodeKind::Stochastic(s) => {
                                    let x = values.read(parent_id);
                                    let parent_values: Vec<&[f64]> =
                                        parent.parents.iter().map(|&pp| values.read(pp)).collect();
                                    s.distribution.log_density_truncated(x, &parent_values, s.truncation.0, s.truncation.1)
                                }
                                _ => 0.0,
                            }
                        })
                        .sum();
                    values.write(id, &[-2.0 * total]);
                }
                _ => {
                    let parent_values: Vec<&[f64]> = node.parents.iter().map(|&p| values.read(p)).collect();
                    if let Some(v) = node.deterministic_sample(&parent_values) {
                        values.write(id, &v);
                    }
                }
            }
        }
    }
}

pub struct Simulation {
    graph: Graph,
    arena: ValueArena,
    samplers: Vec<ClaimedSampler>,
    rngs: Vec<StdRng>,
    config: SimulationConfig,
    monitors: HashMap<String, Box<dyn Monitor>>,
    iteration: usize,
}

impl Simulation {
    pub(crate) fn build(graph: Graph, data: HashMap<NodeId, SArray>, config: &SimulationConfig) -> BugsResult<Self> {
        let dims = graph.dims();
        let mut arena = ValueArena::new(config.chains, &dims);
        for (&id, values) in &data {
            for chain in 0..config.chains {
                arena.write(id, chain, values.values());
            }
        }
        initialize_deterministic(&graph, &mut arena);

        let samplers =
            build_samplers(&graph, &default_factories(), config.chains, &mut arena, config.adapt_tolerance)?;
        for sampler in &samplers {
            tracing::info!(sampler = sampler.kind(), "claimed sampler");
        }

        let rngs = (0..config.chains).map(|c| StdRng::seed_from_u64(config.seed.wrapping_add(c as u64))).collect();

        Ok(Self { graph, arena, samplers, rngs, config: config.clone(), monitors: HashMap::new(), iteration: 0 })
    }

    /// Runs `n` further iterations: one pass over every sampler (in
    /// claim order, one invocation per chain) followed by one pass over
    /// every attached monitor (§5).
    pub fn run(&mut self, n: usize) -> BugsResult<()> {
        for monitor in self.monitors.values_mut() {
            monitor.reserve(n);
        }
        for _ in 0..n {
            let span = tracing::trace_span!("iteration", iteration = self.iteration);
            let _enter = span.enter();
            for sampler in &mut self.samplers {
                sampler.update(&self.graph, &mut self.arena, &mut self.rngs)?;
            }
            for monitor in self.monitors.values_mut() {
                monitor.update(&self.graph, &self.arena);
            }
            self.iteration += 1;
            if self.iteration == self.config.adapt_iterations {
                for sampler in &mut self.samplers {
                    sampler.adapt_off();
                }
                let converged = self.samplers.iter_mut().all(|s| s.check_adaptation());
                if !converged {
                    tracing::warn!("one or more samplers did not reach their target acceptance rate");
                }
            }
        }
        Ok(())
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Current value of a node on one chain.
    pub fn node_value(&self, name: &str, chain: usize) -> BugsResult<Vec<f64>> {
        let id = self.graph.by_name(name).ok_or_else(|| {
            bugs_error::bugs_err!(DimensionMismatch, "Simulation::node_value", node: name.to_string(), "no such node")
        })?;
        Ok(self.arena.read(id, chain).to_vec())
    }

    /// Attaches a monitor named `label` over `node_names`, observing
    /// every iteration from now on (§6: attach by node name + range +
    /// type). `range`, when given, restricts a single-node `"trace"`/
    /// `"mean"` monitor to a flattened-index sub-range of that node
    /// (e.g. `y[1:10]`); ignored by the density-pooling kinds, which
    /// observe whole nodes.
    pub fn attach_monitor(
        &mut self,
        label: &str,
        node_names: &[&str],
        kind: &str,
        range: Option<Range<usize>>,
    ) -> BugsResult<()> {
        let kind = MonitorKind::parse(kind).ok_or_else(|| {
            bugs_error::bugs_err!(InvalidParameter, "Simulation::attach_monitor", "unknown monitor type '{kind}'")
        })?;

        let ids: Vec<NodeId> = node_names
            .iter()
            .map(|&n| {
                self.graph.by_name(n).ok_or_else(|| {
                    bugs_error::bugs_err!(DimensionMismatch, "Simulation::attach_monitor", node: n.to_string(), "no such node")
                })
            })
            .collect::<BugsResult<_>>()?;

        if kind.is_single_node() && ids.len() != 1 {
            return Err(bugs_error::bugs_err!(
                InvalidParameter,
                "Simulation::attach_monitor",
                "'trace'/'mean' monitors observe exactly one node"
            ));
        }

        let nchains = self.config.chains;
        let monitor: Box<dyn Monitor> = match kind {
            MonitorKind::Trace => {
                let node = ids[0];
                let node_width = self.graph.get(node).len();
                let (offset, width) = range.map_or((0, node_width), |r| (r.start, r.end - r.start));
                Box::new(ValueTrace::new_range(node, offset, width, nchains))
            }
            MonitorKind::Mean => {
                let node = ids[0];
                let node_width = self.graph.get(node).len();
                let (offset, width) = range.map_or((0, node_width), |r| (r.start, r.end - r.start));
                Box::new(ValueMean::new_range(node, offset, width, nchains))
            }
            MonitorKind::PD => Box::new(PDMonitor::new(ids, nchains)),
            MonitorKind::Popt => Box::new(PoptMonitor::new(ids, nchains, self.config.seed)),
            MonitorKind::Deviance => Box::new(DensityPoolMean::new(ids, DensityKind::Deviance, false, false, nchains)),
            MonitorKind::LogDensity => Box::new(DensityPoolMean::new(ids, DensityKind::LogDensity, false, false, nchains)),
        };
        self.monitors.insert(label.to_string(), monitor);
        Ok(())
    }

    /// Detaches a previously attached monitor; `true` if one existed.
    pub fn detach_monitor(&mut self, label: &str) -> bool {
        self.monitors.remove(label).is_some()
    }

    /// Extracts an attached monitor's accumulated result as an `SArray`
    /// (§6 "extract monitor results as SArrays").
    pub fn monitor_result(&self, label: &str) -> Option<SArray> {
        self.monitors.get(label).map(|m| m.dump())
    }
}

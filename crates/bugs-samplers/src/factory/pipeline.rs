//! Sampler-factory pipeline (§4.I): for each free stochastic node,
//! factories are tried in fixed priority order; the first whose
//! `can_sample` returns true claims the node (or, for block factories,
//! a larger set of nodes). A node left unclaimed after every factory
//! has been tried is a fatal diagnostic (§7, `BugsError::NoSampler`).

use std::collections::HashSet;

use bugs_core::{Graph, GraphView, Node, NodeId, NodeKind, ValueArena};
use bugs_error::{BugsError, BugsResult};
use rand::RngCore;

use crate::framework::{GlmSampler, Sampler};

/// One claimed unit of work: either a single-view sampler or a GLM
/// block (§4.F). Kept as an enum rather than a trait object because
/// `Sampler`/`GlmSampler` expose slightly different update signatures
/// and a pipeline caller needs to know which it got.
pub enum ClaimedSampler {
    Plain(Sampler),
    Glm(GlmSampler),
}

impl ClaimedSampler {
    /// A short label used by diagnostics and by end-to-end tests that
    /// assert on "sampler kind contains GLM" (§8, scenario 4).
    pub fn kind(&self) -> String {
        match self {
            ClaimedSampler::Plain(s) => s.name().to_string(),
            ClaimedSampler::Glm(s) => format!("GLM({})", s.name()),
        }
    }

    pub fn view(&self) -> &GraphView {
        match self {
            ClaimedSampler::Plain(s) => s.view(),
            ClaimedSampler::Glm(s) => s.view(),
        }
    }

    /// Drives every chain's method(s) in turn (§5: one sampler
    /// invocation per chain per iteration, in fixed order).
    pub fn update(&mut self, graph: &Graph, arena: &mut ValueArena, rngs: &mut [impl RngCore]) -> BugsResult<()> {
        match self {
            ClaimedSampler::Plain(s) => s.update(graph, arena, rngs),
            ClaimedSampler::Glm(s) => s.update(graph, arena, rngs),
        }
    }

    pub fn adapt_off(&mut self) {
        match self {
            ClaimedSampler::Plain(s) => s.adapt_off(),
            ClaimedSampler::Glm(s) => s.adapt_off(),
        }
    }

    pub fn check_adaptation(&mut self) -> bool {
        match self {
            ClaimedSampler::Plain(s) => s.check_adaptation(),
            ClaimedSampler::Glm(s) => s.check_adaptation(),
        }
    }
}

/// A sampler-construction strategy. `can_sample` is a pure structural
/// test; `make` is only ever called after `can_sample` has returned
/// true for `node` and must not fail.
pub trait SamplerFactory {
    fn name(&self) -> &'static str;

    fn can_sample(&self, node: NodeId, graph: &Graph) -> bool;

    /// Builds `nchains` independent per-chain methods around `node`
    /// (or, for block factories, around the set it pulls in along with
    /// `node`) and returns the claimed node set so the pipeline can
    /// remove all of them from the free list — not just `node`. `free`
    /// is every node still unclaimed at the time of this call, so a
    /// block factory can restrict its aggregation to nodes no earlier
    /// factory has already taken. `arena` holds every chain's
    /// zero-initialized starting values; a factory whose block carries
    /// a structural constraint (`RealDSum`, `DSumMethod`) must shift
    /// them into the feasible region here, before the first update.
    /// `adapt_tolerance` is `SimulationConfig::adapt_tolerance` (§9
    /// Open Question), forwarded so every adaptive method's
    /// `check_adaptation` is judged against the caller's configured
    /// value rather than a hardcoded default.
    fn make(
        &self,
        node: NodeId,
        graph: &Graph,
        nchains: usize,
        free: &HashSet<NodeId>,
        arena: &mut ValueArena,
        adapt_tolerance: f64,
    ) -> (ClaimedSampler, Vec<NodeId>);
}

fn is_free_stochastic_target(node: &Node) -> bool {
    matches!(&node.kind, NodeKind::Stochastic(s) if !s.observed)
}

/// Runs every free stochastic node in `graph` through `factories` in
/// order, claiming nodes as factories succeed. Returns one
/// `ClaimedSampler` per successful claim. Fails fast with
/// `BugsError::NoSampler` naming the first node no factory could claim
/// (§4.I, §8 scenario 6).
pub fn build_samplers(
    graph: &Graph,
    factories: &[Box<dyn SamplerFactory>],
    nchains: usize,
    arena: &mut ValueArena,
    adapt_tolerance: f64,
) -> BugsResult<Vec<ClaimedSampler>> {
    let mut free: HashSet<NodeId> =
        graph.ids().filter(|&id| is_free_stochastic_target(graph.get(id))).collect();

    let mut samplers = Vec::new();
    // Iterate over a fixed snapshot of the initial free set in graph
    // order so factory claims earlier in the run don't change which
    // node gets tried next out from under us; nodes already claimed by
    // a prior iteration's block factory are simply skipped.
    let order: Vec<NodeId> = graph.ids().filter(|id| free.contains(id)).collect();

    for node in order {
        if !free.contains(&node) {
            continue;
        }
        let Some(factory) = factories.iter().find(|f| f.can_sample(node, graph)) else {
            return Err(BugsError::NoSampler { node: graph.get(node).name.to_string().into() });
        };
        let (sampler, claimed) = factory.make(node, graph, nchains, &free, arena, adapt_tolerance);
        for c in claimed {
            free.remove(&c);
        }
        samplers.push(sampler);
    }

    Ok(samplers)
}

//! Metropolis/adaptive factories (§4.H, §4.I): the fallback layer
//! tried after every conjugate and GLM factory has passed on a node.
//! Sum-constrained blocks are discovered by locating an observed
//! `dsum` node and claiming its whole parent list; everything else
//! falls through to plain random-walk Metropolis.

use std::collections::HashSet;

use bugs_core::{Graph, GraphView, NodeId, NodeKind, ValueArena};

use crate::factory::pipeline::{ClaimedSampler, SamplerFactory};
use crate::framework::{SampleMethod, Sampler};
use crate::metropolis::{DSumMethod, DirichletCat, MixSampler, RWMetropolis, RealDSum};

/// Finds an observed `dsum` node that names `node` among its parents
/// and returns `(dsum_node, all_parents)` — the whole block a
/// `RealDSum`/`DSumMethod` update must claim together, not just `node`
/// itself (§4.H: "the constraint ties every summand together").
fn find_dsum_siblings(node: NodeId, graph: &Graph) -> Option<(NodeId, Vec<NodeId>)> {
    graph.ids().find_map(|id| {
        let n = graph.get(id);
        let NodeKind::Stochastic(spec) = &n.kind else { return None };
        if !spec.observed || spec.distribution.name() != "dsum" {
            return None;
        }
        if n.parents.contains(&node) {
            Some((id, n.parents.clone()))
        } else {
            None
        }
    })
}

/// Moves every chain's starting values for `block` onto the observed
/// `dsum_node`'s target sum, via `shift`, before the first iteration
/// (§4.H: "initialization shifts the user-provided starting values so
/// the constraint is satisfied") — without this, a zero-initialized
/// block violates its own constraint from the start.
fn shift_block_to_constraint(
    arena: &mut ValueArena,
    dsum_node: NodeId,
    block: &[NodeId],
    shift: impl Fn(&mut [f64], f64),
) {
    for chain in 0..arena.chains() {
        let target = arena.read(dsum_node, chain)[0];
        let mut current: Vec<f64> = block.iter().map(|&id| arena.read(id, chain)[0]).collect();
        shift(&mut current, target);
        for (&id, &v) in block.iter().zip(current.iter()) {
            arena.write(id, chain, &[v]);
        }
    }
}

fn make_block<M: SampleMethod + 'static>(
    graph: &Graph,
    block: Vec<NodeId>,
    nchains: usize,
    mut build: impl FnMut() -> M,
) -> (ClaimedSampler, Vec<NodeId>) {
    let view = GraphView::build(graph, block.clone());
    let methods: Vec<Box<dyn SampleMethod>> =
        (0..nchains).map(|_| Box::new(build()) as Box<dyn SampleMethod>).collect();
    (ClaimedSampler::Plain(Sampler::new(view, methods)), block)
}

/// Claims a `dsum`-constrained block of continuous summands.
pub struct RealDSumFactory;

impl SamplerFactory for RealDSumFactory {
    fn name(&self) -> &'static str {
        "RealDSum"
    }

    fn can_sample(&self, node: NodeId, graph: &Graph) -> bool {
        if graph.get(node).is_discrete_valued() {
            return false;
        }
        let Some((_, siblings)) = find_dsum_siblings(node, graph) else { return false };
        siblings.len() >= 2 && siblings.iter().all(|&s| !graph.get(s).is_discrete_valued())
    }

    fn make(
        &self,
        node: NodeId,
        graph: &Graph,
        nchains: usize,
        _free: &HashSet<NodeId>,
        arena: &mut ValueArena,
        adapt_tolerance: f64,
    ) -> (ClaimedSampler, Vec<NodeId>) {
        let (dsum_node, block) = find_dsum_siblings(node, graph).expect("can_sample guarantees a dsum parent");
        shift_block_to_constraint(arena, dsum_node, &block, RealDSum::shift_to_constraint);
        make_block(graph, block, nchains, || RealDSum::with_tolerance(0.5, adapt_tolerance))
    }
}

/// Claims a `dsum`-constrained block of integer summands.
pub struct DSumMethodFactory;

impl SamplerFactory for DSumMethodFactory {
    fn name(&self) -> &'static str {
        "DSumMethod"
    }

    fn can_sample(&self, node: NodeId, graph: &Graph) -> bool {
        if !graph.get(node).is_discrete_valued() {
            return false;
        }
        let Some((_, siblings)) = find_dsum_siblings(node, graph) else { return false };
        siblings.len() >= 2 && siblings.iter().all(|&s| graph.get(s).is_discrete_valued())
    }

    fn make(
        &self,
        node: NodeId,
        graph: &Graph,
        nchains: usize,
        _free: &HashSet<NodeId>,
        arena: &mut ValueArena,
        adapt_tolerance: f64,
    ) -> (ClaimedSampler, Vec<NodeId>) {
        let (dsum_node, block) = find_dsum_siblings(node, graph).expect("can_sample guarantees a dsum parent");
        shift_block_to_constraint(arena, dsum_node, &block, DSumMethod::shift_to_constraint);
        make_block(graph, block, nchains, || DSumMethod::with_tolerance(adapt_tolerance))
    }
}

/// Categorical assignment node with no Dirichlet conjugate path
/// (§4.H): resampled directly over its discrete support.
pub struct DirichletCatFactory;

impl SamplerFactory for DirichletCatFactory {
    fn name(&self) -> &'static str {
        "DirichletCat"
    }

    fn can_sample(&self, node: NodeId, graph: &Graph) -> bool {
        let n = graph.get(node);
        let NodeKind::Stochastic(spec) = &n.kind else { return false };
        !spec.observed && spec.distribution.name() == "dcat"
    }

    fn make(
        &self,
        node: NodeId,
        graph: &Graph,
        nchains: usize,
        _free: &HashSet<NodeId>,
        _arena: &mut ValueArena,
        _adapt_tolerance: f64,
    ) -> (ClaimedSampler, Vec<NodeId>) {
        let n = graph.get(node);
        let prob_parent = n.parents[0];
        let ncategories = graph.get(prob_parent).len().max(2);
        make_block(graph, vec![node], nchains, || DirichletCat::new(ncategories))
    }
}

/// A multi-component unobserved stochastic node with no simpler
/// updater available: tempered random-walk over the whole vector.
/// Open question (§9): the source gives no closed-form trigger for
/// when `MixSampler` beats plain `RWMetropolis` on a vector node, so
/// this factory is tried ahead of the universal fallback for any
/// node whose own dimension exceeds one.
pub struct MixSamplerFactory;

impl SamplerFactory for MixSamplerFactory {
    fn name(&self) -> &'static str {
        "MixSampler"
    }

    fn can_sample(&self, node: NodeId, graph: &Graph) -> bool {
        let n = graph.get(node);
        matches!(&n.kind, NodeKind::Stochastic(s) if !s.observed) && n.len() > 1
    }

    fn make(
        &self,
        node: NodeId,
        graph: &Graph,
        nchains: usize,
        _free: &HashSet<NodeId>,
        _arena: &mut ValueArena,
        adapt_tolerance: f64,
    ) -> (ClaimedSampler, Vec<NodeId>) {
        make_block(graph, vec![node], nchains, || MixSampler::with_tolerance(4, 0.1, 0.5, adapt_tolerance))
    }
}

/// The universal fallback (§4.I: "RWMetropolis is tried last and
/// always succeeds for any free stochastic node").
pub struct RWMetropolisFactory;

impl SamplerFactory for RWMetropolisFactory {
    fn name(&self) -> &'static str {
        "RWMetropolis"
    }

    fn can_sample(&self, node: NodeId, graph: &Graph) -> bool {
        matches!(&graph.get(node).kind, NodeKind::Stochastic(s) if !s.observed)
    }

    fn make(
        &self,
        node: NodeId,
        graph: &Graph,
        nchains: usize,
        _free: &HashSet<NodeId>,
        _arena: &mut ValueArena,
        adapt_tolerance: f64,
    ) -> (ClaimedSampler, Vec<NodeId>) {
        make_block(graph, vec![node], nchains, || RWMetropolis::with_tolerance(1.0, adapt_tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugs_core::{Node, StochasticSpec};
    use bugs_dist::{Norm, Sum};
    use std::sync::Arc;

    fn build_dsum_pair() -> (Graph, NodeId, NodeId, NodeId) {
        let mut g = Graph::new();
        let mk = |g: &mut Graph, name: &str| {
            g.add_node(Node::new(
                Arc::from(name),
                vec![1],
                vec![],
                NodeKind::Stochastic(StochasticSpec {
                    distribution: Arc::new(Norm),
                    truncation: (None, None),
                    observed: false,
                }),
                &[],
            ))
        };
        let x1 = mk(&mut g, "x1");
        let x2 = mk(&mut g, "x2");
        let y = g.add_node(Node::new(
            Arc::from("y"),
            vec![1],
            vec![x1, x2],
            NodeKind::Stochastic(StochasticSpec {
                distribution: Arc::new(Sum),
                truncation: (None, None),
                observed: true,
            }),
            &[false, false],
        ));
        (g, x1, x2, y)
    }

    #[test]
    fn real_dsum_claims_both_summands() {
        let (g, x1, x2, y) = build_dsum_pair();
        let factory = RealDSumFactory;
        assert!(factory.can_sample(x1, &g));
        let free: HashSet<NodeId> = [x1, x2].into_iter().collect();
        let dims = g.dims();
        let mut arena = ValueArena::new(1, &dims);
        arena.write(y, 0, &[2.0]);
        let (_sampler, claimed) = factory.make(x1, &g, 1, &free, &mut arena, 0.05);
        assert_eq!(claimed.len(), 2);
        assert!(claimed.contains(&x1) && claimed.contains(&x2));
        let sum: f64 = claimed.iter().map(|&id| arena.read(id, 0)[0]).sum();
        assert!((sum - 2.0).abs() < 1e-9, "starting values must already satisfy the constraint");
    }

    #[test]
    fn rw_metropolis_accepts_any_unobserved_stochastic_node() {
        let mut g = Graph::new();
        let mu = g.add_node(Node::new(
            Arc::from("mu"),
            vec![1],
            vec![],
            NodeKind::Stochastic(StochasticSpec {
                distribution: Arc::new(Norm),
                truncation: (None, None),
                observed: false,
            }),
            &[],
        ));
        assert!(RWMetropolisFactory.can_sample(mu, &g));
    }
}

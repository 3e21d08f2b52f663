//! `PDMonitor` (§4.J): requires ≥2 chains. Per iteration, computes a
//! symmetric divergence between chains' predictive densities at each
//! observed stochastic node, averaged over every unordered chain
//! pair, and accumulates a running mean per node.

use bugs_core::{Graph, NodeId, ValueArena};
use bugs_utils::{SArray, Shape};

use crate::common::node_log_density;
use crate::Monitor;

/// `(log p_ci(x) - log p_cj(x))^2`: a numerical proxy for a symmetric
/// divergence between two chains' predictive densities at the same
/// observed value, used for any distribution without a closed-form KL
/// (§4.J, §C.5: "other distributions fall back to PDMonitor's
/// numerical proxy").
fn numeric_proxy(graph: &Graph, node: NodeId, arena: &ValueArena, c1: usize, c2: usize) -> f64 {
    let ld1 = node_log_density(graph, node, arena, c1);
    let ld2 = node_log_density(graph, node, arena, c2);
    (ld1 - ld2).powi(2)
}

pub struct PDMonitor {
    nodes: Vec<NodeId>,
    nchains: usize,
    sums: Vec<f64>,
    count: u64,
    pub(crate) closed_form: bool,
}

impl PDMonitor {
    pub fn new(nodes: Vec<NodeId>, nchains: usize) -> Self {
        assert!(nchains >= 2, "PDMonitor requires at least two chains");
        assert!(!nodes.is_empty(), "a pD monitor needs at least one observed node");
        Self { nodes: nodes.clone(), nchains, sums: vec![0.0; nodes.len()], count: 0, closed_form: false }
    }

    fn pair_divergence(&self, graph: &Graph, node: NodeId, arena: &ValueArena, c1: usize, c2: usize) -> f64 {
        if self.closed_form {
            if let (Some((mu1, tau1)), Some((mu2, tau2))) = (
                crate::common::normal_mean_precision(graph, node, arena, c1),
                crate::common::normal_mean_precision(graph, node, arena, c2),
            ) {
                return crate::common::normal_symmetric_kl(mu1, tau1, mu2, tau2);
            }
        }
        numeric_proxy(graph, node, arena, c1, c2)
    }

    fn chain_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for c1 in 0..self.nchains {
            for c2 in (c1 + 1)..self.nchains {
                pairs.push((c1, c2));
            }
        }
        pairs
    }
}

impl Monitor for PDMonitor {
    fn update(&mut self, graph: &Graph, arena: &ValueArena) {
        let pairs = self.chain_pairs();
        for (i, &node) in self.nodes.iter().enumerate() {
            let total: f64 = pairs.iter().map(|&(c1, c2)| self.pair_divergence(graph, node, arena, c1, c2)).sum();
            self.sums[i] += total / pairs.len() as f64;
        }
        self.count += 1;
    }

    fn value(&self, _chain: usize) -> Vec<f64> {
        if self.count == 0 {
            return vec![0.0; self.nodes.len()];
        }
        self.sums.iter().map(|&s| s / self.count as f64).collect()
    }

    fn dim(&self) -> usize {
        self.nodes.len()
    }

    fn reserve(&mut self, _niter: usize) {}

    fn dump(&self) -> SArray {
        SArray::new(Shape::new(vec![self.nodes.len()]), self.value(0)).with_dim_names(vec!["node".to_string()])
    }

    fn name(&self) -> &'static str {
        "PDMonitor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugs_core::{Node, NodeKind, StochasticSpec};
    use bugs_dist::Norm;
    use std::sync::Arc;

    fn build_two_chain_model() -> (Graph, NodeId, ValueArena) {
        let mut g = Graph::new();
        let mu = g.add_node(Node::new(Arc::from("mu"), vec![1], vec![], NodeKind::Constant, &[]));
        let tau = g.add_node(Node::new(Arc::from("tau"), vec![1], vec![], NodeKind::Constant, &[]));
        let y = g.add_node(Node::new(
            Arc::from("y"),
            vec![1],
            vec![mu, tau],
            NodeKind::Stochastic(StochasticSpec {
                distribution: Arc::new(Norm),
                truncation: (None, None),
                observed: true,
            }),
            &[false, false],
        ));
        let mut arena = ValueArena::new(2, &g.dims());
        for chain in 0..2 {
            arena.write(mu, chain, &[0.0]);
            arena.write(tau, chain, &[1.0]);
            arena.write(y, chain, &[0.5]);
        }
        (g, y, arena)
    }

    #[test]
    fn identical_chains_have_zero_divergence() {
        let (g, y, arena) = build_two_chain_model();
        let mut monitor = PDMonitor::new(vec![y], 2);
        monitor.update(&g, &arena);
        assert!((monitor.value(0)[0]).abs() < 1e-12);
    }

    #[test]
    fn differing_chains_have_positive_divergence() {
        let (g, y, mut arena) = build_two_chain_model();
        arena.write(arena_mu(&g), 1, &[2.0]);
        let mut monitor = PDMonitor::new(vec![y], 2);
        monitor.update(&g, &arena);
        assert!(monitor.value(0)[0] > 0.0);
    }

    fn arena_mu(g: &Graph) -> NodeId {
        g.by_name("mu").unwrap()
    }
}

//! `KLPDMonitor` (§4.J, §C.5): `PDMonitor` specialized to use the
//! closed-form symmetric KL wherever the observed node is Normal,
//! falling back to `PDMonitor`'s numerical proxy otherwise.

use bugs_core::{Graph, NodeId, ValueArena};
use bugs_utils::SArray;

use crate::pd::PDMonitor;
use crate::Monitor;

pub struct KLPDMonitor {
    inner: PDMonitor,
}

impl KLPDMonitor {
    pub fn new(nodes: Vec<NodeId>, nchains: usize) -> Self {
        let mut inner = PDMonitor::new(nodes, nchains);
        inner.closed_form = true;
        Self { inner }
    }
}

impl Monitor for KLPDMonitor {
    fn update(&mut self, graph: &Graph, arena: &ValueArena) {
        self.inner.update(graph, arena);
    }

    fn value(&self, chain: usize) -> Vec<f64> {
        self.inner.value(chain)
    }

    fn dim(&self) -> usize {
        self.inner.dim()
    }

    fn reserve(&mut self, niter: usize) {
        self.inner.reserve(niter);
    }

    fn dump(&self) -> SArray {
        self.inner.dump()
    }

    fn name(&self) -> &'static str {
        "KLPDMonitor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugs_core::{Node, NodeKind, StochasticSpec};
    use bugs_dist::Norm;
    use std::sync::Arc;

    #[test]
    fn closed_form_kl_matches_hand_computed_value_for_normal_nodes() {
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
        arena.write(mu, 0, &[0.0]);
        arena.write(tau, 0, &[1.0]);
        arena.write(y, 0, &[0.0]);
        arena.write(mu, 1, &[1.0]);
        arena.write(tau, 1, &[1.0]);
        arena.write(y, 1, &[0.0]);

        let mut monitor = KLPDMonitor::new(vec![y], 2);
        monitor.update(&g, &arena);
        let expected = crate::common::normal_symmetric_kl(0.0, 1.0, 1.0, 1.0);
        assert!((monitor.value(0)[0] - expected).abs() < 1e-9);
    }
}

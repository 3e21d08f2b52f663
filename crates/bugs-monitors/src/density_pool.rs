//! `DensityPoolMean` (§4.J): running mean over chains and/or
//! iterations of log-density, density, or deviance for a fixed set of
//! nodes.

use bugs_core::{Graph, NodeId, ValueArena};
use bugs_utils::{SArray, Shape};

use crate::common::node_log_density;
use crate::Monitor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DensityKind {
    LogDensity,
    Density,
    Deviance,
}

impl DensityKind {
    fn transform(self, log_density: f64) -> f64 {
        match self {
            DensityKind::LogDensity => log_density,
            DensityKind::Density => log_density.exp(),
            DensityKind::Deviance => -2.0 * log_density,
        }
    }
}

/// Running mean over `nodes` of `kind`, pooled across chains if
/// `pool_chains`, and across iterations (a single running scalar per
/// chain-group) if `pool_iterations`; otherwise a full per-iteration
/// trace is kept (§4.J: "values pooled across chains"/"across
/// iterations").
pub struct DensityPoolMean {
    nodes: Vec<NodeId>,
    kind: DensityKind,
    pool_chains: bool,
    pool_iterations: bool,
    nchains: usize,
    // pool_iterations == true: one running (sum, count) slot per
    // reported chain group (length 1 if pool_chains, else nchains).
    sums: Vec<f64>,
    counts: Vec<u64>,
    // pool_iterations == false: full trace, outer = iteration, inner =
    // one entry per reported chain group.
    trace: Vec<Vec<f64>>,
}

impl DensityPoolMean {
    pub fn new(nodes: Vec<NodeId>, kind: DensityKind, pool_chains: bool, pool_iterations: bool, nchains: usize) -> Self {
        assert!(!nodes.is_empty(), "a density monitor needs at least one node");
        assert!(nchains >= 1);
        let groups = if pool_chains { 1 } else { nchains };
        Self {
            nodes,
            kind,
            pool_chains,
            pool_iterations,
            nchains,
            sums: vec![0.0; groups],
            counts: vec![0; groups],
            trace: Vec::new(),
        }
    }

    fn per_chain_total(&self, graph: &Graph, arena: &ValueArena, chain: usize) -> f64 {
        self.nodes
            .iter()
            .map(|&id| self.kind.transform(node_log_density(graph, id, arena, chain)))
            .sum()
    }
}

impl Monitor for DensityPoolMean {
    fn update(&mut self, graph: &Graph, arena: &ValueArena) {
        let per_chain: Vec<f64> = (0..self.nchains).map(|c| self.per_chain_total(graph, arena, c)).collect();

        if self.pool_iterations {
            if self.pool_chains {
                let total: f64 = per_chain.iter().sum();
                self.sums[0] += total;
                self.counts[0] += self.nchains as u64;
            } else {
                for (c, &v) in per_chain.iter().enumerate() {
                    self.sums[c] += v;
                    self.counts[c] += 1;
                }
            }
        } else {
            let row = if self.pool_chains {
                vec![per_chain.iter().sum::<f64>() / self.nchains as f64]
            } else {
                per_chain
            };
            self.trace.push(row);
        }
    }

    fn value(&self, chain: usize) -> Vec<f64> {
        if self.pool_iterations {
            let slot = if self.pool_chains { 0 } else { chain };
            let mean = if self.counts[slot] == 0 { 0.0 } else { self.sums[slot] / self.counts[slot] as f64 };
            vec![mean]
        } else {
            let slot = if self.pool_chains { 0 } else { chain };
            vec![self.trace.last().map_or(0.0, |row| row[slot])]
        }
    }

    fn dim(&self) -> usize {
        1
    }

    fn reserve(&mut self, niter: usize) {
        if !self.pool_iterations {
            self.trace.reserve(niter);
        }
    }

    fn dump(&self) -> SArray {
        if self.pool_iterations {
            let groups = self.sums.len();
            let values: Vec<f64> = (0..groups)
                .map(|g| if self.counts[g] == 0 { 0.0 } else { self.sums[g] / self.counts[g] as f64 })
                .collect();
            SArray::new(Shape::new(vec![groups]), values)
                .with_dim_names(vec![if self.pool_chains { "pooled".to_string() } else { "chain".to_string() }])
        } else {
            let niter = self.trace.len();
            let groups = if self.pool_chains { 1 } else { self.nchains };
            let mut values = Vec::with_capacity(niter * groups);
            for row in &self.trace {
                values.extend_from_slice(row);
            }
            SArray::new(Shape::new(vec![niter, groups]), values)
                .with_dim_names(vec!["iteration".to_string(), "chain".to_string()])
        }
    }

    fn name(&self) -> &'static str {
        "DensityPoolMean"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugs_core::{Node, NodeKind, StochasticSpec};
    use bugs_dist::{Distribution, Norm};
    use std::sync::Arc;

    fn build() -> (Graph, NodeId) {
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
        (g, y)
    }

    #[test]
    fn pooled_deviance_matches_hand_computed_value() {
        let (g, y) = build();
        let mut arena = ValueArena::new(1, &g.dims());
        arena.write(g.by_name("mu").unwrap(), 0, &[0.0]);
        arena.write(g.by_name("tau").unwrap(), 0, &[1.0]);
        arena.write(y, 0, &[0.5]);

        let mut monitor = DensityPoolMean::new(vec![y], DensityKind::Deviance, true, true, 1);
        monitor.update(&g, &arena);
        monitor.update(&g, &arena);

        let ld = Norm.log_density(&[0.5], &[&[0.0], &[1.0]]);
        let expected = -2.0 * ld;
        assert!((monitor.value(0)[0] - expected).abs() < 1e-9);
    }
}

//! Raw node-value monitors (§6): `"trace"` (full per-iteration history)
//! and `"mean"` (running mean), as opposed to the density-based
//! monitors in the rest of this crate which observe log-density rather
//! than the node's own value.

use bugs_core::{Graph, NodeId, ValueArena};
use bugs_utils::{SArray, Shape};

use crate::Monitor;

/// Records every iteration's value of one node (or a flattened-index
/// sub-range of it, e.g. `y[1:10]`), across all chains.
pub struct ValueTrace {
    node: NodeId,
    nchains: usize,
    offset: usize,
    width: usize,
    trace: Vec<Vec<Vec<f64>>>,
}

impl ValueTrace {
    pub fn new(node: NodeId, width: usize, nchains: usize) -> Self {
        Self::new_range(node, 0, width, nchains)
    }

    pub fn new_range(node: NodeId, offset: usize, width: usize, nchains: usize) -> Self {
        assert!(width >= 1);
        Self { node, nchains, offset, width, trace: Vec::new() }
    }
}

impl Monitor for ValueTrace {
    fn update(&mut self, _graph: &Graph, arena: &ValueArena) {
        let row: Vec<Vec<f64>> = (0..self.nchains)
            .map(|c| arena.read(self.node, c)[self.offset..self.offset + self.width].to_vec())
            .collect();
        self.trace.push(row);
    }

    fn value(&self, chain: usize) -> Vec<f64> {
        self.trace.last().map(|row| row[chain].clone()).unwrap_or_else(|| vec![0.0; self.width])
    }

    fn dim(&self) -> usize {
        self.width
    }

    fn reserve(&mut self, niter: usize) {
        self.trace.reserve(niter);
    }

    fn dump(&self) -> SArray {
        let niter = self.trace.len();
        let mut values = Vec::with_capacity(niter * self.nchains * self.width);
        for row in &self.trace {
            for chain_vals in row {
                values.extend_from_slice(chain_vals);
            }
        }
        SArray::new(Shape::new(vec![niter, self.nchains, self.width]), values)
            .with_dim_names(vec!["iteration".to_string(), "chain".to_string(), "component".to_string()])
    }

    fn name(&self) -> &'static str {
        "ValueTrace"
    }
}

/// Running mean of one node's value (or a flattened-index sub-range of
/// it), per chain.
pub struct ValueMean {
    node: NodeId,
    nchains: usize,
    offset: usize,
    width: usize,
    sums: Vec<Vec<f64>>,
    count: u64,
}

impl ValueMean {
    pub fn new(node: NodeId, width: usize, nchains: usize) -> Self {
        Self::new_range(node, 0, width, nchains)
    }

    pub fn new_range(node: NodeId, offset: usize, width: usize, nchains: usize) -> Self {
        assert!(width >= 1);
        Self { node, nchains, offset, width, sums: vec![vec![0.0; width]; nchains], count: 0 }
    }
}

impl Monitor for ValueMean {
    fn update(&mut self, _graph: &Graph, arena: &ValueArena) {
        for (chain, sum) in self.sums.iter_mut().enumerate() {
            let vals = &arena.read(self.node, chain)[self.offset..self.offset + self.width];
            for (s, v) in sum.iter_mut().zip(vals) {
                *s += v;
            }
        }
        self.count += 1;
    }

    fn value(&self, chain: usize) -> Vec<f64> {
        if self.count == 0 {
            return vec![0.0; self.width];
        }
        self.sums[chain].iter().map(|&s| s / self.count as f64).collect()
    }

    fn dim(&self) -> usize {
        self.width
    }

    fn reserve(&mut self, _niter: usize) {}

    fn dump(&self) -> SArray {
        let mut values = Vec::with_capacity(self.nchains * self.width);
        for chain in 0..self.nchains {
            values.extend(self.value(chain));
        }
        SArray::new(Shape::new(vec![self.nchains, self.width]), values)
            .with_dim_names(vec!["chain".to_string(), "component".to_string()])
    }

    fn name(&self) -> &'static str {
        "ValueMean"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugs_core::{Node, NodeKind};
    use std::sync::Arc;

    fn build() -> (Graph, NodeId) {
        let mut g = Graph::new();
        let mu = g.add_node(Node::new(Arc::from("mu"), vec![1], vec![], NodeKind::Constant, &[]));
        (g, mu)
    }

    #[test]
    fn trace_records_one_row_per_update() {
        let (g, mu) = build();
        let mut arena = ValueArena::new(1, &g.dims());
        let mut monitor = ValueTrace::new(mu, 1, 1);
        arena.write(mu, 0, &[1.0]);
        monitor.update(&g, &arena);
        arena.write(mu, 0, &[2.0]);
        monitor.update(&g, &arena);
        assert_eq!(monitor.value(0), vec![2.0]);
        assert_eq!(monitor.dump().shape().dims(), &[2, 1, 1]);
    }

    #[test]
    fn mean_tracks_running_average() {
        let (g, mu) = build();
        let mut arena = ValueArena::new(1, &g.dims());
        let mut monitor = ValueMean::new(mu, 1, 1);
        for v in [1.0, 2.0, 3.0] {
            arena.write(mu, 0, &[v]);
            monitor.update(&g, &arena);
        }
        assert!((monitor.value(0)[0] - 2.0).abs() < 1e-12);
    }
}

//! `GraphMarks` (§4.D): the reusable ternary-coloring utility behind
//! linearity/scale detection. A forward pass from a seed set: seed
//! nodes start `True`; each downstream deterministic node computes its
//! own mark from its parents' marks via its own `is_linear`/`is_scale`
//! test; stochastic nodes stop propagation; `False` is absorbing.
//! Scoped to one [`Graph`]; callers clear and reuse rather than
//! reallocate across repeated checks.

use std::collections::HashMap;

use crate::graph::Graph;
use crate::node::{Mark, NodeId};

pub struct GraphMarks {
    marks: HashMap<NodeId, Mark>,
}

impl Default for GraphMarks {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphMarks {
    pub fn new() -> Self {
        Self { marks: HashMap::new() }
    }

    pub fn get(&self, node: NodeId) -> Mark {
        self.marks.get(&node).copied().unwrap_or(Mark::Null)
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }

    /// Runs the linearity coloring pass for `scale_only = false`, or
    /// the scale coloring pass for `scale_only = true`, seeded at
    /// `seed`, with `fixed` forwarded to every node's structural test
    /// (§4.G, ConjugateNormal's cached-vs-recomputed coefficient
    /// decision uses `fixed = true`).
    pub fn propagate(&mut self, graph: &Graph, seed: &[NodeId], fixed: bool, scale_only: bool) {
        self.clear();
        for &s in seed {
            self.marks.insert(s, Mark::True);
        }
        for id in graph.topological_order() {
            if self.marks.contains_key(&id) {
                continue;
            }
            let node = graph.get(id);
            if node.kind.is_stochastic() || matches!(node.kind, crate::node::NodeKind::Constant) {
                continue;
            }
            let parent_marks: Vec<Mark> = node.parents.iter().map(|&p| self.get(p)).collect();
            if parent_marks.iter().all(|m| matches!(m, Mark::Null)) {
                continue;
            }
            if parent_marks.iter().any(|m| matches!(m, Mark::False)) {
                self.marks.insert(id, Mark::False);
                continue;
            }
            let mask: Vec<bool> = parent_marks.iter().map(|m| m.is_true()).collect();
            let ok = if scale_only {
                node.is_scale(&mask, fixed)
            } else {
                node.is_linear(&mask, fixed)
            };
            self.marks.insert(id, if ok { Mark::True } else { Mark::False });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::node::{AggregateSpec, Node, NodeKind};
    use std::sync::Arc;

    #[test]
    fn seed_propagates_true_through_linear_aggregate() {
        let mut g = Graph::new();
        let x = g.add_node(Node::new(Arc::from("x"), vec![1], vec![], NodeKind::Constant, &[]));
        let agg = g.add_node(Node::new(
            Arc::from("agg"),
            vec![1],
            vec![x],
            NodeKind::Aggregate(AggregateSpec { gather: vec![(0, 0)] }),
            &[false],
        ));

        let mut marks = GraphMarks::new();
        marks.propagate(&g, &[x], false, false);
        assert_eq!(marks.get(agg), Mark::True);
    }
}

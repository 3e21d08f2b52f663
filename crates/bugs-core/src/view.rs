//! Graph view (§4.E): the `(sampled, deterministic_closure,
//! stochastic_children)` triple induced by a stochastic node set `S`
//! in a graph `G` — the smallest self-contained slice needed to
//! evaluate a conditional density.

use std::collections::{HashSet, VecDeque};

use crate::graph::Graph;
use crate::node::{NodeId, NodeKind};
use crate::value_arena::ChainValues;

pub struct GraphView {
    sampled: Vec<NodeId>,
    closure: Vec<NodeId>,
    stochastic_children: Vec<NodeId>,
    member_set: HashSet<NodeId>,
}

impl GraphView {
    /// Builds the view for `sampled` within `graph`: a breadth-first
    /// walk over child edges (computed fresh, since [`Graph`] only
    /// stores parent links) collecting deterministic descendants,
    /// stopping at stochastic nodes, then sorting the closure into
    /// the graph's global topological order.
    pub fn build(graph: &Graph, sampled: Vec<NodeId>) -> Self {
        let sampled_set: HashSet<NodeId> = sampled.iter().copied().collect();

        let mut children: std::collections::HashMap<NodeId, Vec<NodeId>> = Default::default();
        for id in graph.ids() {
            for &parent in &graph.get(id).parents {
                children.entry(parent).or_default().push(id);
            }
        }

        let mut closure_set: HashSet<NodeId> = HashSet::new();
        let mut stochastic_children = Vec::new();
        let mut stochastic_seen: HashSet<NodeId> = HashSet::new();
        let mut queue: VecDeque<NodeId> = sampled.iter().copied().collect();

        while let Some(cur) = queue.pop_front() {
            let Some(kids) = children.get(&cur) else { continue };
            for &child in kids {
                if sampled_set.contains(&child) {
                    continue;
                }
                if graph.get(child).kind.is_stochastic() {
                    if stochastic_seen.insert(child) {
                        stochastic_children.push(child);
                    }
                } else if closure_set.insert(child) {
                    queue.push_back(child);
                }
            }
        }

        let closure: Vec<NodeId> = graph
            .topological_order()
            .into_iter()
            .filter(|id| closure_set.contains(id))
            .collect();

        let mut member_set = sampled_set;
        member_set.extend(closure.iter().copied());

        Self { sampled, closure, stochastic_children, member_set }
    }

    /// Writes `values` into `sampled` (in declared order) and
    /// re-evaluates the deterministic closure.
    pub fn set_value(&self, graph: &Graph, values: &mut impl ChainValues, new_values: &[Vec<f64>]) {
        assert_eq!(new_values.len(), self.sampled.len(), "one value vector per sampled node");
        for (&id, val) in self.sampled.iter().zip(new_values) {
            values.write(id, val);
        }
        self.recompute_closure(graph, values);
    }

    pub fn recompute_closure(&self, graph: &Graph, values: &mut impl ChainValues) {
        for &id in &self.closure {
            let node = graph.get(id);
            if let NodeKind::Deviance(spec) = &node.kind {
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
                                s.distribution.log_density_truncated(
                                    x,
                                    &parent_values,
                                    s.truncation.0,
                                    s.truncation.1,
                                )
                            }
                            _ => 0.0,
                        }
                    })
                    .sum();
                values.write(id, &[-2.0 * total]);
                continue;
            }
            let new_value = {
                let parent_values: Vec<&[f64]> =
                    node.parents.iter().map(|&p| values.read(p)).collect();
                node.deterministic_sample(&parent_values)
            };
            if let Some(v) = new_value {
                values.write(id, &v);
            }
        }
    }

    pub fn get_value(&self, values: &impl ChainValues) -> Vec<Vec<f64>> {
        self.sampled.iter().map(|&id| values.read(id).to_vec()).collect()
    }

    /// Sum of log-density over `S` and its stochastic children,
    /// evaluated at current arena values (§4.E).
    pub fn log_full_conditional(&self, graph: &Graph, values: &impl ChainValues) -> f64 {
        self.sampled
            .iter()
            .chain(self.stochastic_children.iter())
            .map(|&id| {
                let node = graph.get(id);
                match &node.kind {
                    NodeKind::Stochastic(spec) => {
                        let x = values.read(id);
                        let parent_values: Vec<&[f64]> =
                            node.parents.iter().map(|&p| values.read(p)).collect();
                        spec.distribution.log_density_truncated(
                            x,
                            &parent_values,
                            spec.truncation.0,
                            spec.truncation.1,
                        )
                    }
                    _ => 0.0,
                }
            })
            .sum()
    }

    pub fn is_dependent(&self, node: NodeId) -> bool {
        self.member_set.contains(&node)
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.sampled
    }

    pub fn deterministic_children(&self) -> &[NodeId] {
        &self.closure
    }

    pub fn stochastic_children(&self) -> &[NodeId] {
        &self.stochastic_children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{AggregateSpec, Node, NodeKind, StochasticSpec};
    use crate::value_arena::ValueArena;
    use bugs_dist::Norm;
    use std::sync::Arc;

    fn build_chain_model() -> (Graph, NodeId, NodeId, NodeId) {
        let mut g = Graph::new();
        let tau = g.add_node(Node::new(Arc::from("tau"), vec![1], vec![], NodeKind::Constant, &[]));
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
        let agg = g.add_node(Node::new(
            Arc::from("agg"),
            vec![1],
            vec![mu],
            NodeKind::Aggregate(AggregateSpec { gather: vec![(0, 0)] }),
            &[false],
        ));
        let y = g.add_node(Node::new(
            Arc::from("y"),
            vec![1],
            vec![agg, tau],
            NodeKind::Stochastic(StochasticSpec {
                distribution: Arc::new(Norm),
                truncation: (None, None),
                observed: true,
            }),
            &[false, false],
        ));
        (g, mu, agg, y)
    }

    #[test]
    fn closure_contains_deterministic_descendants_and_stops_at_stochastic_children() {
        let (g, mu, agg, y) = build_chain_model();
        let view = GraphView::build(&g, vec![mu]);
        assert_eq!(view.deterministic_children(), &[agg]);
        assert_eq!(view.stochastic_children(), &[y]);
        assert!(view.is_dependent(agg));
        assert!(!view.is_dependent(y));
    }

    #[test]
    fn set_value_recomputes_closure_and_full_conditional_is_finite() {
        let (g, mu, _agg, _y) = build_chain_model();
        let dims = g.dims();
        let mut arena = ValueArena::new(1, &dims);
        arena.write(g.by_name("tau").unwrap(), 0, &[1.0]);
        arena.write(g.by_name("y").unwrap(), 0, &[0.5]);

        let view = GraphView::build(&g, vec![mu]);
        let mut chain = arena.chain_mut(0);
        view.set_value(&g, &mut chain, &[vec![0.2]]);
        drop(chain);

        assert_eq!(arena.read(g.by_name("agg").unwrap(), 0), &[0.2]);
        let lfc = view.log_full_conditional(&g, &arena.chain_mut(0));
        assert!(lfc.is_finite());
    }
}

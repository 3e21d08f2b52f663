//! GLM block factory (§4.I): greedily aggregates `ConjugateNormal`-
//! eligible candidates that share a stochastic child into one joint
//! linear block, largest first, rejecting any addition that fails a
//! fresh joint linearity check over the whole block.

use std::collections::HashSet;

use bugs_core::{Graph, GraphMarks, GraphView, NodeId, NodeKind, ValueArena};

use crate::conjugate::ConjugateNormal;
use crate::factory::pipeline::{ClaimedSampler, SamplerFactory};
use crate::framework::{GlmSampler, SampleMethod};

/// Generalizes `ConjugateNormal::can_sample` to a simultaneous block
/// of Normal-prior targets: every stochastic descendant of any block
/// member must stay Normal with precision independent of the whole
/// block and a mean linear in it, marked jointly (not one at a time).
fn block_is_jointly_linear(block: &[NodeId], graph: &Graph) -> bool {
    for &t in block {
        let node = graph.get(t);
        let NodeKind::Stochastic(spec) = &node.kind else { return false };
        if spec.distribution.name() != "dnorm" && spec.distribution.name() != "dmnorm" {
            return false;
        }
    }

    let view = GraphView::build(graph, block.to_vec());
    let mut marks = GraphMarks::new();
    marks.propagate(graph, block, true, false);

    for &child_id in view.stochastic_children() {
        let child = graph.get(child_id);
        let NodeKind::Stochastic(cspec) = &child.kind else { return false };
        if cspec.distribution.name() != "dnorm" && cspec.distribution.name() != "dmnorm" {
            return false;
        }
        let mu_parent = child.parents[0];
        let tau_parent = child.parents[1];
        if block.contains(&tau_parent) || view.is_dependent(tau_parent) {
            return false;
        }
        if !block.contains(&mu_parent) && !marks.get(mu_parent).is_true() {
            return false;
        }
    }
    true
}

fn stochastic_child_count(node: NodeId, graph: &Graph) -> usize {
    GraphView::build(graph, vec![node]).stochastic_children().len()
}

fn shares_a_stochastic_child(a: NodeId, b: NodeId, graph: &Graph) -> bool {
    let children_a: HashSet<NodeId> =
        GraphView::build(graph, vec![a]).stochastic_children().iter().copied().collect();
    GraphView::build(graph, vec![b]).stochastic_children().iter().any(|c| children_a.contains(c))
}

pub struct GlmFactory;

impl SamplerFactory for GlmFactory {
    fn name(&self) -> &'static str {
        "GLM"
    }

    fn can_sample(&self, node: NodeId, graph: &Graph) -> bool {
        ConjugateNormal::can_sample(node, graph)
    }

    fn make(
        &self,
        node: NodeId,
        graph: &Graph,
        nchains: usize,
        free: &HashSet<NodeId>,
        _arena: &mut ValueArena,
        _adapt_tolerance: f64,
    ) -> (ClaimedSampler, Vec<NodeId>) {
        let mut candidates: Vec<NodeId> = free
            .iter()
            .copied()
            .filter(|&c| {
                c != node
                    && ConjugateNormal::can_sample(c, graph)
                    && shares_a_stochastic_child(node, c, graph)
            })
            .collect();
        // §4.I: "tried in decreasing order of stochastic-child count so
        // that larger blocks form first."
        candidates.sort_by_key(|&c| std::cmp::Reverse(stochastic_child_count(c, graph)));

        let mut block = vec![node];
        for candidate in candidates {
            let mut trial = block.clone();
            trial.push(candidate);
            if block_is_jointly_linear(&trial, graph) {
                block = trial;
            }
        }

        if block.len() == 1 {
            let view = GraphView::build(graph, vec![node]);
            let methods: Vec<Box<dyn SampleMethod>> =
                (0..nchains).map(|_| Box::new(ConjugateNormal::new(node, graph)) as Box<dyn SampleMethod>).collect();
            return (ClaimedSampler::Glm(GlmSampler::new(view, methods, Vec::new())), block);
        }

        // A single `GlmSampler` sweeps the block by updating each
        // member's exact conditional draw in turn — already-accepted
        // siblings are read back by `aux`'s own view when each member's
        // `ConjugateNormal` reads its precision/mean parents off the
        // shared arena, so this is a valid Gibbs sweep over the block
        // even though no joint precision matrix is ever formed.
        let primary_view = GraphView::build(graph, vec![block[0]]);
        let primary: Vec<Box<dyn SampleMethod>> =
            (0..nchains).map(|_| Box::new(ConjugateNormal::new(block[0], graph)) as Box<dyn SampleMethod>).collect();
        let aux = block[1..]
            .iter()
            .map(|&member| {
                let view = GraphView::build(graph, vec![member]);
                let methods: Vec<Box<dyn SampleMethod>> = (0..nchains)
                    .map(|_| Box::new(ConjugateNormal::new(member, graph)) as Box<dyn SampleMethod>)
                    .collect();
                (view, methods)
            })
            .collect();

        (ClaimedSampler::Glm(GlmSampler::new(primary_view, primary, aux)), block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugs_core::{Node, StochasticSpec};
    use bugs_dist::functions::{Add, Multiply};
    use bugs_dist::Norm;
    use std::sync::Arc;

    fn build_regression(n: usize) -> (Graph, NodeId, NodeId) {
        let mut g = Graph::new();
        let zero = g.add_node(Node::new(Arc::from("zero"), vec![1], vec![], NodeKind::Constant, &[]));
        let prec = g.add_node(Node::new(Arc::from("prec"), vec![1], vec![], NodeKind::Constant, &[]));
        let alpha = g.add_node(Node::new(
            Arc::from("alpha"),
            vec![1],
            vec![zero, prec],
            NodeKind::Stochastic(StochasticSpec {
                distribution: Arc::new(Norm),
                truncation: (None, None),
                observed: false,
            }),
            &[false, false],
        ));
        let beta = g.add_node(Node::new(
            Arc::from("beta"),
            vec![1],
            vec![zero, prec],
            NodeKind::Stochastic(StochasticSpec {
                distribution: Arc::new(Norm),
                truncation: (None, None),
                observed: false,
            }),
            &[false, false],
        ));
        let tau_y = g.add_node(Node::new(Arc::from("tau_y"), vec![1], vec![], NodeKind::Constant, &[]));
        let mut last_y = alpha;
        for i in 0..n {
            let x = g.add_node(Node::new(
                Arc::from(format!("x{i}").as_str()),
                vec![1],
                vec![],
                NodeKind::Constant,
                &[],
            ));
            let bx = g.add_node(Node::new(
                Arc::from(format!("bx{i}").as_str()),
                vec![1],
                vec![beta, x],
                NodeKind::Logical(bugs_core::LogicalSpec { function: Arc::new(Multiply) }),
                &[false, false],
            ));
            let mean = g.add_node(Node::new(
                Arc::from(format!("mean{i}").as_str()),
                vec![1],
                vec![alpha, bx],
                NodeKind::Logical(bugs_core::LogicalSpec { function: Arc::new(Add) }),
                &[false, false],
            ));
            last_y = g.add_node(Node::new(
                Arc::from(format!("y{i}").as_str()),
                vec![1],
                vec![mean, tau_y],
                NodeKind::Stochastic(StochasticSpec {
                    distribution: Arc::new(Norm),
                    truncation: (None, None),
                    observed: true,
                }),
                &[false, false],
            ));
        }
        let _ = last_y;
        (g, alpha, beta)
    }

    #[test]
    fn aggregates_alpha_and_beta_into_one_glm_block() {
        let (g, alpha, beta) = build_regression(10);
        let factory = GlmFactory;
        assert!(factory.can_sample(alpha, &g));
        let free: HashSet<NodeId> = [alpha, beta].into_iter().collect();
        let dims = g.dims();
        let mut arena = ValueArena::new(1, &dims);
        let (sampler, claimed) = factory.make(alpha, &g, 1, &free, &mut arena, 0.05);
        assert_eq!(claimed.len(), 2);
        assert!(claimed.contains(&alpha));
        assert!(claimed.contains(&beta));
        assert!(sampler.kind().contains("GLM"));
    }
}

//! `TruncatedGamma` (§4.G): closed-form Gamma-posterior update for a
//! Gamma-prior rate target whose Normal children's precision is a
//! pure multiplicative (zero-intercept) transform of the target — the
//! "power-transform pattern" its `can_sample` detects — with the mean
//! held independent of the target.

use rand::Rng;

use bugs_core::{ChainValues, Graph, GraphView, NodeId, NodeKind};
use bugs_dist::Distribution;
use bugs_error::BugsResult;

use crate::framework::SampleMethod;

struct ScaledChild {
    child: NodeId,
    mu_parent: NodeId,
}

pub struct TruncatedGamma {
    target: NodeId,
    view: GraphView,
    children: Vec<ScaledChild>,
}

impl TruncatedGamma {
    /// §4.G: applies when the target has a Gamma prior and every
    /// stochastic descendant is (multivariate) Normal whose precision
    /// is a pure scale transform of the target — `Node::is_scale` with
    /// `fixed = true` — while its mean does not depend on the target.
    pub fn can_sample(target: NodeId, graph: &Graph) -> bool {
        let node = graph.get(target);
        let NodeKind::Stochastic(spec) = &node.kind else { return false };
        if spec.distribution.name() != "dgamma" {
            return false;
        }
        let view = GraphView::build(graph, vec![target]);
        if view.stochastic_children().is_empty() {
            return false;
        }

        for &child_id in view.stochastic_children() {
            let child = graph.get(child_id);
            let NodeKind::Stochastic(cspec) = &child.kind else { return false };
            if cspec.distribution.name() != "dnorm" && cspec.distribution.name() != "dmnorm" {
                return false;
            }
            let mu_parent = child.parents[0];
            let tau_parent = child.parents[1];
            if mu_parent == target || view.is_dependent(mu_parent) {
                return false;
            }
            if !scale_path_exists(graph, tau_parent, target) {
                return false;
            }
        }
        true
    }

    pub fn new(target: NodeId, graph: &Graph) -> Self {
        assert!(Self::can_sample(target, graph), "TruncatedGamma requires can_sample");
        let view = GraphView::build(graph, vec![target]);

        let children = view
            .stochastic_children()
            .iter()
            .map(|&child_id| {
                let child = graph.get(child_id);
                ScaledChild { child: child_id, mu_parent: child.parents[0] }
            })
            .collect();

        Self { target, view, children }
    }
}

fn scale_path_exists(graph: &Graph, node: NodeId, target: NodeId) -> bool {
    if node == target {
        return true;
    }
    let n = graph.get(node);
    match &n.kind {
        NodeKind::Logical(_) | NodeKind::Link(_) | NodeKind::Aggregate(_) => {
            n.parents.iter().any(|&p| scale_path_exists(graph, p, target))
                && {
                    let mask: Vec<bool> = n.parents.iter().map(|&p| p == target || scale_path_exists(graph, p, target)).collect();
                    n.is_scale(&mask, true)
                }
        }
        _ => false,
    }
}

fn probe_coefficient(graph: &Graph, view: &GraphView, values: &mut dyn ChainValues, target: NodeId, tau_parent: NodeId) -> f64 {
    let original = values.read(target).to_vec();
    values.write(target, &[1.0]);
    view.recompute_closure(graph, values);
    let coefficient = values.read(tau_parent)[0];
    values.write(target, &original);
    view.recompute_closure(graph, values);
    coefficient
}

impl SampleMethod for TruncatedGamma {
    fn update(
        &mut self,
        graph: &Graph,
        _view: &GraphView,
        values: &mut dyn ChainValues,
        rng: &mut dyn rand::RngCore,
    ) -> BugsResult<()> {
        let node = graph.get(self.target);
        let NodeKind::Stochastic(spec) = &node.kind else { unreachable!("target must be stochastic") };
        let r0 = values.read(node.parents[0])[0];
        let lambda0 = values.read(node.parents[1])[0];

        let mut shape = r0;
        let mut rate = lambda0;
        for c in &self.children {
            let child_node = graph.get(c.child);
            let tau_parent = child_node.parents[1];
            let coefficient = probe_coefficient(graph, &self.view, values, self.target, tau_parent);
            let y = values.read(c.child).to_vec();
            let mu = values.read(c.mu_parent).to_vec();
            shape += y.len() as f64 / 2.0;
            let sq: f64 = y.iter().zip(mu.iter()).map(|(&yi, &mi)| (yi - mi) * (yi - mi)).sum();
            rate += coefficient * sq / 2.0;
        }

        let gamma = bugs_dist::Gamma;
        let params: [&[f64]; 2] = [&[shape], &[rate]];
        let (lower, upper) = spec.truncation;
        let new_value = if lower.is_none() && upper.is_none() {
            gamma.sample(rng, &params)[0]
        } else {
            let plower = lower.map_or(0.0, |l| gamma.cdf(l, &params));
            let pupper = upper.map_or(1.0, |u| gamma.cdf(u, &params));
            let u = plower + rng.random::<f64>() * (pupper - plower);
            gamma.quantile(u, &params)
        };

        values.write(self.target, &[new_value]);
        self.view.recompute_closure(graph, values);
        Ok(())
    }

    fn is_adaptive(&self) -> bool {
        false
    }

    fn adapt_off(&mut self) {}

    fn check_adaptation(&mut self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "TruncatedGamma"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugs_core::{Node, StochasticSpec, ValueArena};
    use bugs_dist::Norm;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    fn build_chain(n: usize) -> (Graph, NodeId, Vec<NodeId>, Vec<f64>) {
        let mut g = Graph::new();
        let r0 = g.add_node(Node::new(Arc::from("r0"), vec![1], vec![], NodeKind::Constant, &[]));
        let lambda0 = g.add_node(Node::new(Arc::from("lambda0"), vec![1], vec![], NodeKind::Constant, &[]));
        let tau = g.add_node(Node::new(
            Arc::from("tau"),
            vec![1],
            vec![r0, lambda0],
            NodeKind::Stochastic(StochasticSpec {
                distribution: Arc::new(bugs_dist::Gamma),
                truncation: (None, None),
                observed: false,
            }),
            &[false, false],
        ));
        let mu = g.add_node(Node::new(Arc::from("mu"), vec![1], vec![], NodeKind::Constant, &[]));
        let mut ys = Vec::new();
        let mut obs = Vec::new();
        for i in 0..n {
            let y = g.add_node(Node::new(
                Arc::from(format!("y{i}").as_str()),
                vec![1],
                vec![mu, tau],
                NodeKind::Stochastic(StochasticSpec {
                    distribution: Arc::new(Norm),
                    truncation: (None, None),
                    observed: true,
                }),
                &[false, false],
            ));
            ys.push(y);
            obs.push(0.5 * (i as f64 % 3.0 - 1.0));
        }
        (g, tau, ys, obs)
    }

    #[test]
    fn can_sample_accepts_a_gamma_precision_chain() {
        let (g, tau, _ys, _obs) = build_chain(5);
        assert!(TruncatedGamma::can_sample(tau, &g));
    }

    #[test]
    fn update_stays_positive_and_tracks_residual_scale() {
        let (g, tau, ys, obs) = build_chain(30);
        let dims = g.dims();
        let mut arena = ValueArena::new(1, &dims);
        arena.write(g.by_name("r0").unwrap(), 0, &[0.001]);
        arena.write(g.by_name("lambda0").unwrap(), 0, &[0.001]);
        arena.write(g.by_name("mu").unwrap(), 0, &[0.0]);
        for (&y, &v) in ys.iter().zip(obs.iter()) {
            arena.write(y, 0, &[v]);
        }

        let mut method = TruncatedGamma::new(tau, &g);
        let mut rng = StdRng::seed_from_u64(9);
        let view = GraphView::build(&g, vec![tau]);
        let mut chain = arena.chain_mut(0);
        let mut total = 0.0;
        let n_iter = 500;
        for _ in 0..n_iter {
            method.update(&g, &view, &mut chain, &mut rng).unwrap();
            let v = chain.read(tau)[0];
            assert!(v > 0.0);
            total += v;
        }
        assert!((total / n_iter as f64).is_finite());
    }
}

//! `ConjugateNormal` (§4.G): closed-form Normal-posterior update for a
//! Normal-prior target whose stochastic children are Normal with a
//! precision independent of the target and a mean linear in it.

use rand::Rng;

use bugs_core::{ChainValues, Graph, GraphMarks, GraphView, NodeId, NodeKind};
use bugs_dist::Distribution;
use bugs_error::BugsResult;

use crate::framework::SampleMethod;

/// A child's `(alpha, beta)` coefficients either get probed fresh
/// every update, or — when the mean is linear with coefficients
/// independent of the target's own value — probed once, lazily, on
/// the first update (no arena exists yet at construction) and reused
/// from then on.
enum Coeffs {
    Recompute,
    Pending,
    Fixed(f64, f64),
}

struct ChildCoefficients {
    child: NodeId,
    mu_parent: NodeId,
    tau_parent: NodeId,
    coeffs: Coeffs,
}

pub struct ConjugateNormal {
    target: NodeId,
    view: GraphView,
    children: Vec<ChildCoefficients>,
}

impl ConjugateNormal {
    /// §4.G: applies when the target has a Normal prior, every
    /// stochastic descendant is (multivariate) Normal with precision
    /// independent of the target, and descendant means are linear in
    /// the target.
    pub fn can_sample(target: NodeId, graph: &Graph) -> bool {
        let node = graph.get(target);
        let NodeKind::Stochastic(spec) = &node.kind else { return false };
        if spec.distribution.name() != "dnorm" && spec.distribution.name() != "dmnorm" {
            return false;
        }
        let view = GraphView::build(graph, vec![target]);
        let mut marks = GraphMarks::new();
        marks.propagate(graph, &[target], true, false);

        for &child_id in view.stochastic_children() {
            let child = graph.get(child_id);
            let NodeKind::Stochastic(cspec) = &child.kind else { return false };
            if cspec.distribution.name() != "dnorm" && cspec.distribution.name() != "dmnorm" {
                return false;
            }
            let mu_parent = child.parents[0];
            let tau_parent = child.parents[1];
            if tau_parent == target || view.is_dependent(tau_parent) {
                return false;
            }
            if mu_parent != target && !marks.get(mu_parent).is_true() {
                return false;
            }
        }
        true
    }

    pub fn new(target: NodeId, graph: &Graph) -> Self {
        assert!(Self::can_sample(target, graph), "ConjugateNormal requires can_sample");
        let view = GraphView::build(graph, vec![target]);

        let mut marks = GraphMarks::new();
        marks.propagate(graph, &[target], true, false);

        let children = view
            .stochastic_children()
            .iter()
            .map(|&child_id| {
                let child = graph.get(child_id);
                let mu_parent = child.parents[0];
                let tau_parent = child.parents[1];
                let fixed = mu_parent == target || marks.get(mu_parent).is_true();
                let coeffs = if fixed { Coeffs::Pending } else { Coeffs::Recompute };
                ChildCoefficients { child: child_id, mu_parent, tau_parent, coeffs }
            })
            .collect();

        Self { target, view, children }
    }

    /// Probes the mean at `target = 0` and `target = 1` to recover
    /// `(alpha, beta)` in `mean = alpha + beta * target` for every
    /// non-cached child, then restores the original value (§4.G:
    /// "coefficients are cached ... decided once at construction by
    /// probing linearity with the fixed flag set").
    fn coefficients(&mut self, graph: &Graph, values: &mut dyn ChainValues) -> Vec<(f64, f64, f64)> {
        let target = self.target;
        let view = &self.view;
        let probe = |mu_parent: NodeId, values: &mut dyn ChainValues| -> (f64, f64) {
            let original = values.read(target).to_vec();
            values.write(target, &[0.0]);
            view.recompute_closure(graph, values);
            let alpha = values.read(mu_parent)[0];
            values.write(target, &[1.0]);
            view.recompute_closure(graph, values);
            let beta = values.read(mu_parent)[0] - alpha;
            values.write(target, &original);
            view.recompute_closure(graph, values);
            (alpha, beta)
        };
        self.children
            .iter_mut()
            .map(|c| {
                let (alpha, beta) = match c.coeffs {
                    Coeffs::Fixed(a, b) => (a, b),
                    Coeffs::Recompute => probe(c.mu_parent, values),
                    Coeffs::Pending => {
                        let ab = probe(c.mu_parent, values);
                        c.coeffs = Coeffs::Fixed(ab.0, ab.1);
                        ab
                    }
                };
                let tau = values.read(c.tau_parent)[0];
                (alpha, beta, tau)
            })
            .collect()
    }
}

impl SampleMethod for ConjugateNormal {
    fn update(
        &mut self,
        graph: &Graph,
        _view: &GraphView,
        values: &mut dyn ChainValues,
        rng: &mut dyn rand::RngCore,
    ) -> BugsResult<()> {
        let node = graph.get(self.target);
        let NodeKind::Stochastic(spec) = &node.kind else { unreachable!("target must be stochastic") };
        let mu0 = values.read(node.parents[0])[0];
        let tau0 = values.read(node.parents[1])[0];
        let x0 = values.read(self.target)[0];

        let triples = self.coefficients(graph, values);
        let mut b = tau0;
        let mut a = tau0 * (mu0 - x0);
        for ((alpha, beta, tau), c) in triples.iter().zip(self.children.iter()) {
            let y = values.read(c.child)[0];
            b += beta * beta * tau;
            a += beta * tau * (y - alpha);
        }

        let post_mean = x0 + a / b;

        let norm = bugs_dist::Norm;
        let params: [&[f64]; 2] = [&[post_mean], &[b]];
        let (lower, upper) = spec.truncation;
        let new_value = if lower.is_none() && upper.is_none() {
            norm.sample(rng, &params)[0]
        } else {
            let plower = lower.map_or(0.0, |l| norm.cdf(l, &params));
            let pupper = upper.map_or(1.0, |u| norm.cdf(u, &params));
            let u = plower + rng.random::<f64>() * (pupper - plower);
            norm.quantile(u, &params)
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
        "ConjugateNormal"
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
        let tau0 = g.add_node(Node::new(Arc::from("tau0"), vec![1], vec![], NodeKind::Constant, &[]));
        let mu0 = g.add_node(Node::new(Arc::from("mu0"), vec![1], vec![], NodeKind::Constant, &[]));
        let mu = g.add_node(Node::new(
            Arc::from("mu"),
            vec![1],
            vec![mu0, tau0],
            NodeKind::Stochastic(StochasticSpec {
                distribution: Arc::new(Norm),
                truncation: (None, None),
                observed: false,
            }),
            &[false, false],
        ));
        let tau_y = g.add_node(Node::new(Arc::from("tau_y"), vec![1], vec![], NodeKind::Constant, &[]));
        let mut ys = Vec::new();
        let mut obs = Vec::new();
        for i in 0..n {
            let y = g.add_node(Node::new(
                Arc::from(format!("y{i}").as_str()),
                vec![1],
                vec![mu, tau_y],
                NodeKind::Stochastic(StochasticSpec {
                    distribution: Arc::new(Norm),
                    truncation: (None, None),
                    observed: true,
                }),
                &[false, false],
            ));
            ys.push(y);
            obs.push(1.0 + 0.01 * i as f64);
        }
        (g, mu, ys, obs)
    }

    #[test]
    fn can_sample_accepts_a_normal_chain() {
        let (g, mu, _ys, _obs) = build_chain(5);
        assert!(ConjugateNormal::can_sample(mu, &g));
    }

    #[test]
    fn update_shrinks_toward_the_data_mean() {
        let (g, mu, ys, obs) = build_chain(20);
        let dims = g.dims();
        let mut arena = ValueArena::new(1, &dims);
        arena.write(g.by_name("tau0").unwrap(), 0, &[0.0001]);
        arena.write(g.by_name("mu0").unwrap(), 0, &[0.0]);
        arena.write(g.by_name("tau_y").unwrap(), 0, &[1.0]);
        for (&y, &v) in ys.iter().zip(obs.iter()) {
            arena.write(y, 0, &[v]);
        }

        let mut method = ConjugateNormal::new(mu, &g);
        let mut rng = StdRng::seed_from_u64(42);
        let view = GraphView::build(&g, vec![mu]);
        let mut chain = arena.chain_mut(0);
        for _ in 0..500 {
            method.update(&g, &view, &mut chain, &mut rng).unwrap();
        }
        let data_mean: f64 = obs.iter().sum::<f64>() / obs.len() as f64;
        assert!((chain.read(mu)[0] - data_mean).abs() < 0.2);
    }
}

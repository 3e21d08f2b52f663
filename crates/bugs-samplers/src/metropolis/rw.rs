//! `RWMetropolis` (§4.H): random-walk Gaussian proposal over a block
//! of scalar sampled nodes, scale tuned by Robbins–Monro toward a
//! 0.234 acceptance target.

use rand::Rng;
use rand_distr::{Distribution as _, Normal};

use bugs_core::{ChainValues, Graph, GraphView};
use bugs_error::BugsResult;

use crate::framework::SampleMethod;
use crate::metropolis::base::MetropolisState;

pub const DEFAULT_TARGET_ACCEPT: f64 = 0.234;

pub struct RWMetropolis {
    state: MetropolisState,
}

impl RWMetropolis {
    pub fn new(initial_scale: f64) -> Self {
        Self { state: MetropolisState::new(initial_scale, DEFAULT_TARGET_ACCEPT, 0.05) }
    }

    pub fn with_tolerance(initial_scale: f64, adapt_tolerance: f64) -> Self {
        Self { state: MetropolisState::new(initial_scale, DEFAULT_TARGET_ACCEPT, adapt_tolerance) }
    }
}

impl SampleMethod for RWMetropolis {
    fn update(
        &mut self,
        graph: &Graph,
        view: &GraphView,
        values: &mut dyn ChainValues,
        rng: &mut dyn rand::RngCore,
    ) -> BugsResult<()> {
        let current = view.get_value(values);
        let log_before = view.log_full_conditional(graph, values);

        let scale = self.state.scale();
        let normal = Normal::new(0.0, scale).expect("scale must be positive");
        let proposed: Vec<Vec<f64>> = current
            .iter()
            .map(|v| v.iter().map(|&x| x + normal.sample(rng)).collect())
            .collect();

        view.set_value(graph, values, &proposed);
        let log_after = view.log_full_conditional(graph, values);

        // Symmetric Gaussian random walk: log_proposal_ratio = 0.
        let log_alpha = log_after - log_before;
        if !self.state.accept(rng, log_alpha) {
            view.set_value(graph, values, &current);
        }
        Ok(())
    }

    fn is_adaptive(&self) -> bool {
        self.state.is_adaptive()
    }

    fn adapt_off(&mut self) {
        self.state.adapt_off();
    }

    fn check_adaptation(&mut self) -> bool {
        self.state.check_adaptation()
    }

    fn name(&self) -> &'static str {
        "RWMetropolis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugs_core::{GraphView, Node, NodeId, NodeKind, StochasticSpec, ValueArena};
    use bugs_dist::Norm;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    fn build() -> (Graph, NodeId, ValueArena) {
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
        let dims = g.dims();
        let arena = ValueArena::new(1, &dims);
        (g, mu, arena)
    }

    #[test]
    fn update_leaves_value_finite_and_within_a_few_scales() {
        let (g, mu, mut arena) = build();
        let view = GraphView::build(&g, vec![mu]);
        let mut method = RWMetropolis::new(0.5);
        let mut rng = StdRng::seed_from_u64(7);
        let mut chain = arena.chain_mut(0);
        for _ in 0..200 {
            method.update(&g, &view, &mut chain, &mut rng).unwrap();
        }
        let v = chain.read(mu)[0];
        assert!(v.is_finite());
    }

    #[test]
    fn adapt_off_then_frozen_state_reports_non_adaptive() {
        let mut method = RWMetropolis::new(0.5);
        assert!(method.is_adaptive());
        method.adapt_off();
        assert!(!method.is_adaptive());
    }
}

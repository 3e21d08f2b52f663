//! Discrete constraint analogs of `RealDSum` (§4.H): `DSumMethod`
//! preserves an integer sum across a block by moving one unit between
//! a random pair of components; `DirichletCat` resamples one
//! categorical assignment at a time by Metropolis proposal over its
//! discrete support.

use rand::Rng;

use bugs_core::{ChainValues, Graph, GraphView};
use bugs_error::BugsResult;

use crate::framework::SampleMethod;
use crate::metropolis::base::MetropolisState;
use crate::metropolis::rw::DEFAULT_TARGET_ACCEPT;

/// Integer-valued sum-constrained block: each step moves one unit
/// from a random donor (value > 0) to a random recipient, preserving
/// the total exactly.
pub struct DSumMethod {
    state: MetropolisState,
}

impl DSumMethod {
    pub fn new() -> Self {
        Self { state: MetropolisState::new(1.0, DEFAULT_TARGET_ACCEPT, 0.05) }
    }

    pub fn with_tolerance(adapt_tolerance: f64) -> Self {
        Self { state: MetropolisState::new(1.0, DEFAULT_TARGET_ACCEPT, adapt_tolerance) }
    }

    /// Discrete analog of `RealDSum::shift_to_constraint`: moves whole
    /// units round-robin across `initial` until its total equals
    /// `target` exactly, so an integer sum constraint holds from the
    /// first iteration on.
    pub fn shift_to_constraint(initial: &mut [f64], target: f64) {
        let n = initial.len();
        assert!(n >= 2, "a sum constraint needs at least two components");
        let mut diff = (target - initial.iter().sum::<f64>()).round() as i64;
        let step: i64 = if diff >= 0 { 1 } else { -1 };
        let mut i = 0;
        while diff != 0 {
            initial[i % n] += step as f64;
            diff -= step;
            i += 1;
        }
    }
}

impl Default for DSumMethod {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleMethod for DSumMethod {
    fn update(
        &mut self,
        graph: &Graph,
        view: &GraphView,
        values: &mut dyn ChainValues,
        rng: &mut dyn rand::RngCore,
    ) -> BugsResult<()> {
        let n = view.nodes().len();
        if n < 2 {
            return Ok(());
        }
        let current = view.get_value(values);
        let donors: Vec<usize> = (0..n).filter(|&i| current[i][0] >= 1.0).collect();
        if donors.is_empty() {
            return Ok(());
        }
        let log_before = view.log_full_conditional(graph, values);

        let donor = donors[rng.random_range(0..donors.len())];
        let mut recipient = rng.random_range(0..n - 1);
        if recipient >= donor {
            recipient += 1;
        }

        let mut proposed = current.clone();
        proposed[donor][0] -= 1.0;
        proposed[recipient][0] += 1.0;

        view.set_value(graph, values, &proposed);
        let log_after = view.log_full_conditional(graph, values);

        let log_alpha = log_after - log_before;
        if !self.state.accept(rng, log_alpha) {
            view.set_value(graph, values, &current);
        }
        Ok(())
    }

    fn is_adaptive(&self) -> bool {
        false
    }

    fn adapt_off(&mut self) {
        self.state.adapt_off();
    }

    fn check_adaptation(&mut self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "DSumMethod"
    }
}

/// One categorical node's assignment, resampled by a uniform proposal
/// over its `ncategories` support and a Metropolis accept step.
pub struct DirichletCat {
    ncategories: usize,
}

impl DirichletCat {
    pub fn new(ncategories: usize) -> Self {
        assert!(ncategories >= 2, "a categorical assignment needs at least two categories");
        Self { ncategories }
    }
}

impl SampleMethod for DirichletCat {
    fn update(
        &mut self,
        graph: &Graph,
        view: &GraphView,
        values: &mut dyn ChainValues,
        rng: &mut dyn rand::RngCore,
    ) -> BugsResult<()> {
        let current = view.get_value(values);
        let log_before = view.log_full_conditional(graph, values);

        let mut proposed = current.clone();
        for v in &mut proposed {
            v[0] = (rng.random_range(0..self.ncategories) + 1) as f64;
        }

        view.set_value(graph, values, &proposed);
        let log_after = view.log_full_conditional(graph, values);

        // Uniform proposal over a finite support: symmetric, so the
        // accept ratio is the plain density ratio (no adaptation —
        // the proposal has no tunable scale).
        let log_alpha = log_after - log_before;
        if !(log_alpha >= 0.0 || rng.random::<f64>().ln() < log_alpha) {
            view.set_value(graph, values, &current);
        }
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
        "DirichletCat"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugs_core::{Graph, GraphView, Node, NodeKind, StochasticSpec, ValueArena};
    use bugs_dist::Norm;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    #[test]
    fn shift_to_constraint_fixes_an_arbitrary_integer_starting_sum() {
        let mut v = vec![0.0, 0.0, 0.0];
        DSumMethod::shift_to_constraint(&mut v, 5.0);
        assert!((v.iter().sum::<f64>() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn dsum_preserves_integer_total() {
        let mut g = Graph::new();
        let mk = |g: &mut Graph, name: &str, v: f64| {
            let id = g.add_node(Node::new(
                Arc::from(name),
                vec![1],
                vec![],
                NodeKind::Stochastic(StochasticSpec {
                    distribution: Arc::new(Norm),
                    truncation: (Some(0.0), None),
                    observed: false,
                }),
                &[],
            ));
            (id, v)
        };
        let (a, av) = mk(&mut g, "n1", 3.0);
        let (b, bv) = mk(&mut g, "n2", 2.0);
        let dims = g.dims();
        let mut arena = ValueArena::new(1, &dims);
        arena.write(a, 0, &[av]);
        arena.write(b, 0, &[bv]);

        let view = GraphView::build(&g, vec![a, b]);
        let mut method = DSumMethod::new();
        let mut rng = StdRng::seed_from_u64(13);
        let mut chain = arena.chain_mut(0);
        for _ in 0..200 {
            method.update(&g, &view, &mut chain, &mut rng).unwrap();
        }
        let total = chain.read(a)[0] + chain.read(b)[0];
        assert!((total - 5.0).abs() < 1e-9);
    }
}

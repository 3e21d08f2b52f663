//! `MixSampler` (§4.H): tempered random-walk over a multi-component
//! block. `nlevels` power levels interpolate between a flattened
//! posterior (`min_power`) and the true target (power 1); each level's
//! proposal scale adapts independently toward a common acceptance
//! target, and the block occasionally attempts to move between levels
//! (simulated tempering).

use rand::Rng;
use rand_distr::{Distribution as _, Normal};

use bugs_core::{ChainValues, Graph, GraphView};
use bugs_error::BugsResult;

use crate::framework::SampleMethod;
use crate::metropolis::base::MetropolisState;
use crate::metropolis::rw::DEFAULT_TARGET_ACCEPT;

pub struct MixSampler {
    powers: Vec<f64>,
    levels: Vec<MetropolisState>,
    current_level: usize,
}

impl MixSampler {
    pub fn new(nlevels: usize, min_power: f64, initial_scale: f64) -> Self {
        Self::with_tolerance(nlevels, min_power, initial_scale, 0.05)
    }

    pub fn with_tolerance(nlevels: usize, min_power: f64, initial_scale: f64, adapt_tolerance: f64) -> Self {
        assert!(nlevels >= 1, "a tempering ladder needs at least one level");
        let powers: Vec<f64> = if nlevels == 1 {
            vec![1.0]
        } else {
            (0..nlevels)
                .map(|l| min_power + (1.0 - min_power) * l as f64 / (nlevels - 1) as f64)
                .collect()
        };
        let levels = (0..nlevels)
            .map(|_| MetropolisState::new(initial_scale, DEFAULT_TARGET_ACCEPT, adapt_tolerance))
            .collect();
        Self { powers, levels, current_level: nlevels - 1 }
    }

    fn try_level_transition(&mut self, rng: &mut dyn rand::RngCore, log_target_at_current: f64) {
        if self.powers.len() == 1 {
            return;
        }
        let proposed_level = if self.current_level == 0 {
            1
        } else if self.current_level == self.powers.len() - 1 {
            self.current_level - 1
        } else if rng.random::<bool>() {
            self.current_level + 1
        } else {
            self.current_level - 1
        };
        let log_alpha =
            (self.powers[proposed_level] - self.powers[self.current_level]) * log_target_at_current;
        if log_alpha >= 0.0 || rng.random::<f64>().ln() < log_alpha {
            self.current_level = proposed_level;
        }
    }
}

impl SampleMethod for MixSampler {
    fn update(
        &mut self,
        graph: &Graph,
        view: &GraphView,
        values: &mut dyn ChainValues,
        rng: &mut dyn rand::RngCore,
    ) -> BugsResult<()> {
        let current = view.get_value(values);
        let log_before = view.log_full_conditional(graph, values);

        let power = self.powers[self.current_level];
        let scale = self.levels[self.current_level].scale();
        let normal = Normal::new(0.0, scale).expect("scale must be positive");
        let proposed: Vec<Vec<f64>> = current
            .iter()
            .map(|v| v.iter().map(|&x| x + normal.sample(rng)).collect())
            .collect();

        view.set_value(graph, values, &proposed);
        let log_after = view.log_full_conditional(graph, values);

        let log_alpha = power * (log_after - log_before);
        let level = self.current_level;
        if !self.levels[level].accept(rng, log_alpha) {
            view.set_value(graph, values, &current);
            self.try_level_transition(rng, log_before);
        } else {
            self.try_level_transition(rng, log_after);
        }
        Ok(())
    }

    fn is_adaptive(&self) -> bool {
        self.levels.iter().any(|l| l.is_adaptive())
    }

    fn adapt_off(&mut self) {
        for l in &mut self.levels {
            l.adapt_off();
        }
    }

    fn check_adaptation(&mut self) -> bool {
        self.levels.iter_mut().all(|l| l.check_adaptation())
    }

    fn name(&self) -> &'static str {
        "MixSampler"
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
    fn ladder_always_keeps_top_power_at_one() {
        let sampler = MixSampler::new(4, 0.1, 0.5);
        assert_eq!(*sampler.powers.last().unwrap(), 1.0);
        assert_eq!(sampler.powers[0], 0.1);
    }

    #[test]
    fn update_runs_without_panicking_and_leaves_finite_values() {
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
        let mut arena = ValueArena::new(1, &dims);
        let view = GraphView::build(&g, vec![mu]);
        let mut method = MixSampler::new(3, 0.2, 0.5);
        let mut rng = StdRng::seed_from_u64(3);
        let mut chain = arena.chain_mut(0);
        for _ in 0..100 {
            method.update(&g, &view, &mut chain, &mut rng).unwrap();
        }
        assert!(chain.read(mu)[0].is_finite());
    }
}

//! Metropolis base contract (§4.H): two per-instance buffers — current
//! value and last-accepted value — and the shared propose/accept cycle.
//! A subclass supplies `propose` (in its own sampler-private
//! coordinates) and `log_proposal_ratio`; this module owns the
//! accept/reject arithmetic and the Robbins–Monro rescale.

use rand::Rng;

use crate::framework::AdaptState;

/// Robbins–Monro step size for the `n`-th adaptation call, shrinking
/// as `1/sqrt(n)` so the scale update damps out (§4.H, "0.234
/// acceptance target").
fn robbins_monro_step(n: u64) -> f64 {
    1.0 / (n as f64 + 1.0).sqrt()
}

/// Shared acceptance bookkeeping for any random-walk Metropolis
/// updater: a log-scale proposal width, adapted toward
/// `target_accept`, plus the `{Adapting, FrozenUntested, Frozen}`
/// lifecycle of §9 DESIGN NOTES.
pub struct MetropolisState {
    pub log_scale: f64,
    pub target_accept: f64,
    pub adapt_tolerance: f64,
    state: AdaptState,
    adapt_calls: u64,
    accepted_since_freeze: u64,
    proposed_since_freeze: u64,
}

impl MetropolisState {
    pub fn new(initial_scale: f64, target_accept: f64, adapt_tolerance: f64) -> Self {
        Self {
            log_scale: initial_scale.max(f64::MIN_POSITIVE).ln(),
            target_accept,
            adapt_tolerance,
            state: AdaptState::Adapting,
            adapt_calls: 0,
            accepted_since_freeze: 0,
            proposed_since_freeze: 0,
        }
    }

    pub fn scale(&self) -> f64 {
        self.log_scale.exp()
    }

    pub fn is_adaptive(&self) -> bool {
        self.state == AdaptState::Adapting
    }

    /// Runs one Metropolis–Hastings accept/reject decision for
    /// `log_alpha = log_full_conditional_new - log_full_conditional_old
    /// + log_proposal_ratio`, rescaling the proposal width when still
    /// adapting (§4.H step iii).
    pub fn accept(&mut self, rng: &mut dyn rand::RngCore, log_alpha: f64) -> bool {
        let accepted = log_alpha >= 0.0 || rng.random::<f64>().ln() < log_alpha;
        if self.is_adaptive() {
            self.adapt_calls += 1;
            let step = robbins_monro_step(self.adapt_calls);
            let p_accept = log_alpha.min(0.0).exp();
            self.log_scale += step * (p_accept - self.target_accept);
        } else {
            self.proposed_since_freeze += 1;
            if accepted {
                self.accepted_since_freeze += 1;
            }
        }
        accepted
    }

    pub fn adapt_off(&mut self) {
        if self.state == AdaptState::Adapting {
            self.state = AdaptState::FrozenUntested;
            self.accepted_since_freeze = 0;
            self.proposed_since_freeze = 0;
        }
    }

    /// Reports whether, since `adapt_off`, the empirical acceptance
    /// rate has landed within `adapt_tolerance` of `target_accept`.
    /// Open question (§9): the source leaves this tolerance numerically
    /// unstated; exposed here as a configurable field rather than a
    /// hardcoded constant.
    pub fn check_adaptation(&mut self) -> bool {
        if self.state == AdaptState::Adapting {
            return false;
        }
        if self.proposed_since_freeze < 20 {
            return false;
        }
        let rate = self.accepted_since_freeze as f64 / self.proposed_since_freeze as f64;
        let converged = (rate - self.target_accept).abs() <= self.adapt_tolerance;
        if converged {
            self.state = AdaptState::Frozen;
        }
        converged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn adapting_state_never_reports_converged() {
        let mut s = MetropolisState::new(1.0, 0.234, 0.05);
        assert!(!s.check_adaptation());
    }

    #[test]
    fn rescale_moves_scale_toward_more_acceptance_on_accept() {
        let mut s = MetropolisState::new(1.0, 0.234, 0.05);
        let mut rng = StdRng::seed_from_u64(1);
        let before = s.log_scale;
        s.accept(&mut rng, 5.0);
        assert!(s.log_scale > before);
    }

    #[test]
    fn frozen_untested_becomes_frozen_once_rate_converges() {
        let mut s = MetropolisState::new(1.0, 0.5, 0.5);
        s.adapt_off();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..30 {
            s.accept(&mut rng, 0.0);
        }
        assert!(s.check_adaptation());
    }
}

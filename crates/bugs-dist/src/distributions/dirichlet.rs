use rand::RngCore;
use rand_distr::{Distribution as _, Gamma as GammaDistr};
use statrs::function::gamma::ln_gamma;

use crate::distribution::{Distribution, Params};

/// `ddirch(alpha)`: Dirichlet distribution over the `(k-1)`-simplex.
/// A zero entry in `alpha` is a structural zero: the corresponding
/// component of `x` must be exactly zero (§4.G, ConjugateDirichlet).
pub struct Dirichlet;

impl Distribution for Dirichlet {
    fn name(&self) -> &'static str {
        "ddirch"
    }

    fn check_param_dims(&self, param_lens: &[usize]) -> bool {
        param_lens.len() == 1 && param_lens[0] >= 2
    }

    fn check_param_values(&self, params: &Params) -> bool {
        let alpha = params[0];
        alpha.iter().all(|&a| a >= 0.0) && alpha.iter().any(|&a| a > 0.0)
    }

    fn log_density(&self, x: &[f64], params: &Params) -> f64 {
        let alpha = params[0];
        let sum_alpha: f64 = alpha.iter().sum();
        let mut ld = ln_gamma(sum_alpha);
        for (i, &a) in alpha.iter().enumerate() {
            if a == 0.0 {
                if x[i].abs() > 1e-12 {
                    return f64::NEG_INFINITY;
                }
                continue;
            }
            ld -= ln_gamma(a);
            ld += (a - 1.0) * x[i].ln();
        }
        ld
    }

    fn cdf(&self, _x: f64, _params: &Params) -> f64 {
        unimplemented!("ddirch has no scalar cdf")
    }

    fn quantile(&self, _p: f64, _params: &Params) -> f64 {
        unimplemented!("ddirch has no scalar quantile")
    }

    fn sample(&self, rng: &mut dyn RngCore, params: &Params) -> Vec<f64> {
        let alpha = params[0];
        let mut draws: Vec<f64> = alpha
            .iter()
            .map(|&a| {
                if a == 0.0 {
                    0.0
                } else {
                    GammaDistr::new(a, 1.0).expect("positive shape").sample(rng)
                }
            })
            .collect();
        let total: f64 = draws.iter().sum();
        for d in &mut draws {
            *d /= total;
        }
        draws
    }

    fn support(&self, _params: &Params) -> (Option<f64>, Option<f64>) {
        (Some(0.0), Some(1.0))
    }

    fn is_discrete(&self) -> bool {
        false
    }

    fn degrees_of_freedom(&self, param_lens: &[usize]) -> usize {
        param_lens[0].saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_zero_forces_zero_component() {
        let params: [&[f64]; 1] = [&[1.0, 0.0, 1.0]];
        let ld = Dirichlet.log_density(&[0.4, 0.0, 0.6], &params);
        assert!(ld.is_finite());
        let ld_violation = Dirichlet.log_density(&[0.4, 0.1, 0.5], &params);
        assert_eq!(ld_violation, f64::NEG_INFINITY);
    }

    #[test]
    fn sample_sums_to_one() {
        let params: [&[f64]; 1] = [&[2.0, 3.0, 5.0]];
        let mut rng = rand::rng();
        let draw = Dirichlet.sample(&mut rng, &params);
        let total: f64 = draw.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}

use rand::RngCore;
use rand_distr::{Distribution as _, Gamma as GammaDistr};
use statrs::distribution::{ContinuousCDF, Gamma as StatrsGamma};
use statrs::function::gamma::ln_gamma;

use crate::distribution::{Distribution, Params};

/// `dgamma(r, lambda)`: shape/rate parameterized Gamma, as BUGS
/// documents it (`r` = shape, `lambda` = rate).
pub struct Gamma;

impl Distribution for Gamma {
    fn name(&self) -> &'static str {
        "dgamma"
    }

    fn check_param_dims(&self, param_lens: &[usize]) -> bool {
        param_lens == [1, 1]
    }

    fn check_param_values(&self, params: &Params) -> bool {
        params[0][0] > 0.0 && params[1][0] > 0.0
    }

    fn log_density(&self, x: &[f64], params: &Params) -> f64 {
        let r = params[0][0];
        let lambda = params[1][0];
        if x[0] <= 0.0 {
            return f64::NEG_INFINITY;
        }
        r * lambda.ln() - ln_gamma(r) + (r - 1.0) * x[0].ln() - lambda * x[0]
    }

    fn cdf(&self, x: f64, params: &Params) -> f64 {
        let r = params[0][0];
        let lambda = params[1][0];
        StatrsGamma::new(r, lambda).expect("valid gamma parameters").cdf(x)
    }

    fn quantile(&self, p: f64, params: &Params) -> f64 {
        let r = params[0][0];
        let lambda = params[1][0];
        StatrsGamma::new(r, lambda)
            .expect("valid gamma parameters")
            .inverse_cdf(p)
    }

    fn sample(&self, rng: &mut dyn RngCore, params: &Params) -> Vec<f64> {
        let r = params[0][0];
        let lambda = params[1][0];
        vec![GammaDistr::new(r, 1.0 / lambda).expect("valid gamma parameters").sample(rng)]
    }

    fn support(&self, _params: &Params) -> (Option<f64>, Option<f64>) {
        (Some(0.0), None)
    }

    fn is_discrete(&self) -> bool {
        false
    }

    fn degrees_of_freedom(&self, _param_lens: &[usize]) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_is_zero_below_support() {
        let params: [&[f64]; 2] = [&[2.0], &[1.0]];
        assert_eq!(Gamma.log_density(&[-1.0], &params), f64::NEG_INFINITY);
    }

    #[test]
    fn rejects_nonpositive_shape_or_rate() {
        let params: [&[f64]; 2] = [&[0.0], &[1.0]];
        assert!(!Gamma.check_param_values(&params));
    }
}

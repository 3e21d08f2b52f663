use rand::RngCore;

use crate::distribution::{Distribution, Params};

/// `dsum(x1, ..., xn)`: the degenerate distribution of a variable
/// constrained to equal the sum of its parents. Used to express an
/// observed constraint `y <- x1 + x2 + ...` as a stochastic node so
/// that `RealDSum` (§4.H) can sample the unobserved summands subject
/// to it. Density is 1 at the constraint surface and 0 elsewhere; we
/// represent that as `0.0`/`-inf` log-density within a small tolerance
/// to tolerate floating-point roundoff in the summands.
pub struct Sum;

const TOLERANCE: f64 = 1e-8;

impl Distribution for Sum {
    fn name(&self) -> &'static str {
        "dsum"
    }

    fn check_param_dims(&self, param_lens: &[usize]) -> bool {
        !param_lens.is_empty() && param_lens.iter().all(|&l| l == 1)
    }

    fn check_param_values(&self, _params: &Params) -> bool {
        true
    }

    fn log_density(&self, x: &[f64], params: &Params) -> f64 {
        let total: f64 = params.iter().map(|p| p[0]).sum();
        if (x[0] - total).abs() <= TOLERANCE {
            0.0
        } else {
            f64::NEG_INFINITY
        }
    }

    fn cdf(&self, _x: f64, _params: &Params) -> f64 {
        unimplemented!("dsum is a degenerate distribution with no cdf")
    }

    fn quantile(&self, _p: f64, _params: &Params) -> f64 {
        unimplemented!("dsum is a degenerate distribution with no quantile")
    }

    fn sample(&self, _rng: &mut dyn RngCore, params: &Params) -> Vec<f64> {
        vec![params.iter().map(|p| p[0]).sum()]
    }

    fn support(&self, _params: &Params) -> (Option<f64>, Option<f64>) {
        (None, None)
    }

    fn is_discrete(&self) -> bool {
        false
    }

    fn degrees_of_freedom(&self, _param_lens: &[usize]) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_is_zero_log_at_the_constraint_surface() {
        let params: [&[f64]; 2] = [&[1.0], &[2.0]];
        assert_eq!(Sum.log_density(&[3.0], &params), 0.0);
    }

    #[test]
    fn density_is_neg_infinity_off_the_constraint_surface() {
        let params: [&[f64]; 2] = [&[1.0], &[2.0]];
        assert_eq!(Sum.log_density(&[3.5], &params), f64::NEG_INFINITY);
    }
}

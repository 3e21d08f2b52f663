use rand::RngCore;
use rand_distr::{Distribution as _, Normal as NormalDistr};
use statrs::distribution::{ContinuousCDF, Normal as StatrsNormal};

use bugs_utils::Matrix;

use crate::distribution::{Distribution, Params};

/// `dnorm(mu, tau)`: univariate Normal parameterized by mean and
/// *precision* (1/variance), as BUGS/JAGS does throughout.
pub struct Norm;

impl Distribution for Norm {
    fn name(&self) -> &'static str {
        "dnorm"
    }

    fn check_param_dims(&self, param_lens: &[usize]) -> bool {
        param_lens == [1, 1]
    }

    fn check_param_values(&self, params: &Params) -> bool {
        params[1][0] > 0.0
    }

    fn log_density(&self, x: &[f64], params: &Params) -> f64 {
        let mu = params[0][0];
        let tau = params[1][0];
        0.5 * (tau / std::f64::consts::TAU).ln() - 0.5 * tau * (x[0] - mu).powi(2)
    }

    fn cdf(&self, x: f64, params: &Params) -> f64 {
        let mu = params[0][0];
        let sd = params[1][0].sqrt().recip();
        StatrsNormal::new(mu, sd).expect("valid normal parameters").cdf(x)
    }

    fn quantile(&self, p: f64, params: &Params) -> f64 {
        let mu = params[0][0];
        let sd = params[1][0].sqrt().recip();
        StatrsNormal::new(mu, sd)
            .expect("valid normal parameters")
            .inverse_cdf(p)
    }

    fn sample(&self, rng: &mut dyn RngCore, params: &Params) -> Vec<f64> {
        let mu = params[0][0];
        let sd = params[1][0].sqrt().recip();
        vec![NormalDistr::new(mu, sd).expect("valid normal parameters").sample(rng)]
    }

    fn support(&self, _params: &Params) -> (Option<f64>, Option<f64>) {
        (None, None)
    }

    fn is_discrete(&self) -> bool {
        false
    }

    fn degrees_of_freedom(&self, _param_lens: &[usize]) -> usize {
        1
    }
}

/// `dmnorm(mu, tau)`: multivariate Normal parameterized by a mean
/// vector and a `k x k` precision matrix, flattened row-major.
pub struct MNorm;

impl MNorm {
    fn precision(params: &Params) -> Matrix {
        let k = params[0].len();
        Matrix::from_row_major(k, params[1].to_vec())
    }
}

impl Distribution for MNorm {
    fn name(&self) -> &'static str {
        "dmnorm"
    }

    fn check_param_dims(&self, param_lens: &[usize]) -> bool {
        param_lens.len() == 2 && param_lens[1] == param_lens[0] * param_lens[0]
    }

    fn check_param_values(&self, params: &Params) -> bool {
        Self::precision(params).cholesky().is_some()
    }

    fn log_density(&self, x: &[f64], params: &Params) -> f64 {
        let k = params[0].len();
        let mu = params[0];
        let tau = Self::precision(params);
        let delta: Vec<f64> = (0..k).map(|i| x[i] - mu[i]).collect();
        let log_det = tau.log_det().expect("precision matrix must be positive-definite");
        0.5 * log_det - 0.5 * (k as f64) * std::f64::consts::TAU.ln() - 0.5 * tau.quad_form(&delta)
    }

    fn cdf(&self, _x: f64, _params: &Params) -> f64 {
        unimplemented!("dmnorm has no scalar cdf; it is never truncated or used as a dsum child")
    }

    fn quantile(&self, _p: f64, _params: &Params) -> f64 {
        unimplemented!("dmnorm has no scalar quantile")
    }

    fn sample(&self, rng: &mut dyn RngCore, params: &Params) -> Vec<f64> {
        let k = params[0].len();
        let mu = params[0];
        let tau = Self::precision(params);
        // tau = L L^T; covariance = tau^-1, and if z ~ N(0, I) then
        // x = mu + L^{-T} z has covariance L^{-T} L^{-1} = tau^{-1}.
        let l = tau.cholesky().expect("precision matrix must be positive-definite");
        let z: Vec<f64> = (0..k)
            .map(|_| rand_distr::StandardNormal.sample(rng))
            .collect();
        let shift = l.back_solve_transpose(&z);
        (0..k).map(|i| mu[i] + shift[i]).collect()
    }

    fn support(&self, _params: &Params) -> (Option<f64>, Option<f64>) {
        (None, None)
    }

    fn is_discrete(&self) -> bool {
        false
    }

    fn degrees_of_freedom(&self, param_lens: &[usize]) -> usize {
        param_lens[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_density_matches_closed_form_at_the_mean() {
        let params: [&[f64]; 2] = [&[0.0], &[1.0]];
        let ld = Norm.log_density(&[0.0], &params);
        assert!((ld - (-0.5 * std::f64::consts::TAU.ln())).abs() < 1e-9);
    }

    #[test]
    fn rejects_nonpositive_precision() {
        let params: [&[f64]; 2] = [&[0.0], &[-1.0]];
        assert!(!Norm.check_param_values(&params));
    }

    #[test]
    fn mnorm_reduces_to_univariate_when_k_is_one() {
        let params: [&[f64]; 2] = [&[1.0], &[2.0]];
        let ld_m = MNorm.log_density(&[1.5], &params);
        let ld_u = Norm.log_density(&[1.5], &params);
        assert!((ld_m - ld_u).abs() < 1e-9);
    }
}

//! The `Distribution` contract of §4.B: a stateless, shared, named
//! density that the registry hands out by reference.

use rand::RngCore;

/// A distribution's parameters are always passed as a slice of
/// component slices, in the declaration order of the BUGS relation
/// (e.g. `dnorm(mu, tau)` passes `&[mu_values, tau_values]`).
pub type Params<'a> = [&'a [f64]];

pub trait Distribution: Send + Sync {
    /// The name used to look this distribution up in the registry, e.g. `"dnorm"`.
    fn name(&self) -> &'static str;

    /// True if `param_lens` (the length of each parameter vector, in
    /// order) is an acceptable arity/shape for this distribution.
    fn check_param_dims(&self, param_lens: &[usize]) -> bool;

    /// True if the parameter *values* are valid (e.g. precision > 0).
    fn check_param_values(&self, params: &Params) -> bool;

    /// Log-density of `x` given `params`, ignoring truncation.
    fn log_density(&self, x: &[f64], params: &Params) -> f64;

    /// Log-density of `x` given `params`, normalized for truncation to
    /// `[lower, upper]`. The default divides by the truncated mass
    /// using `cdf`; distributions without a closed-form `cdf` must
    /// override.
    fn log_density_truncated(
        &self,
        x: &[f64],
        params: &Params,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> f64 {
        if lower.is_none() && upper.is_none() {
            return self.log_density(x, params);
        }
        let plower = lower.map_or(0.0, |l| self.cdf(l, params));
        let pupper = upper.map_or(1.0, |u| self.cdf(u, params));
        self.log_density(x, params) - (pupper - plower).ln()
    }

    /// Cumulative distribution function at a scalar point (only
    /// meaningful for univariate distributions; multivariate
    /// distributions may panic).
    fn cdf(&self, x: f64, params: &Params) -> f64;

    /// Inverse CDF / quantile function (scalar, as with `cdf`).
    fn quantile(&self, p: f64, params: &Params) -> f64;

    /// Draws a value from the distribution's support.
    fn sample(&self, rng: &mut dyn RngCore, params: &Params) -> Vec<f64>;

    /// Componentwise support bounds, `(lower, upper)`, where present.
    fn support(&self, params: &Params) -> (Option<f64>, Option<f64>);

    fn is_discrete(&self) -> bool;

    /// Degrees of freedom: for most distributions this is the output
    /// length; rank-deficient distributions (e.g. a Dirichlet with a
    /// structural zero) may report fewer.
    fn degrees_of_freedom(&self, param_lens: &[usize]) -> usize;
}

use rand::{Rng, RngCore};
use statrs::function::gamma::ln_gamma;

use crate::distribution::{Distribution, Params};

/// `dcat(p)`: categorical over `{1, ..., k}` (1-based, as BUGS
/// indices variables), with unnormalized weights normalized on use.
pub struct Categorical;

fn normalized(p: &[f64]) -> Vec<f64> {
    let total: f64 = p.iter().sum();
    p.iter().map(|&v| v / total).collect()
}

impl Distribution for Categorical {
    fn name(&self) -> &'static str {
        "dcat"
    }

    fn check_param_dims(&self, param_lens: &[usize]) -> bool {
        param_lens.len() == 1 && param_lens[0] >= 1
    }

    fn check_param_values(&self, params: &Params) -> bool {
        params[0].iter().all(|&p| p >= 0.0) && params[0].iter().any(|&p| p > 0.0)
    }

    fn log_density(&self, x: &[f64], params: &Params) -> f64 {
        let p = normalized(params[0]);
        let k = x[0].round() as isize - 1;
        if k < 0 || k as usize >= p.len() {
            return f64::NEG_INFINITY;
        }
        p[k as usize].ln()
    }

    fn cdf(&self, x: f64, params: &Params) -> f64 {
        let p = normalized(params[0]);
        let k = x.floor() as isize;
        if k < 1 {
            0.0
        } else {
            p.iter().take(k as usize).sum()
        }
    }

    fn quantile(&self, q: f64, params: &Params) -> f64 {
        let p = normalized(params[0]);
        let mut acc = 0.0;
        for (i, &pi) in p.iter().enumerate() {
            acc += pi;
            if q <= acc {
                return (i + 1) as f64;
            }
        }
        p.len() as f64
    }

    fn sample(&self, rng: &mut dyn RngCore, params: &Params) -> Vec<f64> {
        let p = normalized(params[0]);
        let u: f64 = rng.random();
        let mut acc = 0.0;
        for (i, &pi) in p.iter().enumerate() {
            acc += pi;
            if u <= acc {
                return vec![(i + 1) as f64];
            }
        }
        vec![p.len() as f64]
    }

    fn support(&self, params: &Params) -> (Option<f64>, Option<f64>) {
        (Some(1.0), Some(params[0].len() as f64))
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn degrees_of_freedom(&self, _param_lens: &[usize]) -> usize {
        1
    }
}

/// `dmulti(p, n)`: multinomial counts over `k` categories summing to `n`.
pub struct Multinomial;

impl Distribution for Multinomial {
    fn name(&self) -> &'static str {
        "dmulti"
    }

    fn check_param_dims(&self, param_lens: &[usize]) -> bool {
        param_lens.len() == 2 && param_lens[0] >= 1 && param_lens[1] == 1
    }

    fn check_param_values(&self, params: &Params) -> bool {
        params[0].iter().all(|&p| p >= 0.0) && params[1][0] >= 0.0
    }

    fn log_density(&self, x: &[f64], params: &Params) -> f64 {
        let p = normalized(params[0]);
        let n: f64 = x.iter().sum();
        let mut ld = ln_gamma(n + 1.0);
        for (xi, pi) in x.iter().zip(p.iter()) {
            ld -= ln_gamma(xi + 1.0);
            if *xi > 0.0 {
                ld += xi * pi.ln();
            }
        }
        ld
    }

    fn cdf(&self, _x: f64, _params: &Params) -> f64 {
        unimplemented!("dmulti has no scalar cdf")
    }

    fn quantile(&self, _p: f64, _params: &Params) -> f64 {
        unimplemented!("dmulti has no scalar quantile")
    }

    fn sample(&self, rng: &mut dyn RngCore, params: &Params) -> Vec<f64> {
        let p = normalized(params[0]);
        let n = params[1][0].round() as usize;
        let mut counts = vec![0.0; p.len()];
        for _ in 0..n {
            let u: f64 = rng.random();
            let mut acc = 0.0;
            for (i, &pi) in p.iter().enumerate() {
                acc += pi;
                if u <= acc {
                    counts[i] += 1.0;
                    break;
                }
            }
        }
        counts
    }

    fn support(&self, _params: &Params) -> (Option<f64>, Option<f64>) {
        (Some(0.0), None)
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn degrees_of_freedom(&self, param_lens: &[usize]) -> usize {
        param_lens[0].saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorical_normalizes_unnormalized_weights() {
        let params: [&[f64]; 1] = [&[1.0, 1.0, 2.0]];
        let ld = Categorical.log_density(&[3.0], &params);
        assert!((ld - 0.5_f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn multinomial_counts_must_sum_consistently() {
        let p: [&[f64]; 2] = [&[0.25, 0.25, 0.5], &[100.0]];
        let ld = Multinomial.log_density(&[25.0, 25.0, 50.0], &p);
        assert!(ld.is_finite());
    }
}

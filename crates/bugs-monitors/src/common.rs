//! Shared helpers for evaluating a stochastic node's (truncated)
//! log-density against a chain's slice of the value arena (§4.J).

use bugs_core::{Graph, NodeId, NodeKind, ValueArena};

/// `log p(x | parents)`, truncation-adjusted, for a stochastic node on
/// one chain. `0.0` for any other kind — monitors only ever observe
/// stochastic nodes, but callers may hand in a mixed node list without
/// filtering first.
pub fn node_log_density(graph: &Graph, node: NodeId, arena: &ValueArena, chain: usize) -> f64 {
    let n = graph.get(node);
    let NodeKind::Stochastic(spec) = &n.kind else { return 0.0 };
    let params: Vec<&[f64]> = n.parents.iter().map(|&p| arena.read(p, chain)).collect();
    let x = arena.read(node, chain);
    let (lower, upper) = spec.truncation;
    spec.distribution.log_density_truncated(x, &params, lower, upper)
}

/// The Normal distribution's mean/precision parents, when `node` is a
/// `dnorm` stochastic node — used by [`crate::klpd`]'s closed-form KL.
pub fn normal_mean_precision(graph: &Graph, node: NodeId, arena: &ValueArena, chain: usize) -> Option<(f64, f64)> {
    let n = graph.get(node);
    let NodeKind::Stochastic(spec) = &n.kind else { return None };
    if spec.distribution.name() != "dnorm" {
        return None;
    }
    let mu = arena.read(n.parents[0], chain)[0];
    let tau = arena.read(n.parents[1], chain)[0];
    Some((mu, tau))
}

/// Symmetric KL divergence between two univariate Normals given in
/// mean/precision form, `KL(p||q) + KL(q||p)`.
pub fn normal_symmetric_kl(mu1: f64, tau1: f64, mu2: f64, tau2: f64) -> f64 {
    let var1 = 1.0 / tau1;
    let var2 = 1.0 / tau2;
    let kl_pq = 0.5 * (-(var2 / var1).ln() + (var1 + (mu1 - mu2).powi(2)) / var2 - 1.0);
    let kl_qp = 0.5 * (-(var1 / var2).ln() + (var2 + (mu2 - mu1).powi(2)) / var1 - 1.0);
    kl_pq + kl_qp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_kl_is_zero_for_identical_normals() {
        let kl = normal_symmetric_kl(0.0, 1.0, 0.0, 1.0);
        assert!(kl.abs() < 1e-12);
    }

    #[test]
    fn symmetric_kl_is_positive_for_distinct_normals() {
        let kl = normal_symmetric_kl(0.0, 1.0, 1.0, 1.0);
        assert!(kl > 0.0);
    }
}

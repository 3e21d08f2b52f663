//! Node taxonomy (§4.C): a tagged variant closed over the seven
//! concrete kinds, per DESIGN NOTES ("Polymorphic nodes") — shared
//! state (name, shape, parent list) lives on [`Node`] itself, kind
//! behavior is a plain match over [`NodeKind`].

mod kind;
mod mark;

use std::sync::Arc;

pub use bugs_utils::ArenaKey as NodeId;
pub use kind::{
    AggregateSpec, DevianceSpec, GatherSpec, LinkSpec, LogicalSpec, MixtureSpec, NodeKind,
    StochasticSpec,
};
pub use mark::Mark;

use kind::{is_contiguous_block, single_true};

pub struct Node {
    pub name: Arc<str>,
    pub dim: Vec<usize>,
    pub parents: Vec<NodeId>,
    pub kind: NodeKind,
    discrete: bool,
}

impl Node {
    /// `parent_discrete` is each parent's own (already-derived)
    /// discreteness, in the same order as `parents`.
    pub fn new(
        name: Arc<str>,
        dim: Vec<usize>,
        parents: Vec<NodeId>,
        kind: NodeKind,
        parent_discrete: &[bool],
    ) -> Self {
        assert!(!dim.is_empty(), "node dimension must be nonempty");
        assert!(dim.iter().all(|&d| d > 0), "node dimensions must be positive");
        let discrete = kind.derive_discrete(parent_discrete);
        Self { name, dim, parents, kind, discrete }
    }

    pub fn len(&self) -> usize {
        self.dim.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_observed(&self) -> bool {
        matches!(&self.kind, NodeKind::Stochastic(s) if s.observed)
    }

    /// (i) Recompute this node's value from its parents' current
    /// values. A no-op for `Constant`/`Stochastic` nodes, whose value
    /// is written by construction or by a sampler, not recomputed.
    pub fn deterministic_sample(&self, parent_values: &[&[f64]]) -> Option<Vec<f64>> {
        match &self.kind {
            NodeKind::Constant | NodeKind::Stochastic(_) => None,
            NodeKind::Logical(spec) => Some(spec.function.evaluate(parent_values)),
            NodeKind::Link(spec) => {
                Some(parent_values[0].iter().map(|&eta| spec.function.inverse(eta)).collect())
            }
            NodeKind::Aggregate(spec) => Some(
                spec.gather
                    .iter()
                    .map(|&(parent, offset)| parent_values[parent][offset])
                    .collect(),
            ),
            NodeKind::Mixture(spec) => {
                let index: Vec<usize> = spec
                    .index_parents
                    .iter()
                    .map(|&p| parent_values[p][0].round() as usize - 1)
                    .collect();
                // A one-dimensional mixture selects one whole choice parent by
                // the (single) index; multi-way indices compose lexically.
                let selected = spec.choice_parents[index[0].min(spec.choice_parents.len() - 1)];
                Some(parent_values[selected].to_vec())
            }
            NodeKind::Deviance(spec) => {
                // Deviance parents are (density, params...) pairs; the
                // registry/graph view is responsible for having already
                // computed each contributor's log-density into its own
                // stochastic node rather than here. This node instead
                // receives, per contributor, that node's *current*
                // log-density as a single scalar parent value.
                let total: f64 = spec.contributors.iter().map(|&p| parent_values[p][0]).sum();
                Some(vec![-2.0 * total])
            }
        }
    }

    /// (ii) True if the parents' current values lie within the kind's
    /// domain (e.g. a stochastic node's parameter validity check).
    pub fn check_parent_values(&self, parent_values: &[&[f64]]) -> bool {
        match &self.kind {
            NodeKind::Constant => true,
            NodeKind::Stochastic(spec) => spec.distribution.check_param_values(parent_values),
            NodeKind::Logical(spec) => spec.function.check_param_values(parent_values),
            NodeKind::Link(spec) => spec.function.check_param_values(parent_values),
            NodeKind::Aggregate(_) => true,
            NodeKind::Mixture(spec) => spec
                .index_parents
                .iter()
                .all(|&p| parent_values[p][0].fract() == 0.0 && parent_values[p][0] >= 1.0),
            NodeKind::Deviance(_) => true,
        }
    }

    /// (iii) Is this node linear in whichever parents are marked
    /// `true` in `mask` (others held fixed/constant)? `fixed` asks
    /// additionally whether the linear coefficients are themselves
    /// independent of the in-play parents' values (§4.G, ConjugateNormal
    /// coefficient caching).
    pub fn is_linear(&self, mask: &[bool], fixed: bool) -> bool {
        match &self.kind {
            NodeKind::Constant | NodeKind::Stochastic(_) => true,
            NodeKind::Logical(spec) => spec.function.is_linear(mask, fixed),
            NodeKind::Link(spec) => spec.function.is_linear(mask, fixed),
            NodeKind::Aggregate(spec) => match single_true(mask) {
                None => mask.iter().all(|&m| !m),
                Some(p) => is_contiguous_block(&spec.gather, p),
            },
            NodeKind::Mixture(spec) => {
                let any_index_in_play = spec.index_parents.iter().any(|&p| mask[p]);
                if any_index_in_play {
                    return false;
                }
                spec.choice_parents.iter().filter(|&&p| mask[p]).count() <= 1
            }
            NodeKind::Deviance(_) => false,
        }
    }

    /// (iv) Is this node a pure scale (multiplicative, zero-intercept)
    /// transform of whichever single parent is marked `true`?
    pub fn is_scale(&self, mask: &[bool], fixed: bool) -> bool {
        match &self.kind {
            NodeKind::Constant | NodeKind::Stochastic(_) => true,
            NodeKind::Logical(spec) => match single_true(mask) {
                Some(idx) => spec.function.is_scale(idx, fixed),
                None => mask.iter().all(|&m| !m),
            },
            NodeKind::Link(_) => false,
            NodeKind::Aggregate(spec) => match single_true(mask) {
                None => mask.iter().all(|&m| !m),
                Some(p) => is_contiguous_block(&spec.gather, p),
            },
            NodeKind::Mixture(_) => false,
            NodeKind::Deviance(_) => false,
        }
    }

    /// (v) Is this node's value constrained to the integers?
    pub fn is_discrete_valued(&self) -> bool {
        self.discrete
    }

    /// (vi) A diagnostic rendering of this node's definition, e.g.
    /// `mu ~ dnorm(0, 0.0001)` or `eta <- alpha + beta`.
    pub fn deparse(&self, parent_names: &[&str]) -> String {
        match &self.kind {
            NodeKind::Constant => self.name.to_string(),
            NodeKind::Stochastic(spec) => {
                format!("{} ~ {}({})", self.name, spec.distribution.name(), parent_names.join(", "))
            }
            NodeKind::Logical(spec) => {
                format!("{} <- {}({})", self.name, spec.function.name(), parent_names.join(", "))
            }
            NodeKind::Link(spec) => {
                format!("{}({}) <- {}", spec.function.name(), self.name, parent_names.join(", "))
            }
            NodeKind::Aggregate(_) => {
                format!("{} <- c({})", self.name, parent_names.join(", "))
            }
            NodeKind::Mixture(_) => {
                format!("{} <- mixture({})", self.name, parent_names.join(", "))
            }
            NodeKind::Deviance(_) => {
                format!("{} <- deviance({})", self.name, parent_names.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugs_dist::Norm;

    fn leaf(name: &str) -> Node {
        Node::new(Arc::from(name), vec![1], vec![], NodeKind::Constant, &[])
    }

    #[test]
    fn constant_node_never_recomputes() {
        let n = leaf("c");
        assert!(n.deterministic_sample(&[]).is_none());
    }

    #[test]
    fn stochastic_node_checks_distribution_params() {
        let n = Node::new(
            Arc::from("mu"),
            vec![1],
            vec![],
            NodeKind::Stochastic(StochasticSpec {
                distribution: Arc::new(Norm),
                truncation: (None, None),
                observed: false,
            }),
            &[],
        );
        let params: [&[f64]; 2] = [&[0.0], &[-1.0]];
        assert!(!n.check_parent_values(&params));
    }

    #[test]
    fn deviance_node_is_never_linear_or_scale() {
        let n = Node::new(
            Arc::from("dev"),
            vec![1],
            vec![],
            NodeKind::Deviance(DevianceSpec { contributors: vec![0] }),
            &[],
        );
        assert!(!n.is_linear(&[true], false));
        assert!(!n.is_scale(&[true], false));
        assert!(!n.is_discrete_valued());
    }

    #[test]
    fn aggregate_is_linear_only_for_a_contiguous_single_parent_block() {
        let n = Node::new(
            Arc::from("agg"),
            vec![2],
            vec![],
            NodeKind::Aggregate(AggregateSpec { gather: vec![(0, 0), (0, 1)] }),
            &[],
        );
        assert!(n.is_linear(&[true], false));

        let gapped = Node::new(
            Arc::from("agg2"),
            vec![2],
            vec![],
            NodeKind::Aggregate(AggregateSpec { gather: vec![(0, 0), (0, 2)] }),
            &[],
        );
        assert!(!gapped.is_linear(&[true], false));
    }
}

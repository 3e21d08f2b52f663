use std::sync::Arc;

use bugs_dist::{Distribution, Function, Link};

/// A stochastic node's distribution reference, truncation bounds, and
/// observed/unobserved status (§3, Node).
pub struct StochasticSpec {
    pub distribution: Arc<dyn Distribution>,
    pub truncation: (Option<f64>, Option<f64>),
    pub observed: bool,
}

pub struct LogicalSpec {
    pub function: Arc<dyn Function>,
}

/// A link node: a [`LogicalSpec`]-like delegate specialized to a
/// scalar inverse-link function, retaining the link's name for
/// diagnostics (`deparse`).
pub struct LinkSpec {
    pub function: Arc<dyn Link>,
}

/// One output position of an aggregate node: which parent (by index
/// into the node's parent list) and which flattened offset within
/// that parent supplies this position's value.
pub type GatherSpec = Vec<(usize, usize)>;

pub struct AggregateSpec {
    pub gather: GatherSpec,
}

/// A mixture node selects one whole parent ("choice") based on an
/// index computed from other parents ("index"). Both are recorded as
/// indices into the node's parent list.
pub struct MixtureSpec {
    pub index_parents: Vec<usize>,
    pub choice_parents: Vec<usize>,
}

/// A deviance node's contributing stochastic parents, as indices into
/// the node's parent list (§3: value = -2 * sum log-density(parent_i)).
pub struct DevianceSpec {
    pub contributors: Vec<usize>,
}

pub enum NodeKind {
    Constant,
    Stochastic(StochasticSpec),
    Logical(LogicalSpec),
    Link(LinkSpec),
    Aggregate(AggregateSpec),
    Mixture(MixtureSpec),
    Deviance(DevianceSpec),
}

impl NodeKind {
    pub fn is_stochastic(&self) -> bool {
        matches!(self, NodeKind::Stochastic(_))
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(
            self,
            NodeKind::Logical(_)
                | NodeKind::Link(_)
                | NodeKind::Aggregate(_)
                | NodeKind::Mixture(_)
                | NodeKind::Deviance(_)
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeKind::Constant => "constant",
            NodeKind::Stochastic(_) => "stochastic",
            NodeKind::Logical(_) => "logical",
            NodeKind::Link(_) => "link",
            NodeKind::Aggregate(_) => "aggregate",
            NodeKind::Mixture(_) => "mixture",
            NodeKind::Deviance(_) => "deviance",
        }
    }

    /// Derives this node's discreteness flag from its kind and its
    /// parents' own (already-derived) discreteness, once, at
    /// construction (§3: "a discreteness flag derived from its kind").
    pub fn derive_discrete(&self, parent_discrete: &[bool]) -> bool {
        match self {
            NodeKind::Constant => false,
            NodeKind::Stochastic(spec) => spec.distribution.is_discrete(),
            NodeKind::Logical(spec) => spec.function.is_discrete(parent_discrete),
            NodeKind::Link(_) => false,
            NodeKind::Aggregate(_) => parent_discrete.iter().all(|&d| d),
            NodeKind::Mixture(spec) => spec.choice_parents.iter().all(|&p| parent_discrete[p]),
            // Open question (§9): the source left deviance discreteness
            // unstated; resolved continuous per JAGS's DevianceNode.
            NodeKind::Deviance(_) => false,
        }
    }
}

/// Of the parents marked `mask[i] == true`, returns the single in-play
/// parent index, or `None` if zero or more than one are in play.
pub(super) fn single_true(mask: &[bool]) -> Option<usize> {
    let mut found = None;
    for (i, &m) in mask.iter().enumerate() {
        if m {
            if found.is_some() {
                return None;
            }
            found = Some(i);
        }
    }
    found
}

/// A contiguous, ascending, order-preserving run of offsets for one
/// parent's contribution to an aggregate's gather — the structural
/// condition §4.C and the ConjugateDirichlet allowed-path both need.
pub(super) fn is_contiguous_block(gather: &GatherSpec, parent: usize) -> bool {
    let mut offsets: Vec<usize> = gather
        .iter()
        .filter(|(p, _)| *p == parent)
        .map(|(_, o)| *o)
        .collect();
    if offsets.is_empty() {
        return true;
    }
    offsets.sort_unstable();
    offsets.windows(2).all(|w| w[1] == w[0] + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_true_rejects_multiple_marks() {
        assert_eq!(single_true(&[true, false, true]), None);
        assert_eq!(single_true(&[false, true, false]), Some(1));
        assert_eq!(single_true(&[false, false]), None);
    }

    #[test]
    fn contiguous_block_detects_gaps() {
        let gather = vec![(0, 0), (0, 1), (0, 2), (1, 0)];
        assert!(is_contiguous_block(&gather, 0));
        let gapped = vec![(0, 0), (0, 2)];
        assert!(!is_contiguous_block(&gapped, 0));
    }
}

//! `ConjugateDirichlet` (§4.G): closed-form Dirichlet-posterior update
//! for a target whose stochastic children are Categorical or
//! Multinomial and reach the target only through an "allowed path" —
//! a tree of Aggregate nodes embedding the target contiguously in
//! ascending order, optionally composed with Mixture nodes whose
//! index does not itself depend on the target.

use std::collections::HashMap;

use rand::RngCore;
use rand_distr::{Distribution as _, Gamma};

use bugs_core::{ChainValues, Graph, GraphView, NodeId, NodeKind};
use bugs_dist::Distribution;
use bugs_error::BugsError;

use crate::framework::SampleMethod;

/// A mixture node that must currently have `required_branch` selected
/// for this child's contribution to flow from the target at all
/// (§4.G: "if any mixture on the path is currently switched to a
/// sibling component, skip that child's contribution").
struct MixtureGate {
    mixture_node: NodeId,
    required_branch: usize,
}

enum ChildKind {
    Categorical,
    Multinomial,
}

/// One stochastic child reached via an allowed path: `offsets[j]` is
/// the target component supplying position `j` of the node that feeds
/// the child's probability argument, or `None` if that position isn't
/// target-derived (§4.G's `_off[i]`).
struct DirichletChild {
    child: NodeId,
    kind: ChildKind,
    offsets: Vec<Option<usize>>,
    gates: Vec<MixtureGate>,
}

pub struct ConjugateDirichlet {
    target: NodeId,
    k: usize,
    view: GraphView,
    children: Vec<DirichletChild>,
}

/// Resolves how `node`'s own value vector maps back to `target`'s `k`
/// components, recursing through Aggregate and Mixture nodes only
/// (§4.G's allowed path). Returns `None` if `node` doesn't derive from
/// `target` along an allowed path at all.
fn resolve(
    graph: &Graph,
    node: NodeId,
    target: NodeId,
    k: usize,
) -> Option<(Vec<Option<usize>>, Vec<MixtureGate>)> {
    if node == target {
        return Some(((0..k).map(Some).collect(), Vec::new()));
    }
    let n = graph.get(node);
    match &n.kind {
        NodeKind::Aggregate(spec) => {
            let mut by_parent: HashMap<usize, Vec<(usize, usize)>> = HashMap::new();
            for (out_idx, &(p_idx, p_off)) in spec.gather.iter().enumerate() {
                by_parent.entry(p_idx).or_default().push((out_idx, p_off));
            }
            let mut offsets = vec![None; n.len()];
            let mut gates = Vec::new();
            let mut any = false;
            for (p_idx, mut entries) in by_parent {
                let parent_id = n.parents[p_idx];
                if let Some((parent_offsets, parent_gates)) = resolve(graph, parent_id, target, k) {
                    // §4.G allowed path: the target must be embedded
                    // contiguously and in ascending order, never permuted.
                    entries.sort_unstable_by_key(|&(out_idx, _)| out_idx);
                    let ascending = entries.windows(2).all(|w| w[1].1 == w[0].1 + 1);
                    if !ascending {
                        return None;
                    }
                    any = true;
                    for (out_idx, p_off) in entries {
                        offsets[out_idx] = parent_offsets.get(p_off).copied().flatten();
                    }
                    gates.extend(parent_gates);
                }
            }
            any.then_some((offsets, gates))
        }
        NodeKind::Mixture(spec) => {
            // §9: "index parents that themselves depend on the target"
            // disqualify the path entirely — a mixture whose selector
            // is target-derived isn't a fixed gate, it's a feedback loop.
            let index_depends_on_target = spec
                .index_parents
                .iter()
                .any(|&idx| resolve(graph, n.parents[idx], target, k).is_some());
            if index_depends_on_target {
                return None;
            }
            for (branch, &choice_idx) in spec.choice_parents.iter().enumerate() {
                let parent_id = n.parents[choice_idx];
                if let Some((parent_offsets, mut parent_gates)) = resolve(graph, parent_id, target, k) {
                    parent_gates.push(MixtureGate { mixture_node: node, required_branch: branch });
                    return Some((parent_offsets, parent_gates));
                }
            }
            None
        }
        _ => None,
    }
}

fn gate_is_active(graph: &Graph, gates: &[MixtureGate], values: &dyn ChainValues) -> bool {
    gates.iter().all(|g| {
        let mix = graph.get(g.mixture_node);
        let NodeKind::Mixture(spec) = &mix.kind else { return false };
        let index: usize = spec
            .index_parents
            .iter()
            .map(|&p| values.read(mix.parents[p])[0].round() as usize - 1)
            .next()
            .unwrap_or(0);
        index == g.required_branch
    })
}

impl ConjugateDirichlet {
    pub fn can_sample(target: NodeId, graph: &Graph) -> bool {
        let node = graph.get(target);
        let NodeKind::Stochastic(spec) = &node.kind else { return false };
        if spec.distribution.name() != "ddirch" {
            return false;
        }
        let k = node.len();
        let view = GraphView::build(graph, vec![target]);
        for &child_id in view.stochastic_children() {
            let child = graph.get(child_id);
            let NodeKind::Stochastic(cspec) = &child.kind else { return false };
            if cspec.distribution.name() != "dcat" && cspec.distribution.name() != "dmulti" {
                return false;
            }
            if resolve(graph, child.parents[0], target, k).is_none() {
                return false;
            }
        }
        true
    }

    pub fn new(target: NodeId, graph: &Graph) -> Self {
        assert!(Self::can_sample(target, graph), "ConjugateDirichlet requires can_sample");
        let k = graph.get(target).len();
        let view = GraphView::build(graph, vec![target]);

        let children = view
            .stochastic_children()
            .iter()
            .map(|&child_id| {
                let child = graph.get(child_id);
                let (offsets, gates) = resolve(graph, child.parents[0], target, k)
                    .expect("can_sample already verified an allowed path exists");
                let kind = match child.kind {
                    NodeKind::Stochastic(ref s) if s.distribution.name() == "dcat" => ChildKind::Categorical,
                    _ => ChildKind::Multinomial,
                };
                DirichletChild { child: child_id, kind, offsets, gates }
            })
            .collect();

        Self { target, k, view, children }
    }
}

impl SampleMethod for ConjugateDirichlet {
    fn update(
        &mut self,
        graph: &Graph,
        _view: &GraphView,
        values: &mut dyn ChainValues,
        rng: &mut dyn RngCore,
    ) -> bugs_error::BugsResult<()> {
        let node = graph.get(self.target);
        let NodeKind::Stochastic(spec) = &node.kind else { unreachable!("target must be stochastic") };
        let alpha0 = values.read(node.parents[0]).to_vec();

        let mut posterior = alpha0.clone();
        for child in &self.children {
            if !gate_is_active(graph, &child.gates, values) {
                continue;
            }
            match child.kind {
                ChildKind::Categorical => {
                    let selected = values.read(child.child)[0].round() as usize - 1;
                    if let Some(Some(comp)) = child.offsets.get(selected) {
                        posterior[*comp] += 1.0;
                    }
                }
                ChildKind::Multinomial => {
                    let counts = values.read(child.child).to_vec();
                    for (off, &c) in counts.iter().enumerate() {
                        if let Some(Some(comp)) = child.offsets.get(off) {
                            posterior[*comp] += c;
                        }
                    }
                }
            }
        }

        for (i, &a0) in alpha0.iter().enumerate() {
            if a0 == 0.0 && posterior[i] != 0.0 {
                return Err(BugsError::InvalidConstraint {
                    component: "ConjugateDirichlet".into(),
                    message: format!(
                        "structural-zero component {i} received nonzero accumulated count {}",
                        posterior[i]
                    )
                    .into(),
                    node: Some(node.name.to_string().into()),
                });
            }
        }

        let draws: Vec<f64> = posterior
            .iter()
            .map(|&a| if a == 0.0 { 0.0 } else { Gamma::new(a, 1.0).expect("positive shape").sample(rng) })
            .collect();
        let total: f64 = draws.iter().sum();
        let new_value: Vec<f64> = draws.iter().map(|&d| d / total).collect();

        let _ = spec;
        let _ = self.k;
        values.write(self.target, &new_value);
        self.view.recompute_closure(graph, values);
        Ok(())
    }

    fn is_adaptive(&self) -> bool {
        false
    }

    fn adapt_off(&mut self) {}

    fn check_adaptation(&mut self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "ConjugateDirichlet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugs_core::{Node, StochasticSpec, ValueArena};
    use bugs_dist::{Categorical, Dirichlet};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    fn build_dcat_model(counts: &[(usize, usize)]) -> (Graph, NodeId, ValueArena) {
        let mut g = Graph::new();
        let alpha = g.add_node(Node::new(Arc::from("alpha"), vec![4], vec![], NodeKind::Constant, &[]));
        let p = g.add_node(Node::new(
            Arc::from("p"),
            vec![4],
            vec![alpha],
            NodeKind::Stochastic(StochasticSpec {
                distribution: Arc::new(Dirichlet),
                truncation: (None, None),
                observed: false,
            }),
            &[false],
        ));
        let mut ids = Vec::new();
        for &(category, n) in counts {
            for _ in 0..n {
                let y = g.add_node(Node::new(
                    Arc::from(format!("y{}", ids.len()).as_str()),
                    vec![1],
                    vec![p],
                    NodeKind::Stochastic(StochasticSpec {
                        distribution: Arc::new(Categorical),
                        truncation: (None, None),
                        observed: true,
                    }),
                    &[false],
                ));
                ids.push((y, category));
            }
        }
        let dims = g.dims();
        let mut arena = ValueArena::new(1, &dims);
        arena.write(alpha, 0, &[1.0, 1.0, 1.0, 1.0]);
        arena.write(p, 0, &[0.25, 0.25, 0.25, 0.25]);
        for (y, category) in &ids {
            arena.write(*y, 0, &[(*category + 1) as f64]);
        }
        (g, p, arena)
    }

    #[test]
    fn can_sample_accepts_a_direct_categorical_chain() {
        let (g, p, _arena) = build_dcat_model(&[(0, 40), (1, 20), (2, 30), (3, 10)]);
        assert!(ConjugateDirichlet::can_sample(p, &g));
    }

    #[test]
    fn posterior_mean_tracks_observed_category_counts() {
        let (g, p, mut arena) = build_dcat_model(&[(0, 40), (1, 20), (2, 30), (3, 10)]);
        let mut method = ConjugateDirichlet::new(p, &g);
        let mut rng = StdRng::seed_from_u64(5);
        let view = GraphView::build(&g, vec![p]);
        let mut chain = arena.chain_mut(0);

        let mut running = vec![0.0; 4];
        let n_iter = 2000;
        for _ in 0..n_iter {
            method.update(&g, &view, &mut chain, &mut rng).unwrap();
            let v = chain.read(p);
            for i in 0..4 {
                running[i] += v[i];
            }
            let sum: f64 = v.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
        let mean: Vec<f64> = running.iter().map(|&r| r / n_iter as f64).collect();
        let expected = [41.0 / 104.0, 21.0 / 104.0, 31.0 / 104.0, 11.0 / 104.0];
        for (m, e) in mean.iter().zip(expected.iter()) {
            assert!((m - e).abs() < 0.05, "{m} vs {e}");
        }
    }
}

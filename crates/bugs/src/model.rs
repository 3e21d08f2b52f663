//! Model construction (§6 "create model from parse tree"): since the
//! BUGS parser is an external collaborator (§1 Non-goals), this
//! exposes the programmatic graph-construction surface a parser would
//! call into — one method per node kind of §4.C — plus data binding
//! and the two-stage `compile`/`initialize` finalization of §6.

use std::collections::HashMap;
use std::sync::Arc;

use bugs_core::{
    AggregateSpec, DevianceSpec, GatherSpec, Graph, LinkSpec, LogicalSpec, MixtureSpec, Node,
    NodeId, NodeKind, StochasticSpec,
};
use bugs_dist::{DistRegistry, FnRegistry};
use bugs_error::{BugsError, BugsResult};
use bugs_utils::SArray;

use crate::config::SimulationConfig;
use crate::simulation::Simulation;

/// Accumulates node declarations into a [`Graph`], resolving parent
/// names and distribution/function names against the built-in
/// registries as each node is added — mirroring how the (external)
/// parser's `RELATIONS` pass would feed this same surface node by
/// node, in declaration order.
pub struct ModelBuilder {
    graph: Graph,
    dist_registry: DistRegistry,
    fn_registry: FnRegistry,
    errors: Vec<BugsError>,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            dist_registry: DistRegistry::with_builtins(),
            fn_registry: FnRegistry::with_builtins(),
            errors: Vec::new(),
        }
    }

    fn resolve(&mut self, component: &'static str, name: &str, names: &[&str]) -> Option<Vec<NodeId>> {
        let mut ids = Vec::with_capacity(names.len());
        let mut ok = true;
        for &p in names {
            match self.graph.by_name(p) {
                Some(id) => ids.push(id),
                None => {
                    ok = false;
                    self.errors.push(bugs_error::bugs_err!(
                        DimensionMismatch,
                        component,
                        node: name.to_string(),
                        "unresolved parent name '{p}'"
                    ));
                }
            }
        }
        ok.then_some(ids)
    }

    fn parent_discrete(&self, parents: &[NodeId]) -> Vec<bool> {
        parents.iter().map(|&p| self.graph.get(p).is_discrete_valued()).collect()
    }

    /// A fixed-value leaf node (§3, `VAR` without a stochastic relation).
    pub fn constant(mut self, name: &str, dim: Vec<usize>) -> Self {
        self.graph.add_node(Node::new(Arc::from(name), dim, vec![], NodeKind::Constant, &[]));
        self
    }

    /// A `lhs ~ dist(parents...)` relation, optionally truncated and/or observed.
    pub fn stochastic(
        mut self,
        name: &str,
        dist: &str,
        dim: Vec<usize>,
        parents: &[&str],
        observed: bool,
        truncation: (Option<f64>, Option<f64>),
    ) -> Self {
        let Some(ids) = self.resolve("ModelBuilder::stochastic", name, parents) else { return self };
        let Some(distribution) = self.dist_registry.get(dist) else {
            self.errors.push(bugs_error::bugs_err!(
                InvalidParameter,
                "ModelBuilder::stochastic",
                node: name.to_string(),
                "unknown distribution '{dist}'"
            ));
            return self;
        };
        let parent_discrete = self.parent_discrete(&ids);
        let kind = NodeKind::Stochastic(StochasticSpec { distribution, truncation, observed });
        self.graph.add_node(Node::new(Arc::from(name), dim, ids, kind, &parent_discrete));
        self
    }

    /// A `lhs <- f(parents...)` deterministic relation.
    pub fn logical(mut self, name: &str, func: &str, parents: &[&str]) -> Self {
        let Some(ids) = self.resolve("ModelBuilder::logical", name, parents) else { return self };
        let Some(function) = self.fn_registry.get(func) else {
            self.errors.push(bugs_error::bugs_err!(
                InvalidParameter,
                "ModelBuilder::logical",
                node: name.to_string(),
                "unknown function '{func}'"
            ));
            return self;
        };
        let arg_lens: Vec<usize> = ids.iter().map(|&p| self.graph.get(p).len()).collect();
        let dim = function.output_dim(&arg_lens);
        let parent_discrete = self.parent_discrete(&ids);
        let kind = NodeKind::Logical(LogicalSpec { function });
        self.graph.add_node(Node::new(Arc::from(name), dim, ids, kind, &parent_discrete));
        self
    }

    /// An aggregate (`c(...)`-style) node gathering scalar components
    /// out of its parents; `gather` supplies, per output position, the
    /// `(parent index, offset within parent)` pair that fills it (§4.C).
    pub fn aggregate(mut self, name: &str, dim: Vec<usize>, parents: &[&str], gather: GatherSpec) -> Self {
        let Some(ids) = self.resolve("ModelBuilder::aggregate", name, parents) else { return self };
        let parent_discrete = self.parent_discrete(&ids);
        let kind = NodeKind::Aggregate(AggregateSpec { gather });
        self.graph.add_node(Node::new(Arc::from(name), dim, ids, kind, &parent_discrete));
        self
    }

    /// A mixture node: `index_parents`/`choice_parents` name, by
    /// position in `parents`, which entries select and which entries
    /// are selected among (§4.C).
    pub fn mixture(
        mut self,
        name: &str,
        dim: Vec<usize>,
        parents: &[&str],
        index_parents: Vec<usize>,
        choice_parents: Vec<usize>,
    ) -> Self {
        let Some(ids) = self.resolve("ModelBuilder::mixture", name, parents) else { return self };
        let parent_discrete = self.parent_discrete(&ids);
        let kind = NodeKind::Mixture(MixtureSpec { index_parents, choice_parents });
        self.graph.add_node(Node::new(Arc::from(name), dim, ids, kind, &parent_discrete));
        self
    }

    /// A deviance node summing `-2 * log density` over its contributing
    /// stochastic parents, named by position in `parents` (§3).
    pub fn deviance(mut self, name: &str, parents: &[&str], contributors: Vec<usize>) -> Self {
        let Some(ids) = self.resolve("ModelBuilder::deviance", name, parents) else { return self };
        let parent_discrete = self.parent_discrete(&ids);
        let kind = NodeKind::Deviance(DevianceSpec { contributors });
        self.graph.add_node(Node::new(Arc::from(name), vec![1], ids, kind, &parent_discrete));
        self
    }

    /// Finalizes the node set, surfacing every accumulated construction
    /// error at once (§6 "compilation failure ... fatal").
    pub fn build(self) -> BugsResult<Model> {
        if !self.errors.is_empty() {
            return Err(BugsError::from(self.errors));
        }
        Ok(Model { graph: self.graph, data: HashMap::new() })
    }
}

/// A finalized graph, ready to receive data bindings before compilation.
pub struct Model {
    graph: Graph,
    data: HashMap<NodeId, SArray>,
}

impl Model {
    /// Binds observed or initial values to a node by name (§6 "add data
    /// by name -> SArray").
    pub fn set_data(&mut self, name: &str, value: SArray) -> BugsResult<()> {
        let Some(id) = self.graph.by_name(name) else {
            return Err(bugs_error::bugs_err!(
                DimensionMismatch,
                "Model::set_data",
                node: name.to_string(),
                "no such node"
            ));
        };
        let expected = self.graph.get(id).len();
        if value.shape().size() != expected {
            return Err(bugs_error::bugs_err!(
                DimensionMismatch,
                "Model::set_data",
                node: name.to_string(),
                "expected {expected} values, got {}",
                value.shape().size()
            ));
        }
        self.data.insert(id, value);
        Ok(())
    }

    /// Finalizes graph construction: validates that every observed
    /// stochastic node has data bound to it (§6 compilation failure).
    pub fn compile(self) -> BugsResult<CompiledModel> {
        for id in self.graph.ids() {
            let n = self.graph.get(id);
            if n.is_observed() && !self.data.contains_key(&id) {
                return Err(bugs_error::bugs_err!(
                    DimensionMismatch,
                    "Model::compile",
                    node: n.name.to_string(),
                    "observed node has no data bound"
                ));
            }
        }
        Ok(CompiledModel { graph: self.graph, data: self.data })
    }
}

/// A graph whose observed nodes are all bound to data; one step away
/// from a runnable [`Simulation`].
pub struct CompiledModel {
    graph: Graph,
    data: HashMap<NodeId, SArray>,
}

impl CompiledModel {
    /// Allocates the per-chain value arena, writes bound data into
    /// every chain's slot, seeds one RNG per chain, and claims a
    /// sampler for every free stochastic node via the default factory
    /// pipeline (§6 "initialize: set chains, choose samplers"; §8
    /// scenario 6, `NoSampler` on exhaustion).
    pub fn initialize(self, config: &SimulationConfig) -> BugsResult<Simulation> {
        Simulation::build(self.graph, self.data, config)
    }
}

//! Conjugate-updater factories (§4.G, §4.I): thin adapters from each
//! conjugate method's own `can_sample`/`new` onto the `SamplerFactory`
//! contract.

use std::collections::HashSet;

use bugs_core::{Graph, GraphView, NodeId, ValueArena};

use crate::conjugate::{ConjugateDirichlet, ConjugateNormal, TruncatedGamma};
use crate::factory::pipeline::{ClaimedSampler, SamplerFactory};
use crate::framework::{SampleMethod, Sampler};

pub struct ConjugateNormalFactory;

impl SamplerFactory for ConjugateNormalFactory {
    fn name(&self) -> &'static str {
        "ConjugateNormal"
    }

    fn can_sample(&self, node: NodeId, graph: &Graph) -> bool {
        ConjugateNormal::can_sample(node, graph)
    }

    fn make(
        &self,
        node: NodeId,
        graph: &Graph,
        nchains: usize,
        _free: &HashSet<NodeId>,
        _arena: &mut ValueArena,
        _adapt_tolerance: f64,
    ) -> (ClaimedSampler, Vec<NodeId>) {
        let view = GraphView::build(graph, vec![node]);
        let methods: Vec<Box<dyn SampleMethod>> =
            (0..nchains).map(|_| Box::new(ConjugateNormal::new(node, graph)) as Box<dyn SampleMethod>).collect();
        (ClaimedSampler::Plain(Sampler::new(view, methods)), vec![node])
    }
}

pub struct ConjugateDirichletFactory;

impl SamplerFactory for ConjugateDirichletFactory {
    fn name(&self) -> &'static str {
        "ConjugateDirichlet"
    }

    fn can_sample(&self, node: NodeId, graph: &Graph) -> bool {
        ConjugateDirichlet::can_sample(node, graph)
    }

    fn make(
        &self,
        node: NodeId,
        graph: &Graph,
        nchains: usize,
        _free: &HashSet<NodeId>,
        _arena: &mut ValueArena,
        _adapt_tolerance: f64,
    ) -> (ClaimedSampler, Vec<NodeId>) {
        let view = GraphView::build(graph, vec![node]);
        let methods: Vec<Box<dyn SampleMethod>> = (0..nchains)
            .map(|_| Box::new(ConjugateDirichlet::new(node, graph)) as Box<dyn SampleMethod>)
            .collect();
        (ClaimedSampler::Plain(Sampler::new(view, methods)), vec![node])
    }
}

pub struct TruncatedGammaFactory;

impl SamplerFactory for TruncatedGammaFactory {
    fn name(&self) -> &'static str {
        "TruncatedGamma"
    }

    fn can_sample(&self, node: NodeId, graph: &Graph) -> bool {
        TruncatedGamma::can_sample(node, graph)
    }

    fn make(
        &self,
        node: NodeId,
        graph: &Graph,
        nchains: usize,
        _free: &HashSet<NodeId>,
        _arena: &mut ValueArena,
        _adapt_tolerance: f64,
    ) -> (ClaimedSampler, Vec<NodeId>) {
        let view = GraphView::build(graph, vec![node]);
        let methods: Vec<Box<dyn SampleMethod>> =
            (0..nchains).map(|_| Box::new(TruncatedGamma::new(node, graph)) as Box<dyn SampleMethod>).collect();
        (ClaimedSampler::Plain(Sampler::new(view, methods)), vec![node])
    }
}

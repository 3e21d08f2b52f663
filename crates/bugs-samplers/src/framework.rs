//! Sampler framework (§4.F): the per-chain update protocol and the
//! three ways a set of per-chain methods can be bundled with a graph
//! view — serial, parallel-across-chains, and GLM-blocked.

use rand::RngCore;
use rayon::prelude::*;

use bugs_core::{ChainValues, Graph, GraphView, ValueArena};
use bugs_error::BugsResult;

/// The per-chain update contract. A method owns whatever proposal
/// state it needs (current/last-accepted buffers for Metropolis,
/// cached coefficients for conjugate updates) and mutates exactly one
/// chain's slice of the value arena per call. Errors (§7: invalid
/// parameter value, invalid structural constraint, numerical) are
/// returned rather than panicking, so the driver can reject the
/// update, count the failure, and decide whether to continue.
pub trait SampleMethod: Send {
    fn update(
        &mut self,
        graph: &Graph,
        view: &GraphView,
        values: &mut dyn ChainValues,
        rng: &mut dyn RngCore,
    ) -> BugsResult<()>;

    fn is_adaptive(&self) -> bool;

    /// Ends the tuning phase. Idempotent.
    fn adapt_off(&mut self);

    /// Did adaptation converge to its target? Meaningless (and should
    /// return `true`) once `adapt_off` has been called.
    fn check_adaptation(&mut self) -> bool;

    fn name(&self) -> &'static str;
}

/// Three states of the adaptation lifecycle (§9 DESIGN NOTES,
/// "Adaptation"): a sampler is born adaptive; the driver transitions
/// it to `FrozenUntested` via `adapt_off`; a later convergence check
/// may promote it to `Frozen` or leave it `FrozenUntested` if the
/// empirical acceptance rate missed its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdaptState {
    Adapting,
    FrozenUntested,
    Frozen,
}

/// A graph view bundled with one [`SampleMethod`] per chain. `update`
/// invokes each chain's method in turn, strictly sequentially (§5:
/// "within a chain, operations are strictly sequential").
pub struct Sampler {
    view: GraphView,
    methods: Vec<Box<dyn SampleMethod>>,
}

impl Sampler {
    pub fn new(view: GraphView, methods: Vec<Box<dyn SampleMethod>>) -> Self {
        assert!(!methods.is_empty(), "a sampler needs at least one chain's method");
        Self { view, methods }
    }

    pub fn view(&self) -> &GraphView {
        &self.view
    }

    pub fn name(&self) -> &'static str {
        self.methods[0].name()
    }

    pub fn update(&mut self, graph: &Graph, arena: &mut ValueArena, rngs: &mut [impl RngCore]) -> BugsResult<()> {
        for (chain, method) in self.methods.iter_mut().enumerate() {
            let mut values = arena.chain_mut(chain);
            method.update(graph, &self.view, &mut values, &mut rngs[chain])?;
        }
        Ok(())
    }

    pub fn adapt_off(&mut self) {
        for m in &mut self.methods {
            m.adapt_off();
        }
    }

    pub fn check_adaptation(&mut self) -> bool {
        self.methods.iter_mut().all(|m| m.check_adaptation())
    }
}

/// A [`Sampler`] whose per-chain methods carry no cross-chain state,
/// so chains may be updated concurrently (§5: "independent across
/// chains ... may update chains concurrently"). The per-chain
/// value-arena layout already guarantees disjoint memory across
/// chains ([`ValueArena::chain_arenas_mut`]), so `update` drives every
/// chain's method on the rayon global pool; a method and its rng are
/// never shared between threads.
pub struct ParallelSampler {
    inner: Sampler,
}

impl ParallelSampler {
    pub fn new(view: GraphView, methods: Vec<Box<dyn SampleMethod>>) -> Self {
        Self { inner: Sampler::new(view, methods) }
    }

    pub fn view(&self) -> &GraphView {
        self.inner.view()
    }

    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    pub fn update(
        &mut self,
        graph: &Graph,
        arena: &mut ValueArena,
        rngs: &mut [impl RngCore + Send],
    ) -> BugsResult<()> {
        let view = &self.inner.view;
        let chain_arenas = arena.chain_arenas_mut();
        self.inner
            .methods
            .par_iter_mut()
            .zip(chain_arenas.into_par_iter())
            .zip(rngs.par_iter_mut())
            .try_for_each(|((method, mut values), rng)| method.update(graph, view, &mut values, rng))
    }

    /// Updates a single chain against an already-disjoint handle,
    /// suitable for driving many chains from separate threads by hand.
    pub fn update_one(
        &mut self,
        graph: &Graph,
        chain: usize,
        values: &mut dyn ChainValues,
        rng: &mut dyn RngCore,
    ) -> BugsResult<()> {
        self.inner.methods[chain].update(graph, &self.inner.view, values, rng)
    }

    pub fn adapt_off(&mut self) {
        self.inner.adapt_off();
    }

    pub fn check_adaptation(&mut self) -> bool {
        self.inner.check_adaptation()
    }
}

/// A blocked sampler: a primary method updates a joint view over
/// several stochastic nodes at once, and zero or more auxiliary
/// sub-views carry their own per-chain methods (§4.F, §4.I GLM
/// aggregation).
pub struct GlmSampler {
    primary_view: GraphView,
    primary: Vec<Box<dyn SampleMethod>>,
    aux: Vec<(GraphView, Vec<Box<dyn SampleMethod>>)>,
}

impl GlmSampler {
    pub fn new(
        primary_view: GraphView,
        primary: Vec<Box<dyn SampleMethod>>,
        aux: Vec<(GraphView, Vec<Box<dyn SampleMethod>>)>,
    ) -> Self {
        Self { primary_view, primary, aux }
    }

    pub fn view(&self) -> &GraphView {
        &self.primary_view
    }

    pub fn name(&self) -> &'static str {
        self.primary[0].name()
    }

    pub fn update(&mut self, graph: &Graph, arena: &mut ValueArena, rngs: &mut [impl RngCore]) -> BugsResult<()> {
        for (chain, method) in self.primary.iter_mut().enumerate() {
            let mut values = arena.chain_mut(chain);
            method.update(graph, &self.primary_view, &mut values, &mut rngs[chain])?;
            for (view, methods) in &mut self.aux {
                let mut values = arena.chain_mut(chain);
                methods[chain].update(graph, view, &mut values, &mut rngs[chain])?;
            }
        }
        Ok(())
    }

    pub fn adapt_off(&mut self) {
        for m in &mut self.primary {
            m.adapt_off();
        }
        for (_, methods) in &mut self.aux {
            for m in methods {
                m.adapt_off();
            }
        }
    }

    pub fn check_adaptation(&mut self) -> bool {
        let primary_ok = self.primary.iter_mut().all(|m| m.check_adaptation());
        let aux_ok = self.aux.iter_mut().all(|(_, ms)| ms.iter_mut().all(|m| m.check_adaptation()));
        primary_ok && aux_ok
    }
}

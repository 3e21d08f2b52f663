//! The value arena (§4.A): per-chain contiguous storage for every
//! node's numeric value. Allocated once, on finalization, from the
//! dimension vector each node already carries. Storage is chain-major
//! so that distinct chains' buffers can be borrowed disjointly and
//! mutably at once (§5, ParallelSampler).

use crate::node::NodeId;

/// Read/write access to one chain's worth of node buffers, independent
/// of whether the caller holds the whole [`ValueArena`] ([`ArenaChain`])
/// or one of its disjoint per-chain slices ([`ChainArena`]).
pub trait ChainValues {
    fn read(&self, node: NodeId) -> &[f64];
    fn write(&mut self, node: NodeId, values: &[f64]);
}

#[derive(Clone, Debug)]
pub struct ValueArena {
    chains: usize,
    // chain-major: buffers[chain][node.index()] = that node's buffer.
    buffers: Vec<Vec<Vec<f64>>>,
}

impl ValueArena {
    /// Allocates `chains` buffers of `dims[i].iter().product()` zeros
    /// for each node `i`, in arena-index order.
    pub fn new(chains: usize, dims: &[Vec<usize>]) -> Self {
        assert!(chains >= 1, "chain count must be at least 1");
        let per_chain: Vec<Vec<f64>> = dims
            .iter()
            .map(|dim| vec![0.0; dim.iter().product()])
            .collect();
        let buffers = (0..chains).map(|_| per_chain.clone()).collect();
        Self { chains, buffers }
    }

    pub fn chains(&self) -> usize {
        self.chains
    }

    pub fn read(&self, node: NodeId, chain: usize) -> &[f64] {
        &self.buffers[chain][node.index()]
    }

    /// Writes into a node's slot. Callers are responsible for only
    /// writing deterministic nodes from their own recomputation, and
    /// stochastic nodes from their owning updater (§4.A).
    pub fn write(&mut self, node: NodeId, chain: usize, values: &[f64]) {
        let slot = &mut self.buffers[chain][node.index()];
        debug_assert_eq!(slot.len(), values.len(), "value length must match declared shape");
        slot.copy_from_slice(values);
    }

    /// A [`ChainValues`] handle scoped to one chain, borrowing the
    /// whole arena (so at most one may exist at a time — the serial
    /// per-chain update model of §5).
    pub fn chain_mut(&mut self, chain: usize) -> ArenaChain<'_> {
        ArenaChain { arena: self, chain }
    }

    /// Disjoint per-chain handles, one per chain, that may be updated
    /// concurrently: distinct chains never alias the same memory, so
    /// splitting the chain-major storage this way is sound without
    /// `unsafe` (§5, "disjoint value-arena slots which the per-chain
    /// layout already ensures").
    pub fn chain_arenas_mut(&mut self) -> Vec<ChainArena<'_>> {
        self.buffers.iter_mut().map(|buf| ChainArena { buf }).collect()
    }
}

pub struct ArenaChain<'a> {
    arena: &'a mut ValueArena,
    chain: usize,
}

impl<'a> ArenaChain<'a> {
    pub fn chain(&self) -> usize {
        self.chain
    }
}

impl<'a> ChainValues for ArenaChain<'a> {
    fn read(&self, node: NodeId) -> &[f64] {
        self.arena.read(node, self.chain)
    }

    fn write(&mut self, node: NodeId, values: &[f64]) {
        self.arena.write(node, self.chain, values)
    }
}

pub struct ChainArena<'a> {
    buf: &'a mut Vec<Vec<f64>>,
}

impl<'a> ChainValues for ChainArena<'a> {
    fn read(&self, node: NodeId) -> &[f64] {
        &self.buf[node.index()]
    }

    fn write(&mut self, node: NodeId, values: &[f64]) {
        self.buf[node.index()].copy_from_slice(values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugs_utils::Arena;

    fn keys(n: usize) -> Vec<NodeId> {
        let mut arena = Arena::new();
        (0..n).map(|i| arena.insert(i)).collect()
    }

    #[test]
    fn allocates_one_buffer_per_chain_per_node() {
        let ids = keys(2);
        let arena = ValueArena::new(2, &[vec![3], vec![1]]);
        assert_eq!(arena.read(ids[0], 0).len(), 3);
        assert_eq!(arena.read(ids[1], 1).len(), 1);
    }

    #[test]
    fn write_then_read_round_trips() {
        let ids = keys(1);
        let mut arena = ValueArena::new(1, &[vec![2]]);
        arena.write(ids[0], 0, &[1.5, 2.5]);
        assert_eq!(arena.read(ids[0], 0), &[1.5, 2.5]);
    }

    #[test]
    fn chain_arenas_are_disjoint_and_independently_writable() {
        let ids = keys(1);
        let mut arena = ValueArena::new(2, &[vec![1]]);
        {
            let mut chains = arena.chain_arenas_mut();
            chains[0].write(ids[0], &[10.0]);
            chains[1].write(ids[0], &[20.0]);
        }
        assert_eq!(arena.read(ids[0], 0), &[10.0]);
        assert_eq!(arena.read(ids[0], 1), &[20.0]);
    }
}

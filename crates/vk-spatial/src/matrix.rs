//! Dense neighbor relation.

use vk_core::AgentId;

/// Boolean `N × N` relation stored row-major.
///
/// Row `i` answers "which agents does `i` average over".  The diagonal is
/// always set.  Rebuilt from scratch every step and never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborMatrix {
    n:    usize,
    bits: Vec<bool>,
}

impl NeighborMatrix {
    /// Relation where every agent neighbors only itself.
    pub fn identity(n: usize) -> Self {
        let mut bits = vec![false; n * n];
        for i in 0..n {
            bits[i * n + i] = true;
        }
        Self { n, bits }
    }

    /// Number of agents (rows).
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn is_neighbor(&self, i: AgentId, j: AgentId) -> bool {
        self.bits[i.index() * self.n + j.index()]
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, j: usize) {
        self.bits[i * self.n + j] = true;
    }

    /// Row `i` of the relation, indexed by `AgentId`.
    #[inline]
    pub fn row(&self, i: AgentId) -> &[bool] {
        let start = i.index() * self.n;
        &self.bits[start..start + self.n]
    }

    /// Agents in `i`'s neighborhood, in ascending `AgentId` order, `i`
    /// included.
    pub fn neighbors_of(&self, i: AgentId) -> impl Iterator<Item = AgentId> + '_ {
        self.row(i)
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(|(j, _)| AgentId(j as u32))
    }

    /// Size of `i`'s neighborhood, `i` included (always ≥ 1).
    pub fn degree(&self, i: AgentId) -> usize {
        self.row(i).iter().filter(|&&b| b).count()
    }

    /// Total number of set entries, diagonal included.
    pub fn link_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn is_reflexive(&self) -> bool {
        (0..self.n).all(|i| self.bits[i * self.n + i])
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| {
            (i + 1..self.n).all(|j| self.bits[i * self.n + j] == self.bits[j * self.n + i])
        })
    }
}

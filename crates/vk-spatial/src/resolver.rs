//! Neighbor resolver trait, dense O(N²) resolver and periodic cell list.
//!
//! # Pluggability
//!
//! `vk-sim` resolves neighbors through the [`NeighborResolver`] trait, so
//! applications can swap the spatial strategy without touching the step
//! function.  Every resolver must produce exactly the relation
//! [`resolve_neighbors`] produces for the same input.

use vk_core::{PeriodicRule, Vec2};

use crate::{NeighborMatrix, separation_squared};

/// Build the neighbor relation by testing every ordered pair.
///
/// Pure function of its inputs.  `O(N²)` separation evaluations.
pub fn resolve_neighbors(
    positions: &[Vec2],
    domain:    f64,
    radius:    f64,
    rule:      PeriodicRule,
) -> NeighborMatrix {
    let n = positions.len();
    let r2 = radius * radius;
    let mut matrix = NeighborMatrix::identity(n);
    for (i, &pi) in positions.iter().enumerate() {
        for (j, &pj) in positions.iter().enumerate() {
            if i != j && separation_squared(pi, pj, domain, rule) < r2 {
                matrix.set(i, j);
            }
        }
    }
    matrix
}

// ── Resolver trait ────────────────────────────────────────────────────────────

/// Pluggable neighbor search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a `Sim` can be moved to a
/// worker thread by an interactive front end.
pub trait NeighborResolver: Send + Sync {
    /// Neighbor relation for `positions` on a periodic square of side
    /// `domain` with interaction radius `radius`.
    fn resolve(
        &self,
        positions: &[Vec2],
        domain:    f64,
        radius:    f64,
        rule:      PeriodicRule,
    ) -> NeighborMatrix;
}

// ── BruteForce ────────────────────────────────────────────────────────────────

/// Tests all `N²` ordered pairs.  Default resolver; works with every
/// [`PeriodicRule`].
#[derive(Copy, Clone, Debug, Default)]
pub struct BruteForce;

impl NeighborResolver for BruteForce {
    fn resolve(
        &self,
        positions: &[Vec2],
        domain:    f64,
        radius:    f64,
        rule:      PeriodicRule,
    ) -> NeighborMatrix {
        resolve_neighbors(positions, domain, radius, rule)
    }
}

// ── CellList ──────────────────────────────────────────────────────────────────

/// Periodic grid binning.
///
/// The domain is split into `m × m` cells of side `L / m ≥ R`, so any
/// neighbor of an agent lies in its own cell or one of the 8 surrounding
/// cells (with wraparound).  Cost is roughly `O(N · ρR²)` instead of
/// `O(N²)` at low density.
///
/// Only meaningful for [`PeriodicRule::MinimumImage`].  Falls back to
/// [`BruteForce`] for [`PeriodicRule::Legacy`] (whose correction is not
/// local) and when fewer than 3 cells fit per axis (the 3×3 stencil would
/// visit a cell twice).
#[derive(Copy, Clone, Debug)]
pub struct CellList {
    /// Upper bound on cells per axis, caps grid memory for tiny radii.
    pub max_cells_per_axis: usize,
}

impl Default for CellList {
    fn default() -> Self {
        Self { max_cells_per_axis: 256 }
    }
}

impl CellList {
    /// Cells per axis for this domain / radius, or `None` when the stencil
    /// cannot be used.
    fn cells_per_axis(&self, domain: f64, radius: f64) -> Option<usize> {
        if radius <= 0.0 {
            return None;
        }
        let fit = (domain / radius).floor();
        if !fit.is_finite() || fit < 3.0 {
            return None;
        }
        let m = (fit as usize).min(self.max_cells_per_axis);
        (m >= 3).then_some(m)
    }
}

impl NeighborResolver for CellList {
    fn resolve(
        &self,
        positions: &[Vec2],
        domain:    f64,
        radius:    f64,
        rule:      PeriodicRule,
    ) -> NeighborMatrix {
        let m = match (rule, self.cells_per_axis(domain, radius)) {
            (PeriodicRule::MinimumImage, Some(m)) => m,
            _ => {
                tracing::trace!(?rule, radius, domain, "cell list unusable, resolving by brute force");
                return resolve_neighbors(positions, domain, radius, rule);
            }
        };

        let side = domain / m as f64;
        let cell_of = |p: Vec2| -> (usize, usize) {
            // Binning uses wrapped coordinates; distances below use the raw
            // positions so results match `resolve_neighbors` exactly.
            let w = p.wrap(domain);
            let cx = ((w.x / side) as usize).min(m - 1);
            let cy = ((w.y / side) as usize).min(m - 1);
            (cx, cy)
        };

        let mut cells: Vec<Vec<usize>> = vec![Vec::new(); m * m];
        for (i, &p) in positions.iter().enumerate() {
            let (cx, cy) = cell_of(p);
            cells[cy * m + cx].push(i);
        }

        let r2 = radius * radius;
        let mut matrix = NeighborMatrix::identity(positions.len());
        for cy in 0..m {
            for cx in 0..m {
                let here = &cells[cy * m + cx];
                if here.is_empty() {
                    continue;
                }
                for oy in [m - 1, 0, 1] {
                    for ox in [m - 1, 0, 1] {
                        let ny = (cy + oy) % m;
                        let nx = (cx + ox) % m;
                        for &i in here {
                            for &j in &cells[ny * m + nx] {
                                if i != j
                                    && separation_squared(positions[i], positions[j], domain, rule) < r2
                                {
                                    matrix.set(i, j);
                                }
                            }
                        }
                    }
                }
            }
        }
        matrix
    }
}

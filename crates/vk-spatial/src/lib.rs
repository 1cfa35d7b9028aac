//! `vk-spatial` — neighbor resolution on the periodic square domain.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`periodic`] | `separation_squared` under a [`PeriodicRule`]             |
//! | [`matrix`]   | `NeighborMatrix` (dense, row-major N×N relation)           |
//! | [`resolver`] | `NeighborResolver` trait, `BruteForce`, `CellList`,        |
//! |              | `resolve_neighbors`                                        |
//!
//! Two agents are neighbors iff their squared separation is strictly less
//! than `R²`.  Every agent is its own neighbor regardless of `R`.
//!
//! [`PeriodicRule`]: vk_core::PeriodicRule

pub mod matrix;
pub mod periodic;
pub mod resolver;


pub use matrix::NeighborMatrix;
pub use periodic::separation_squared;
pub use resolver::{BruteForce, CellList, NeighborResolver, resolve_neighbors};

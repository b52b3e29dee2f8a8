//! Property models implementing [`PropertyProvider`](super::PropertyProvider).

mod steam;

pub mod sugar_solution;

pub use sugar_solution::SugarSolution;

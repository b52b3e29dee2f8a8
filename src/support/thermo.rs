//! Thermophysical properties consumed by the process models.
//!
//! The evaporator and crystallizer never evaluate steam tables or sucrose
//! correlations themselves. They query a [`PropertyProvider`], which keeps
//! every property lookup stateless and injectable.
//!
//! [`model::SugarSolution`] is the default provider: IAPWS-IF97 for the water
//! saturation line and enthalpies, with classical correlations for aqueous
//! sucrose.

mod error;
mod provider;

pub mod model;

pub use error::PropertyError;
pub use provider::PropertyProvider;

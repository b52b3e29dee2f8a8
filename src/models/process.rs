//! Sugar process models.
//!
//! This module contains the concentration and crystallization stages of a
//! sugar train: a multi-effect evaporator and a batch cooling crystallizer.

pub mod crystallizer;
pub mod evaporator;

#[cfg(test)]
mod test_support;

//! Cascaded multi-effect evaporator balances.
//!
//! Liquid flows forward through N effects at decreasing pressure. Vapor
//! boiled off in effect `i` heats effect `i + 1`, and live steam heats the
//! first effect. The liquid, vapor, concentration and temperature of every
//! effect are solved together as one square nonlinear system, after which
//! the heating steam demand and the heat transfer areas are evaluated
//! explicitly.

mod config;
mod error;
mod heat_transfer;
mod pressure;
mod results;
mod solve;
mod spec;
mod system;

pub use config::{EvaporatorConfig, EvaporatorParameters};
pub use error::EvaporatorError;
pub use results::{EffectState, EvaporatorTrain};
pub use spec::{EvaporatorSpec, Feed};

pub(super) use solve::solve;

//! # Sugar Train
//!
//! Process models for the concentration and crystallization stages of a
//! cane or beet sugar train, built on [Twine](https://github.com/isentropic-dev/twine).
//!
//! Two independent engines are provided:
//!
//! - A cascaded multi-effect evaporator, solved as one nonlinear system of
//!   mass, solute and energy balances with a damped Newton method.
//! - A batch cooling crystallizer, integrated as a moment-form population
//!   balance under a prescribed cooling profile, plus vessel sizing.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module and moves to
//! [`support`] once more than one model needs it. Model-specific utility code
//! remains private.
//!
//! ## Features
//!
//! - `parallel`: runs evaporator sensitivity sweeps on the rayon thread pool.

pub mod models;
pub mod support;

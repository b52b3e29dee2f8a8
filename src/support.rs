//! Supporting utilities used by models.
//!
//! These modules are public because they are useful on their own, but their
//! APIs are not stable.

pub mod constraint;
pub mod grid;
pub mod newton;
pub mod thermo;
pub mod units;

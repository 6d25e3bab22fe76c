//! Value types, errors and fixed-point helpers shared by every module.

pub mod core;
pub mod error;
pub(crate) mod math;

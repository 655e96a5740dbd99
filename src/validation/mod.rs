//! Validation of optimization requests and produced layouts.

mod validate;

pub use validate::*;

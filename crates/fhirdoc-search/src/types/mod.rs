//! Per-type filter builders.

pub mod number;
pub mod reference;
pub mod string;
pub mod token;

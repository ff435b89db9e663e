//! Picking one item from a candidate set.

pub mod selector;
pub mod strategy;

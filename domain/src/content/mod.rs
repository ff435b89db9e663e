//! Content model: items and catalog snapshots.

pub mod catalog;
pub mod item;

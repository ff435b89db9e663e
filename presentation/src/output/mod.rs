//! Output formatting for shuffle runs

pub mod console;
pub mod report;

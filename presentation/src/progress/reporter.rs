//! Progress reporting for selection cycles

use colored::Colorize;
use shuffle_application::SelectionProgress;
use shuffle_domain::CyclePhase;
use std::sync::Mutex;

#[derive(Debug, Default, Clone, Copy)]
struct CycleCounts {
    catalog: usize,
    eligible: usize,
    candidates: usize,
}

/// Prints one line per cycle to stderr, so stdout stays clean for JSON.
#[derive(Default)]
pub struct SimpleProgress {
    counts: Mutex<CycleCounts>,
}

impl SimpleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn update(&self, f: impl FnOnce(&mut CycleCounts)) -> CycleCounts {
        let mut counts = self
            .counts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut counts);
        *counts
    }

    /// One-line summary of a finished cycle
    pub fn summary(phase: CyclePhase, catalog: usize, eligible: usize, candidates: usize) -> String {
        match phase {
            CyclePhase::Selected => format!(
                "{} {} of {} eligible, {} fresh",
                "->".cyan(),
                eligible,
                catalog,
                candidates
            ),
            CyclePhase::Exhausted => format!(
                "{} nothing eligible out of {}",
                "x".red(),
                catalog
            ),
            other => format!("{} {}", "->".cyan(), other),
        }
    }
}

impl SelectionProgress for SimpleProgress {
    fn on_phase(&self, phase: CyclePhase, items: usize) {
        let counts = self.update(|counts| match phase {
            CyclePhase::Filtering => counts.catalog = items,
            CyclePhase::Excluding => counts.eligible = items,
            CyclePhase::Selecting => counts.candidates = items,
            _ => {}
        });

        if phase.is_terminal() {
            eprintln!(
                "{}",
                Self::summary(phase, counts.catalog, counts.eligible, counts.candidates).dimmed()
            );
        }
    }
}

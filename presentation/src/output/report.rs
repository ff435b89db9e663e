//! Run report: everything one CLI invocation produced

use serde::Serialize;
use shuffle_domain::{InteractionKind, Selection, SelectionStrategy};

/// One pick and the feedback given on it
#[derive(Debug, Clone, Serialize)]
pub struct PickReport {
    /// 1-based position in the run
    pub index: usize,
    pub selection: Selection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<InteractionKind>,
}

/// Result of a shuffle run, rendered as text or JSON
#[derive(Debug, Clone, Serialize)]
pub struct ShuffleReport {
    pub session: String,
    pub strategy: SelectionStrategy,
    pub unrestricted: bool,
    pub catalog_size: usize,
    pub picks: Vec<PickReport>,
    /// The run stopped early because nothing was eligible
    pub exhausted: bool,
    pub interactions_saved: usize,
}

impl ShuffleReport {
    pub fn new(
        session: impl Into<String>,
        strategy: SelectionStrategy,
        unrestricted: bool,
        catalog_size: usize,
    ) -> Self {
        Self {
            session: session.into(),
            strategy,
            unrestricted,
            catalog_size,
            picks: Vec::new(),
            exhausted: false,
            interactions_saved: 0,
        }
    }

    /// Append a pick, numbering it after the existing ones
    pub fn push(&mut self, selection: Selection) {
        let index = self.picks.len() + 1;
        self.picks.push(PickReport {
            index,
            selection,
            feedback: None,
        });
    }

    /// Attach feedback to the most recent pick
    pub fn set_feedback(&mut self, kind: InteractionKind) {
        if let Some(pick) = self.picks.last_mut() {
            pick.feedback = Some(kind);
        }
    }
}

//! Saved drafts list

use crate::core::{Navigable, PanelId};
use crate::drafts::Draft;

use super::{ListPanel, Panel, PanelTuning};

/// Action applied by Enter on a draft row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftAction {
    #[default]
    Open,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftRow {
    /// Position in the store (oldest first), the index `:o`/`:x` use
    pub storage_index: usize,
    pub draft: Draft,
}

/// Drafts shown most recent first
pub struct DraftsPanel {
    rows: ListPanel<DraftRow>,
    action: DraftAction,
}

impl DraftsPanel {
    /// `drafts` in storage order
    pub fn new(drafts: Vec<Draft>, tuning: &PanelTuning) -> Self {
        let rows = drafts
            .into_iter()
            .enumerate()
            .rev()
            .map(|(storage_index, draft)| DraftRow {
                storage_index,
                draft,
            })
            .collect();
        Self {
            rows: ListPanel::new(PanelId::Drafts, rows, tuning).with_row_height(3),
            action: DraftAction::default(),
        }
    }

    pub fn rows(&self) -> &ListPanel<DraftRow> {
        &self.rows
    }

    pub fn action(&self) -> DraftAction {
        self.action
    }

    pub fn select_action(&mut self, action: DraftAction) {
        self.action = action;
    }

    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.rows.set_viewport_rows(rows);
    }

    /// Action and storage index for the row under the cursor
    pub fn activate(&self) -> Option<(DraftAction, usize)> {
        self.rows
            .selected()
            .map(|row| (self.action, row.storage_index))
    }
}

impl Panel for DraftsPanel {
    fn id(&self) -> PanelId {
        PanelId::Drafts
    }

    fn navigable(&mut self) -> Option<&mut dyn Navigable> {
        Some(&mut self.rows)
    }

    fn scroll(&mut self, delta: isize) {
        self.rows.scroll(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn draft(content: &str) -> Draft {
        Draft {
            content: content.to_string(),
            attachments: Vec::new(),
            timestamp: Local::now(),
        }
    }

    #[test]
    fn test_most_recent_first_with_storage_index() {
        let panel = DraftsPanel::new(
            vec![draft("old"), draft("mid"), draft("new")],
            &PanelTuning::default(),
        );
        let first = &panel.rows().items()[0];
        assert_eq!(first.draft.content, "new");
        assert_eq!(first.storage_index, 2);
        assert_eq!(panel.activate(), Some((DraftAction::Open, 2)));
    }

    #[test]
    fn test_select_delete() {
        let mut panel = DraftsPanel::new(vec![draft("a"), draft("b")], &PanelTuning::default());
        panel.select_action(DraftAction::Delete);
        panel.rows.apply(crate::core::Verb::Down);
        assert_eq!(panel.activate(), Some((DraftAction::Delete, 0)));
    }

    #[test]
    fn test_empty() {
        let panel = DraftsPanel::new(Vec::new(), &PanelTuning::default());
        assert_eq!(panel.activate(), None);
    }
}

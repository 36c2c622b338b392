//! User table state.
//!
//! The record list is a cache of the last successful load. It is never
//! patched locally; every mutation is followed by a full reload.

use roster_core::records::{SortColumn, SortState, UserId, UserRecord};

/// What the table area currently shows.
#[derive(Debug, Default)]
pub enum UsersView {
    /// Never loaded (or invalidated): "Loading..." placeholder.
    #[default]
    Loading,
    Loaded(Vec<UserRecord>),
    /// The most recent load failed: "Error loading users".
    Failed,
}

#[derive(Debug, Default)]
pub struct UsersState {
    pub view: UsersView,
    pub sort: SortState,
    /// Selected row, as an index into the sorted rows.
    pub selected: usize,
    /// Record targeted by the latest delete request.
    pub deleting: Option<UserId>,
}

impl UsersState {
    pub fn records(&self) -> Option<&[UserRecord]> {
        match &self.view {
            UsersView::Loaded(records) => Some(records),
            UsersView::Loading | UsersView::Failed => None,
        }
    }

    /// Rows in display order. Empty unless loaded.
    pub fn rows(&self) -> Vec<&UserRecord> {
        self.records()
            .map(|records| self.sort.apply(records))
            .unwrap_or_default()
    }

    pub fn selected_record(&self) -> Option<&UserRecord> {
        self.rows().get(self.selected).copied()
    }

    /// Replaces the cache with a fresh load, keeping the selection on the
    /// same record when it still exists.
    pub fn set_records(&mut self, records: Vec<UserRecord>) {
        let selected_id = self.selected_record().map(|r| r.id.clone());
        self.view = UsersView::Loaded(records);
        self.reselect(selected_id.as_ref());
    }

    pub fn set_failed(&mut self) {
        self.view = UsersView::Failed;
        self.selected = 0;
    }

    /// Drops the cache so the next mount shows the loading placeholder.
    pub fn invalidate(&mut self) {
        self.view = UsersView::Loading;
        self.selected = 0;
    }

    pub fn sort_by(&mut self, column: SortColumn) {
        let selected_id = self.selected_record().map(|r| r.id.clone());
        self.sort.sort_by(column);
        self.reselect(selected_id.as_ref());
    }

    pub fn select_next(&mut self) {
        let len = self.records().map_or(0, <[UserRecord]>::len);
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn reselect(&mut self, id: Option<&UserId>) {
        let (position, len) = {
            let rows = self.rows();
            let position = id.and_then(|id| rows.iter().position(|r| &r.id == id));
            (position, rows.len())
        };
        let fallback = self.selected.min(len.saturating_sub(1));
        self.selected = position.unwrap_or(fallback);
    }
}

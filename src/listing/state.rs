use crate::domain::School;
use crate::listing::{project, reconcile};

/// The client-side listing: every fetched school plus the slice of them
/// matching the current search.
///
/// `filtered` is always `project(master, query)`; every method that touches
/// either input re-derives it before returning, so callers never observe
/// the two out of step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingState {
    master: Vec<School>,
    filtered: Vec<School>,
    query: String,
}

/// An optimistic removal waiting for the server's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending delete must be committed or rolled back"]
pub struct PendingDelete {
    school: School,
    index: usize,
}

impl PendingDelete {
    pub fn id(&self) -> i64 {
        self.school.id
    }

    pub fn school(&self) -> &School {
        &self.school
    }
}

impl ListingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn master(&self) -> &[School] {
        &self.master
    }

    pub fn filtered(&self) -> &[School] {
        &self.filtered
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Merge a batch that is already newest-first.
    pub fn merge_batch(&mut self, batch: &[School]) {
        if batch.is_empty() {
            return;
        }
        self.master = reconcile(&self.master, batch);
        self.refresh();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.refresh();
    }

    /// Drop everything fetched so far. The query is kept.
    pub fn clear(&mut self) {
        self.master.clear();
        self.filtered.clear();
    }

    /// Remove `id` from both views right away. `None` if it isn't listed.
    pub fn begin_delete(&mut self, id: i64) -> Option<PendingDelete> {
        let index = self.master.iter().position(|s| s.id == id)?;
        let school = self.master.remove(index);
        self.refresh();

        Some(PendingDelete { school, index })
    }

    /// The server confirmed the delete. Also drops a copy that a page
    /// fetched meanwhile may have brought back.
    pub fn commit_delete(&mut self, pending: PendingDelete) {
        let before = self.master.len();
        self.master.retain(|s| s.id != pending.id());
        if self.master.len() != before {
            self.refresh();
        }
    }

    /// The server refused the delete: put the school back where it was.
    pub fn rollback_delete(&mut self, pending: PendingDelete) {
        if self.master.iter().any(|s| s.id == pending.id()) {
            return;
        }
        let index = pending.index.min(self.master.len());
        self.master.insert(index, pending.school);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.filtered = project(&self.master, &self.query);
    }
}

use tracing::{debug, warn};

use crate::domain::School;
use crate::listing::{
    ApiError, CursorMark, ListingState, PaginationCursor, PendingDelete, SchoolApi,
};

/// Permission to fetch one page, handed out by [`ListController::need_more`]
/// and handed back with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    generation: u64,
    mark: CursorMark,
    page_size: u32,
}

impl PageRequest {
    pub fn page(&self) -> u32 {
        self.mark.page()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Merged { added: usize, has_more: bool },
    /// The listing was reloaded while this page was in flight. Its schools
    /// were merged, the new cursor was left alone.
    Stale { added: usize },
}

/// Owns the listing state and its cursor, and gates page fetches so that
/// at most one is in flight per cursor.
///
/// The controller does no I/O itself: `need_more` hands out a
/// [`PageRequest`], the caller fetches however it likes, and
/// `finish_fetch` folds the result back in. `load_more` and `delete` wrap
/// the round trip for blocking callers.
#[derive(Debug)]
pub struct ListController {
    state: ListingState,
    cursor: PaginationCursor,
    in_flight: bool,
    generation: u64,
}

impl ListController {
    pub fn new(page_size: u32) -> Self {
        Self {
            state: ListingState::new(),
            cursor: PaginationCursor::new(page_size),
            in_flight: false,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn cursor(&self) -> &PaginationCursor {
        &self.cursor
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight
    }

    /// The "need more" signal. Returns a request only when the listing has
    /// more pages and nothing is in flight; otherwise the signal is dropped.
    pub fn need_more(&mut self) -> Option<PageRequest> {
        if self.in_flight || !self.cursor.has_more() {
            return None;
        }
        self.in_flight = true;

        let request = PageRequest {
            generation: self.generation,
            mark: self.cursor.mark(),
            page_size: self.cursor.page_size(),
        };
        debug!(page = request.page(), "page fetch started");
        Some(request)
    }

    /// Fold a fetched page back in. `page` is as the backend sent it,
    /// oldest-first; it is reversed here before merging.
    ///
    /// A failed fetch leaves the listing and cursor untouched, so the next
    /// signal retries the same page. A malformed page counts as the end of
    /// the listing. A failure of a request issued before `reload` no longer
    /// concerns anyone and comes back as `Stale { added: 0 }`.
    pub fn finish_fetch(
        &mut self,
        request: PageRequest,
        result: Result<Vec<School>, ApiError>,
    ) -> Result<FetchOutcome, ApiError> {
        let current = request.generation == self.generation;
        if current {
            self.in_flight = false;
        }

        let mut batch = match result {
            Ok(batch) => batch,
            Err(ApiError::Malformed(reason)) => {
                warn!(page = request.page(), %reason, "malformed page, treating as end of list");
                Vec::new()
            }
            Err(err) if !current => {
                debug!(page = request.page(), error = %err, "stale page fetch failed");
                return Ok(FetchOutcome::Stale { added: 0 });
            }
            Err(err) => {
                warn!(page = request.page(), error = %err, "page fetch failed");
                return Err(err);
            }
        };
        batch.reverse();

        let fetched = batch.len();
        let before = self.state.master().len();
        self.state.merge_batch(&batch);
        let added = self.state.master().len() - before;

        if !current {
            debug!(page = request.page(), added, "stale page merged");
            return Ok(FetchOutcome::Stale { added });
        }

        self.cursor.advance(request.mark, fetched);
        debug!(
            page = request.page(),
            fetched,
            added,
            has_more = self.cursor.has_more(),
            "page merged"
        );
        Ok(FetchOutcome::Merged {
            added,
            has_more: self.cursor.has_more(),
        })
    }

    /// Signal, fetch and merge in one blocking step.
    /// `Ok(None)` when the signal was dropped.
    pub fn load_more<A: SchoolApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Result<Option<FetchOutcome>, ApiError> {
        let Some(request) = self.need_more() else {
            return Ok(None);
        };
        let result = api.fetch_page(request.page(), request.page_size);
        self.finish_fetch(request, result).map(Some)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.set_query(query);
    }

    /// Start over from page 1 with an empty listing. A fetch still in
    /// flight for the old cursor is merged as stale when it lands.
    pub fn reload(&mut self) {
        self.generation += 1;
        self.cursor = PaginationCursor::new(self.cursor.page_size());
        self.in_flight = false;
        self.state.clear();
    }

    pub fn begin_delete(&mut self, id: i64) -> Option<PendingDelete> {
        self.state.begin_delete(id)
    }

    /// Commit or roll back an optimistic delete depending on the server's answer.
    pub fn finish_delete(
        &mut self,
        pending: PendingDelete,
        result: Result<(), ApiError>,
    ) -> Result<(), ApiError> {
        match result {
            Ok(()) => {
                debug!(id = pending.id(), "delete confirmed");
                self.state.commit_delete(pending);
                // Later server pages now start one row earlier.
                self.cursor.row_removed();
                Ok(())
            }
            Err(err) => {
                warn!(
                    id = pending.id(),
                    name = %pending.school().name,
                    error = %err,
                    "delete failed, restoring"
                );
                self.state.rollback_delete(pending);
                Err(err)
            }
        }
    }

    /// Optimistic delete with rollback. `Ok(false)` when `id` isn't listed.
    pub fn delete<A: SchoolApi + ?Sized>(&mut self, api: &A, id: i64) -> Result<bool, ApiError> {
        let Some(pending) = self.begin_delete(id) else {
            return Ok(false);
        };
        let result = api.delete_school(id);
        self.finish_delete(pending, result).map(|()| true)
    }
}

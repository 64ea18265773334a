/// Progress through the paginated listing.
///
/// The backend pages by offset, so the cursor keeps the offset of the next
/// row it has not seen. A confirmed delete of a loaded row pulls that
/// offset back by one; the page holding it is then fetched again and the
/// overlap is dropped by `reconcile`.
///
/// `has_more` only ever goes from true to false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    next_offset: u64,
    page_size: u32,
    has_more: bool,
    removed: u64,
}

/// Where the cursor stood when a page was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorMark {
    page: u32,
    removed: u64,
}

impl CursorMark {
    pub fn page(&self) -> u32 {
        self.page
    }
}

impl PaginationCursor {
    /// Starts at page 1. A zero page size is bumped to 1.
    pub fn new(page_size: u32) -> Self {
        Self {
            next_offset: 0,
            page_size: page_size.max(1),
            has_more: true,
            removed: 0,
        }
    }

    /// The page holding the first unseen row.
    pub fn page(&self) -> u32 {
        let page = self.next_offset / u64::from(self.page_size) + 1;
        u32::try_from(page).unwrap_or(u32::MAX)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn mark(&self) -> CursorMark {
        CursorMark {
            page: self.page(),
            removed: self.removed,
        }
    }

    /// Record a successful fetch of `mark`'s page that returned
    /// `batch_len` schools. A full page moves past it; a short page ends
    /// the listing. Rows removed while the page was in flight are assumed
    /// not to be reflected in it.
    pub fn advance(&mut self, mark: CursorMark, batch_len: usize) {
        if !self.has_more {
            return;
        }
        if batch_len < self.page_size as usize {
            self.has_more = false;
            return;
        }
        let removed_since = self.removed.saturating_sub(mark.removed);
        let page_end = u64::from(mark.page) * u64::from(self.page_size);
        self.next_offset = page_end.saturating_sub(removed_since);
    }

    /// A row before the next offset was deleted upstream.
    pub fn row_removed(&mut self) {
        self.removed += 1;
        if self.has_more {
            self.next_offset = self.next_offset.saturating_sub(1);
        }
    }
}

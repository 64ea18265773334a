//! Client-side school listing: incremental pages, dedup and live search.
//!
//! Pages are pulled one at a time through [`ListController`], merged into
//! the master list with [`reconcile`], and the search view is re-derived
//! with [`project`] whenever the list or the query changes.
//!
//! Each page is reversed on arrival so it reads newest-first, but pages are
//! appended in fetch order. The list is therefore newest-first within a
//! page, not across pages.

mod api;
mod cursor;
mod driver;
mod reconcile;
mod search;
mod state;

pub use api::{ApiError, SchoolApi};
pub use cursor::{CursorMark, PaginationCursor};
pub use driver::{FetchOutcome, ListController, PageRequest};
pub use reconcile::reconcile;
pub use search::project;
pub use state::{ListingState, PendingDelete};

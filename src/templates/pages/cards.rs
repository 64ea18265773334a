use crate::domain::School;
use crate::templates::components::{end_of_list, load_more_sentinel, no_results, school_card};
use maud::{html, Markup};

/// Cards for one page, then the sentinel for the rows after `next_after`.
/// Without a next page the list closes with the end message, or with
/// "No schools found." if no card was ever shown for this search.
/// Served on its own as the infinite-scroll fragment.
pub fn school_cards(
    schools: &[School],
    next_after: Option<i64>,
    query: &str,
    seen_before: bool,
) -> Markup {
    let seen_any = seen_before || !schools.is_empty();

    html! {
        @for school in schools {
            (school_card(school))
        }
        @match next_after {
            Some(after_id) => { (load_more_sentinel(after_id, query, seen_any)) }
            None => {
                @if seen_any { (end_of_list()) } @else { (no_results()) }
            }
        }
    }
}
